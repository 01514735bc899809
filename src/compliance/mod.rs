//! Brand compliance scoring of finished creatives.

pub(crate) mod quantize;
/// Color coverage and readability checks.
pub mod validator;
