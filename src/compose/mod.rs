//! Multi-format creative generation.

pub mod composer;
