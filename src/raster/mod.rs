//! Owned RGB rasters plus the crop, resize and compositing operations on them.

pub mod composite;
pub mod crop;
pub mod image;
