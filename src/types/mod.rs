// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Currently the container image reference.

mod image_ref;

pub use image_ref::{ImageRef, ParseImageRefError};
