// ABOUTME: Composable capability traits for the container engine.
// ABOUTME: Defines ImageOps and RuntimeInfo.

mod image;
mod runtime_info;
pub(crate) mod sealed;
mod shared_types;

pub use image::{ImageError, ImageOps, ProgressStream};
pub use runtime_info::{RuntimeInfo, RuntimeInfoError};
pub use shared_types::*;
