// ABOUTME: Container engine access for building and pushing images.
// ABOUTME: Capability traits plus the bollard-backed Docker implementation.

mod bollard;
mod context;
pub mod traits;

pub use self::bollard::BollardRuntime;
pub use context::pack_context;
pub use traits::{
    ImageError, ImageOps, ProgressLine, ProgressStream, RegistryAuth, RuntimeInfo,
    RuntimeInfoError, RuntimeMetadata,
};
