// ABOUTME: Image operations trait for the container engine.
// ABOUTME: Build an image from a context archive and push it to a registry.

use super::sealed::Sealed;
use super::shared_types::{ProgressLine, RegistryAuth};
use crate::types::ImageRef;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Progress lines from a build or push, ending when the engine closes the stream.
pub type ProgressStream<'a> =
    Pin<Box<dyn Stream<Item = Result<ProgressLine, ImageError>> + Send + 'a>>;

/// Image operations: build, push.
pub trait ImageOps: Sealed + Send + Sync {
    /// Build `reference` from a tar archive of the build context.
    fn build_image(&self, context: Bytes, reference: &ImageRef) -> ProgressStream<'_>;

    /// Push `reference` to the registry it names.
    fn push_image(&self, reference: &ImageRef, auth: Option<&RegistryAuth>) -> ProgressStream<'_>;
}

/// Errors from image operations.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("build failed: {0}")]
    BuildFailed(String),

    #[error("push failed: {0}")]
    PushFailed(String),

    #[error("invalid build context: {0}")]
    Context(String),
}
