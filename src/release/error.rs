// ABOUTME: Release error types with SNAFU pattern.
// ABOUTME: Unifies build and push failures for programmatic handling.

use snafu::Snafu;

use crate::runtime::ImageError;

/// Failure of one stage of a release.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReleaseError {
    #[snafu(display("Unable to build image; {source}"))]
    Build { source: ImageError },

    #[snafu(display("Error pushing image: {source}"))]
    Push { source: ImageError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseErrorKind {
    /// The image could not be built; nothing was pushed.
    Build,
    /// The image was built but could not be pushed.
    Push,
}

impl ReleaseError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReleaseErrorKind {
        match self {
            ReleaseError::Build { .. } => ReleaseErrorKind::Build,
            ReleaseError::Push { .. } => ReleaseErrorKind::Push,
        }
    }
}
