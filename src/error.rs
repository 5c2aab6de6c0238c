// ABOUTME: Application-wide error types for dockutil.
// ABOUTME: Uses thiserror for ergonomic error handling and maps failures to exit codes.

use crate::release::{ReleaseError, ReleaseErrorKind};
use crate::runtime::RuntimeInfoError;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status for configuration failures.
pub const EXIT_CONFIG: i32 = 2;
/// Exit status when the image could not be built.
pub const EXIT_BUILD: i32 = 3;
/// Exit status when the image could not be pushed.
pub const EXIT_PUSH: i32 = 4;

#[derive(Debug, Error)]
pub enum Error {
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("invalid manifest {path}: {source}")]
    InvalidManifest {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("manifest is missing required field: {0}")]
    MissingManifestField(&'static str),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Unable to build image; {0}")]
    Engine(#[from] RuntimeInfoError),

    #[error(transparent)]
    Release(#[from] ReleaseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Engine(_) => EXIT_BUILD,
            Error::Release(e) => match e.kind() {
                ReleaseErrorKind::Build => EXIT_BUILD,
                ReleaseErrorKind::Push => EXIT_PUSH,
            },
            _ => EXIT_CONFIG,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ImageError;

    #[test]
    fn configuration_errors_exit_with_config_status() {
        assert_eq!(Error::MissingManifestField("name").exit_code(), EXIT_CONFIG);
        assert_eq!(
            Error::MissingEnvVar("DOCKER_PRIVATE_REGISTRY".to_string()).exit_code(),
            EXIT_CONFIG
        );
    }

    #[test]
    fn engine_errors_count_as_build_failures() {
        let err = Error::from(RuntimeInfoError::ConnectionFailed("no socket".to_string()));
        assert_eq!(err.exit_code(), EXIT_BUILD);
        assert_eq!(err.to_string(), "Unable to build image; connection failed: no socket");
    }

    #[test]
    fn release_errors_map_to_their_stage() {
        let build = Error::from(ReleaseError::Build {
            source: ImageError::BuildFailed("bad Dockerfile".to_string()),
        });
        assert_eq!(build.exit_code(), EXIT_BUILD);

        let push = Error::from(ReleaseError::Push {
            source: ImageError::PushFailed("denied".to_string()),
        });
        assert_eq!(push.exit_code(), EXIT_PUSH);
        assert_eq!(push.to_string(), "Error pushing image: push failed: denied");
    }
}
