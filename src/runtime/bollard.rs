// ABOUTME: Bollard-based container engine implementation.
// ABOUTME: Implements ImageOps and RuntimeInfo against the Docker Engine API.

use crate::runtime::traits::sealed::Sealed;
use crate::runtime::traits::{
    ImageError, ImageOps, ProgressLine, ProgressStream, RegistryAuth, RuntimeInfo,
    RuntimeInfoError, RuntimeMetadata,
};
use crate::types::ImageRef;
use async_trait::async_trait;
use bollard::Docker;
use bollard::auth::DockerCredentials;
use bollard::models::{BuildInfo, ErrorDetail, ProgressDetail, PushImageInfo};
use bollard::query_parameters::{BuildImageOptionsBuilder, PushImageOptionsBuilder};
use bytes::Bytes;
use futures::StreamExt;

// =============================================================================
// Progress Mapping Helpers
// =============================================================================

fn map_error_detail(detail: Option<ErrorDetail>) -> Option<String> {
    detail.map(|d| d.message.unwrap_or_else(|| "engine reported an error".to_string()))
}

/// Render byte counters as `current/total`, or just `current` while the total is unknown.
fn render_progress(detail: Option<ProgressDetail>) -> Option<String> {
    let detail = detail?;
    match (detail.current, detail.total) {
        (Some(current), Some(total)) if total > 0 => Some(format!("{current}/{total}")),
        (Some(current), _) => Some(current.to_string()),
        _ => None,
    }
}

fn map_build_info(info: BuildInfo) -> Result<Option<ProgressLine>, ImageError> {
    if let Some(message) = map_error_detail(info.error_detail) {
        return Err(ImageError::BuildFailed(message));
    }

    let line = match (info.stream, info.status) {
        (Some(stream), _) => {
            let message = stream.trim_end().to_string();
            (!message.is_empty()).then(|| ProgressLine::new(message))
        }
        (None, Some(status)) => Some(ProgressLine {
            message: status,
            progress: render_progress(info.progress_detail),
        }),
        (None, None) => None,
    };
    Ok(line)
}

fn map_push_info(info: PushImageInfo) -> Result<Option<ProgressLine>, ImageError> {
    if let Some(message) = map_error_detail(info.error_detail) {
        return Err(ImageError::PushFailed(message));
    }
    Ok(info.status.map(|status| ProgressLine {
        message: status,
        progress: render_progress(info.progress_detail),
    }))
}

fn map_engine_error(e: bollard::errors::Error, image_name: &str, push: bool) -> ImageError {
    match e {
        bollard::errors::Error::DockerStreamError { error } if push => {
            ImageError::PushFailed(error)
        }
        bollard::errors::Error::DockerStreamError { error } => ImageError::BuildFailed(error),
        other if push => ImageError::PushFailed(format!("{}: {}", image_name, other)),
        other => ImageError::BuildFailed(format!("{}: {}", image_name, other)),
    }
}

// =============================================================================
// BollardRuntime
// =============================================================================

/// Container engine implementation using bollard.
pub struct BollardRuntime {
    client: Docker,
}

impl BollardRuntime {
    /// Create a new BollardRuntime from a Docker client.
    pub fn new(client: Docker) -> Self {
        Self { client }
    }

    /// Connect to the local engine, honouring `DOCKER_HOST`.
    pub fn connect_local() -> Result<Self, RuntimeInfoError> {
        let client = Docker::connect_with_local_defaults()
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client))
    }
}

impl Sealed for BollardRuntime {}

#[async_trait]
impl RuntimeInfo for BollardRuntime {
    async fn info(&self) -> Result<RuntimeMetadata, RuntimeInfoError> {
        let info = self
            .client
            .info()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;

        Ok(RuntimeMetadata {
            version: info.server_version.unwrap_or_default(),
            api_version: bollard::API_DEFAULT_VERSION.to_string(),
            os: info.operating_system.unwrap_or_default(),
            arch: info.architecture.unwrap_or_default(),
        })
    }

    async fn ping(&self) -> Result<(), RuntimeInfoError> {
        self.client
            .ping()
            .await
            .map_err(|e| RuntimeInfoError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

impl ImageOps for BollardRuntime {
    fn build_image(&self, context: Bytes, reference: &ImageRef) -> ProgressStream<'_> {
        let image_name = reference.to_string();

        let options = BuildImageOptionsBuilder::default()
            .dockerfile("Dockerfile")
            .t(&image_name)
            .rm(true)
            .build();

        let stream = self
            .client
            .build_image(options, None, Some(bollard::body_full(context)));

        Box::pin(stream.filter_map(move |result| {
            let item = match result {
                Ok(info) => map_build_info(info).transpose(),
                Err(e) => Some(Err(map_engine_error(e, &image_name, false))),
            };
            futures::future::ready(item)
        }))
    }

    fn push_image(
        &self,
        reference: &ImageRef,
        auth: Option<&RegistryAuth>,
    ) -> ProgressStream<'_> {
        let image_name = reference.to_string();
        let repository = reference.repository();

        let options = PushImageOptionsBuilder::default()
            .tag(reference.tag().unwrap_or("latest"))
            .build();

        let credentials = auth.map(|a| DockerCredentials {
            username: a.username.clone(),
            password: a.password.clone(),
            email: a.email.clone(),
            serveraddress: a.server.clone(),
            ..Default::default()
        });

        let stream = self
            .client
            .push_image(&repository, Some(options), credentials);

        Box::pin(stream.filter_map(move |result| {
            let item = match result {
                Ok(info) => map_push_info(info).transpose(),
                Err(e) => Some(Err(map_engine_error(e, &image_name, true))),
            };
            futures::future::ready(item)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_stream_lines_are_trimmed() {
        let info = BuildInfo {
            stream: Some("Step 1/2 : FROM alpine\n".to_string()),
            ..Default::default()
        };
        let line = map_build_info(info).unwrap().unwrap();
        assert_eq!(line.message, "Step 1/2 : FROM alpine");
    }

    #[test]
    fn blank_build_lines_are_skipped() {
        let info = BuildInfo {
            stream: Some("\n".to_string()),
            ..Default::default()
        };
        assert!(map_build_info(info).unwrap().is_none());
    }

    #[test]
    fn build_error_detail_fails_the_build() {
        let info = BuildInfo {
            error_detail: Some(ErrorDetail {
                message: Some("COPY failed".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = map_build_info(info).unwrap_err();
        assert!(matches!(err, ImageError::BuildFailed(ref m) if m == "COPY failed"));
    }

    #[test]
    fn push_status_carries_byte_progress() {
        let info = PushImageInfo {
            status: Some("Pushing".to_string()),
            progress_detail: Some(ProgressDetail {
                current: Some(512),
                total: Some(2048),
            }),
            ..Default::default()
        };
        let line = map_push_info(info).unwrap().unwrap();
        assert_eq!(line.to_string(), "Pushing 512/2048");
    }

    #[test]
    fn push_status_without_total_shows_current() {
        let info = PushImageInfo {
            status: Some("Pushing".to_string()),
            progress_detail: Some(ProgressDetail {
                current: Some(512),
                total: None,
            }),
            ..Default::default()
        };
        let line = map_push_info(info).unwrap().unwrap();
        assert_eq!(line.progress.as_deref(), Some("512"));
    }

    #[test]
    fn push_error_detail_fails_the_push() {
        let info = PushImageInfo {
            error_detail: Some(ErrorDetail {
                message: Some("denied: requested access to the resource is denied".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            map_push_info(info),
            Err(ImageError::PushFailed(ref m)) if m.starts_with("denied")
        ));
    }

    #[test]
    fn push_error_without_message_still_fails() {
        let info = PushImageInfo {
            error_detail: Some(ErrorDetail::default()),
            ..Default::default()
        };
        assert!(matches!(
            map_push_info(info),
            Err(ImageError::PushFailed(_))
        ));
    }

    #[test]
    fn stream_errors_map_to_stage() {
        let e = bollard::errors::Error::DockerStreamError {
            error: "unauthorized".to_string(),
        };
        assert!(matches!(
            map_engine_error(e, "reg/svc:1", true),
            ImageError::PushFailed(ref m) if m == "unauthorized"
        ));
    }
}
