// ABOUTME: Release struct and its state transitions.
// ABOUTME: Each transition consumes self, drains the engine stream, and returns the next state.

use bytes::Bytes;
use futures::StreamExt;
use snafu::ResultExt;

use crate::resolve::BuildTarget;
use crate::runtime::{
    ImageError, ImageOps, ProgressLine, ProgressStream, RegistryAuth, pack_context,
};

use super::error::{BuildSnafu, PushSnafu, ReleaseError};
use super::state::{Built, Pushed, Resolved};

/// One image moving through build and push, parameterized by its state.
#[derive(Debug)]
pub struct Release<S> {
    target: BuildTarget,
    _state: S,
}

impl<S> Release<S> {
    /// The resolved target, identical in every state.
    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    fn transition<T: Default>(self) -> Release<T> {
        Release {
            target: self.target,
            _state: T::default(),
        }
    }
}

/// Forward every line of `stream` to `on_line` until the engine closes it.
async fn drain<F>(mut stream: ProgressStream<'_>, on_line: &mut F) -> Result<(), ImageError>
where
    F: FnMut(&ProgressLine),
{
    while let Some(item) = stream.next().await {
        on_line(&item?);
    }
    Ok(())
}

// =============================================================================
// Resolved -> Built
// =============================================================================

impl Release<Resolved> {
    pub fn new(target: BuildTarget) -> Self {
        Release {
            target,
            _state: Resolved,
        }
    }

    /// Archive the build context and build the image under the resolved reference.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::Build` if the context cannot be packed or the
    /// engine reports a failure.
    pub async fn build<R, F>(
        self,
        runtime: &R,
        mut on_line: F,
    ) -> Result<Release<Built>, ReleaseError>
    where
        R: ImageOps,
        F: FnMut(&ProgressLine),
    {
        let context_path = self.target.build_context_path().to_path_buf();
        let archive = tokio::task::spawn_blocking(move || pack_context(&context_path))
            .await
            .map_err(|e| ImageError::Context(format!("context packing aborted: {e}")))
            .and_then(|packed| packed)
            .context(BuildSnafu)?;

        tracing::info!(image = %self.target.full_image_reference(), "building image");
        let stream = runtime.build_image(Bytes::from(archive), self.target.reference());
        drain(stream, &mut on_line).await.context(BuildSnafu)?;

        Ok(self.transition())
    }
}

// =============================================================================
// Built -> Pushed
// =============================================================================

impl Release<Built> {
    /// Push the built image using the supplied credentials.
    ///
    /// The built image is left in place if the push fails.
    ///
    /// # Errors
    ///
    /// Returns `ReleaseError::Push` if the engine reports a failure.
    pub async fn push<R, F>(
        self,
        runtime: &R,
        auth: Option<&RegistryAuth>,
        mut on_line: F,
    ) -> Result<Release<Pushed>, ReleaseError>
    where
        R: ImageOps,
        F: FnMut(&ProgressLine),
    {
        tracing::info!(image = %self.target.full_image_reference(), "pushing image");
        let stream = runtime.push_image(self.target.reference(), auth);
        drain(stream, &mut on_line).await.context(PushSnafu)?;

        Ok(self.transition())
    }
}

// =============================================================================
// Pushed (terminal)
// =============================================================================

impl Release<Pushed> {
    /// Finish the release, handing back the target for any follow-up step.
    pub fn finish(self) -> BuildTarget {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ENV_REGISTRY};
    use crate::manifest::Manifest;
    use crate::release::ReleaseErrorKind;
    use crate::resolve::{Overrides, resolve};
    use crate::runtime::traits::sealed::Sealed;
    use crate::types::ImageRef;
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Clone, Copy, PartialEq)]
    enum Outcome {
        Ok,
        Fail,
    }

    struct FakeEngine {
        build: Outcome,
        push: Outcome,
        calls: Mutex<Vec<String>>,
    }

    impl FakeEngine {
        fn new(build: Outcome, push: Outcome) -> Self {
            Self {
                build,
                push,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Sealed for FakeEngine {}

    impl ImageOps for FakeEngine {
        fn build_image(&self, context: Bytes, reference: &ImageRef) -> ProgressStream<'_> {
            assert!(!context.is_empty(), "context archive should not be empty");
            self.calls.lock().unwrap().push(format!("build {reference}"));
            let mut items = vec![
                Ok(ProgressLine::new("Step 1/1 : FROM alpine")),
                Ok(ProgressLine::new(format!("Successfully tagged {reference}"))),
            ];
            if self.build == Outcome::Fail {
                items.push(Err(ImageError::BuildFailed("exit code 1".to_string())));
            }
            Box::pin(futures::stream::iter(items))
        }

        fn push_image(
            &self,
            reference: &ImageRef,
            auth: Option<&RegistryAuth>,
        ) -> ProgressStream<'_> {
            let server = auth.and_then(|a| a.server.clone()).unwrap_or_default();
            self.calls
                .lock()
                .unwrap()
                .push(format!("push {reference} {server}"));
            let items = match self.push {
                Outcome::Ok => vec![Ok(ProgressLine::new("Pushed"))],
                Outcome::Fail => vec![Err(ImageError::PushFailed("denied".to_string()))],
            };
            Box::pin(futures::stream::iter(items))
        }
    }

    fn target(context: &Path) -> BuildTarget {
        let config =
            Config::from_lookup(|key| (key == ENV_REGISTRY).then(|| "reg.example.com".to_string()))
                .unwrap();
        let manifest = Manifest {
            name: "svc".to_string(),
            version: "1.2.0".to_string(),
        };
        let overrides = Overrides {
            tag: None,
            context: Some(context.to_path_buf()),
        };
        resolve(&overrides, &config, &manifest, None, Path::new("/unused"))
    }

    fn context_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dockerfile"), "FROM alpine\n").unwrap();
        dir
    }

    fn auth() -> RegistryAuth {
        RegistryAuth {
            server: Some("https://reg.example.com".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn build_then_push_uses_one_reference() {
        let dir = context_dir();
        let engine = FakeEngine::new(Outcome::Ok, Outcome::Ok);
        let mut seen = Vec::new();
        let mut pushed_lines = 0;

        let built = Release::new(target(dir.path()))
            .build(&engine, |line| seen.push(line.message.clone()))
            .await
            .unwrap();
        let pushed = built
            .push(&engine, Some(&auth()), |_| pushed_lines += 1)
            .await
            .unwrap();

        assert_eq!(seen.len(), 2);
        assert_eq!(pushed_lines, 1);
        assert_eq!(
            engine.calls(),
            vec![
                "build reg.example.com/svc:1.2.0".to_string(),
                "push reg.example.com/svc:1.2.0 https://reg.example.com".to_string(),
            ]
        );
        assert_eq!(seen[1], "Successfully tagged reg.example.com/svc:1.2.0");
        assert_eq!(pushed.finish().full_image_reference(), "reg.example.com/svc:1.2.0");
    }

    #[tokio::test]
    async fn build_failure_stops_before_push() {
        let dir = context_dir();
        let engine = FakeEngine::new(Outcome::Fail, Outcome::Ok);

        let err = Release::new(target(dir.path()))
            .build(&engine, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ReleaseErrorKind::Build);
        assert_eq!(err.to_string(), "Unable to build image; build failed: exit code 1");
        assert_eq!(engine.calls().len(), 1);
    }

    #[tokio::test]
    async fn unpackable_context_never_reaches_engine() {
        let dir = tempfile::tempdir().unwrap();
        let engine = FakeEngine::new(Outcome::Ok, Outcome::Ok);

        let err = Release::new(target(dir.path()))
            .build(&engine, |_| {})
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ReleaseErrorKind::Build);
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn push_failure_is_reported_as_push() {
        let dir = context_dir();
        let engine = FakeEngine::new(Outcome::Ok, Outcome::Fail);

        let built = Release::new(target(dir.path()))
            .build(&engine, |_| {})
            .await
            .unwrap();
        let err = built.push(&engine, Some(&auth()), |_| {}).await.unwrap_err();

        assert_eq!(err.kind(), ReleaseErrorKind::Push);
        assert_eq!(err.to_string(), "Error pushing image: push failed: denied");
    }
}
