// ABOUTME: Derives the image reference and build context for a run.
// ABOUTME: Pure function over CLI overrides, configuration, manifest, and git metadata.

use crate::config::Config;
use crate::manifest::Manifest;
use crate::types::ImageRef;
use crate::vcs::VcsInfo;
use std::path::{Path, PathBuf};

/// Values supplied on the command line that take precedence over the manifest.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tag: Option<String>,
    pub context: Option<PathBuf>,
}

/// Everything needed to build and push one image.
///
/// Constructed once per run by [`resolve`]. The reference handed to the build
/// and to the push is the same value, so the pushed tag always matches the
/// built one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    registry_host: String,
    image_repository: String,
    base_version_tag: String,
    vcs_suffix: String,
    reference: ImageRef,
    full_image_reference: String,
    build_context_path: PathBuf,
}

impl BuildTarget {
    pub fn registry_host(&self) -> &str {
        &self.registry_host
    }

    pub fn image_repository(&self) -> &str {
        &self.image_repository
    }

    pub fn base_version_tag(&self) -> &str {
        &self.base_version_tag
    }

    pub fn vcs_suffix(&self) -> &str {
        &self.vcs_suffix
    }

    pub fn reference(&self) -> &ImageRef {
        &self.reference
    }

    /// `{registry}/{repository}:{tag}{suffix}`
    pub fn full_image_reference(&self) -> &str {
        &self.full_image_reference
    }

    pub fn build_context_path(&self) -> &Path {
        &self.build_context_path
    }
}

/// Compute the build target for this run.
///
/// `cwd` is the invocation directory, used when no context override is given.
pub fn resolve(
    overrides: &Overrides,
    config: &Config,
    manifest: &Manifest,
    vcs: Option<&VcsInfo>,
    cwd: &Path,
) -> BuildTarget {
    let base_version_tag = overrides
        .tag
        .as_deref()
        .filter(|t| !t.is_empty())
        .unwrap_or(manifest.version.as_str())
        .to_string();

    let vcs_suffix = vcs
        .map(|info| format!("-{}", info.abbreviated_sha()))
        .unwrap_or_default();

    let build_context_path = overrides
        .context
        .clone()
        .unwrap_or_else(|| cwd.to_path_buf());

    let registry_host = config.registry().to_string();
    let image_repository = manifest.name.clone();
    let reference = ImageRef::new(
        &registry_host,
        &image_repository,
        &format!("{base_version_tag}{vcs_suffix}"),
    );
    let full_image_reference = reference.to_string();

    BuildTarget {
        registry_host,
        image_repository,
        base_version_tag,
        vcs_suffix,
        reference,
        full_image_reference,
        build_context_path,
    }
}

/// Whether the deployment step runs after a successful push.
pub fn should_deploy(config: &Config) -> bool {
    config.deploy_enabled
}
