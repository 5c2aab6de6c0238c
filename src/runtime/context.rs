// ABOUTME: Build context packing for the engine's build endpoint.
// ABOUTME: Archives a directory tree into an in-memory tar stream.

use super::traits::ImageError;
use std::path::Path;
use tar::Builder;

const DOCKERFILE: &str = "Dockerfile";
const LARGE_CONTEXT_BYTES: usize = 500 * 1024 * 1024;

/// Archive `dir` as a tar stream rooted at the context directory.
pub fn pack_context(dir: &Path) -> Result<Vec<u8>, ImageError> {
    if !dir.is_dir() {
        return Err(ImageError::Context(format!(
            "{} is not a directory",
            dir.display()
        )));
    }
    if !dir.join(DOCKERFILE).is_file() {
        return Err(ImageError::Context(format!(
            "no {} in {}",
            DOCKERFILE,
            dir.display()
        )));
    }

    tracing::debug!("packing build context from {}", dir.display());

    let mut builder = Builder::new(Vec::new());
    builder.follow_symlinks(false);
    builder
        .append_dir_all(".", dir)
        .map_err(|e| ImageError::Context(format!("failed to archive {}: {}", dir.display(), e)))?;
    let archive = builder
        .into_inner()
        .map_err(|e| ImageError::Context(format!("failed to finish archive: {}", e)))?;

    tracing::debug!("build context is {} bytes", archive.len());
    if archive.len() > LARGE_CONTEXT_BYTES {
        tracing::warn!(
            "build context is {}MB; consider trimming the context directory",
            archive.len() / 1024 / 1024
        );
    }

    Ok(archive)
}
