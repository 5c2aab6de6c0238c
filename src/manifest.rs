// ABOUTME: Project manifest loading (package.json in the invocation directory).
// ABOUTME: Only the name and version fields are read; both are required.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILENAME: &str = "package.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

impl Manifest {
    /// Parse manifest JSON. `path` is only used for error messages.
    pub fn parse(path: &Path, json: &str) -> Result<Self> {
        let raw: RawManifest =
            serde_json::from_str(json).map_err(|source| Error::InvalidManifest {
                path: path.to_path_buf(),
                source,
            })?;

        let name = raw
            .name
            .filter(|n| !n.is_empty())
            .ok_or(Error::MissingManifestField("name"))?;
        let version = raw
            .version
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingManifestField("version"))?;

        Ok(Self { name, version })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(Path::new(MANIFEST_FILENAME), json)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ManifestNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        Self::parse(path, &content)
    }

    /// Load the manifest from `dir`.
    pub fn discover(dir: &Path) -> Result<Self> {
        Self::load(&Self::path_in(dir))
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILENAME)
    }
}
