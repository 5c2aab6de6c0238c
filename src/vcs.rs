// ABOUTME: Version-control metadata for the working directory.
// ABOUTME: Shells out to git; absence of git, a repository, or commits yields None.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {args} failed: {stderr}")]
    Git { args: String, stderr: String },
}

/// Length of the abbreviated commit identifier appended to image tags.
pub const ABBREVIATED_SHA_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsInfo {
    sha: String,
    branch: Option<String>,
}

impl VcsInfo {
    pub fn new(sha: impl Into<String>, branch: Option<String>) -> Self {
        Self {
            sha: sha.into(),
            branch,
        }
    }

    /// Inspect the repository containing `dir`, if any.
    pub fn discover(dir: &Path) -> Option<Self> {
        let sha = match git(dir, &["rev-parse", "--verify", "HEAD"]) {
            Ok(sha) if !sha.is_empty() => sha,
            Ok(_) => return None,
            Err(e) => {
                tracing::debug!("no version control metadata in {}: {}", dir.display(), e);
                return None;
            }
        };

        // Detached checkouts report the literal "HEAD"
        let branch = git(dir, &["rev-parse", "--abbrev-ref", "HEAD"])
            .ok()
            .filter(|b| !b.is_empty() && b != "HEAD");

        tracing::debug!(sha = %sha, branch = ?branch, "discovered git metadata");
        Some(Self { sha, branch })
    }

    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// The first characters of the commit sha.
    pub fn abbreviated_sha(&self) -> &str {
        match self.sha.char_indices().nth(ABBREVIATED_SHA_LEN) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }
}

fn git(dir: &Path, args: &[&str]) -> Result<String, VcsError> {
    let output = Command::new("git").arg("-C").arg(dir).args(args).output()?;
    if !output.status.success() {
        return Err(VcsError::Git {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
