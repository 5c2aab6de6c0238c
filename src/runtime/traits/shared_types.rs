// ABOUTME: Shared types used across runtime trait definitions.
// ABOUTME: RegistryAuth, ProgressLine, RuntimeMetadata.

use std::fmt;

/// Registry authentication credentials.
#[derive(Clone, Default)]
pub struct RegistryAuth {
    /// Username.
    pub username: Option<String>,
    /// Password or token.
    pub password: Option<String>,
    /// Account email.
    pub email: Option<String>,
    /// Registry server (e.g., "https://reg.example.com").
    pub server: Option<String>,
}

impl fmt::Debug for RegistryAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("server", &self.server)
            .finish()
    }
}

/// One line of engine output from a build or push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLine {
    /// Step output or status text, without trailing newline.
    pub message: String,
    /// Progress indicator for layer transfers, if any.
    pub progress: Option<String>,
}

impl ProgressLine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            progress: None,
        }
    }
}

impl fmt::Display for ProgressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.progress {
            Some(ref progress) => write!(f, "{} {}", self.message, progress),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Runtime metadata.
#[derive(Debug, Clone)]
pub struct RuntimeMetadata {
    /// Engine version.
    pub version: String,
    /// API version in use.
    pub api_version: String,
    /// Operating system.
    pub os: String,
    /// Architecture.
    pub arch: String,
}
