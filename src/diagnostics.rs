// ABOUTME: Non-fatal warnings raised while releasing an image.
// ABOUTME: Collected during the run and reported once it finishes.

use std::fmt;

/// Warnings gathered during a run, reported after the image is pushed.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, warning: Warning) {
        tracing::debug!(kind = %warning.kind, "recorded warning");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// No commit was found, so the tag has no revision suffix.
    pub fn untracked_source(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::UntrackedSource,
            message: message.into(),
        }
    }

    /// The rollout failed after a successful push.
    pub fn deployment(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::Deployment,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    UntrackedSource,
    Deployment,
}

impl WarningKind {
    /// Stable name used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::UntrackedSource => "untracked_source",
            WarningKind::Deployment => "deployment",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
