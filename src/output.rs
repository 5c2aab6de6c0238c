// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes.

use crate::diagnostics::Warning;
use crate::runtime::ProgressLine;
use serde::Serialize;
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages and engine output
    Normal,
    /// Minimal output for CI (only final results)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Forward one line of build or push output from the engine.
    pub fn line(&self, line: &ProgressLine) {
        match self.mode {
            OutputMode::Normal => println!("{line}"),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_stdout("output", &line.to_string(), false),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => self.emit_stdout("success", message, true),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, warning: &Warning) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Warning: {}", warning.message),
            OutputMode::Json => {
                if let Some(json) = self.warning_json(warning) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                if let Some(json) = self.event_json("error", message, true) {
                    eprintln!("{json}");
                }
            }
        }
    }

    fn emit_stdout(&self, event: &str, message: &str, timed: bool) {
        if let Some(json) = self.event_json(event, message, timed) {
            println!("{json}");
        }
    }

    fn warning_json(&self, warning: &Warning) -> Option<String> {
        let event = JsonEvent {
            event: "warning",
            message: &warning.message,
            kind: Some(warning.kind.as_str()),
            duration_secs: None,
        };
        serde_json::to_string(&event).ok()
    }

    fn event_json(&self, event: &str, message: &str, timed: bool) -> Option<String> {
        let event = JsonEvent {
            event,
            message,
            kind: None,
            duration_secs: if timed && self.start_time.is_some() {
                Some(self.elapsed_secs())
            } else {
                None
            },
        };
        serde_json::to_string(&event).ok()
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_event_omits_duration_without_timer() {
        let output = Output::new(OutputMode::Json);
        let json = output.event_json("success", "done", true).unwrap();
        assert_eq!(json, r#"{"event":"success","message":"done"}"#);
    }

    #[test]
    fn json_event_includes_duration_when_timed() {
        let mut output = Output::new(OutputMode::Json);
        output.start_timer();
        let json = output.event_json("success", "done", true).unwrap();
        assert!(json.contains("duration_secs"));

        let untimed = output.event_json("output", "Step 1/2", false).unwrap();
        assert!(!untimed.contains("duration_secs"));
    }

    #[test]
    fn warning_json_names_the_kind() {
        let output = Output::new(OutputMode::Json);
        let json = output
            .warning_json(&Warning::deployment("Unable to deploy to kubernetes; 404"))
            .unwrap();
        assert_eq!(
            json,
            r#"{"event":"warning","message":"Unable to deploy to kubernetes; 404","kind":"deployment"}"#
        );
    }
}
