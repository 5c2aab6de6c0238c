// ABOUTME: Library root for dockutil - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod manifest;
pub mod output;
pub mod release;
pub mod resolve;
pub mod runtime;
pub mod types;
pub mod vcs;
