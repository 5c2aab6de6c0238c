// ABOUTME: Build-and-push pipeline using the type state pattern.
// ABOUTME: Exports state markers and the Release struct for compile-time ordered runs.

mod error;
mod pipeline;
mod state;

pub use error::{ReleaseError, ReleaseErrorKind};
pub use pipeline::Release;
pub use state::{Built, Pushed, Resolved};
