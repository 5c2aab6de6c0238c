// ABOUTME: Command module aggregator for the dockutil CLI.
// ABOUTME: Re-exports the release command and its helpers.

mod deploy;
mod release;
mod runtime_connection;

pub use release::release;
