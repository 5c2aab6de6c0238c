// ABOUTME: Release state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce build-before-push at compile time.

/// Initial state: reference resolved, nothing built yet.
/// Available actions: `build()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolved;

/// Image built locally under the resolved reference.
/// Available actions: `push()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Built;

/// Image pushed to the registry.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Pushed;
