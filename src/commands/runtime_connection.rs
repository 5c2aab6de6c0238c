// ABOUTME: Helper for connecting to the local container engine.
// ABOUTME: Connects, pings, and logs engine metadata before any build.

use dockutil::error::Result;
use dockutil::output::Output;
use dockutil::runtime::{BollardRuntime, RuntimeInfo};

/// Connect to the engine named by `DOCKER_HOST` or the default socket.
pub async fn connect_to_runtime(output: &Output) -> Result<BollardRuntime> {
    output.progress("  → Connecting to container engine...");
    let runtime = BollardRuntime::connect_local()?;
    runtime.ping().await?;

    match runtime.info().await {
        Ok(meta) => tracing::debug!(
            version = %meta.version,
            api = %meta.api_version,
            os = %meta.os,
            arch = %meta.arch,
            "connected to engine"
        ),
        Err(e) => tracing::debug!("engine info unavailable: {}", e),
    }

    Ok(runtime)
}
