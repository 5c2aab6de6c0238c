// ABOUTME: Release command implementation.
// ABOUTME: Resolves the image reference, builds, pushes, and optionally deploys.

use super::deploy::deploy_step;
use super::runtime_connection::connect_to_runtime;
use dockutil::config::{self, Config};
use dockutil::diagnostics::{Diagnostics, Warning};
use dockutil::error::Result;
use dockutil::manifest::Manifest;
use dockutil::output::Output;
use dockutil::release::Release;
use dockutil::resolve::{Overrides, resolve, should_deploy};
use dockutil::vcs::VcsInfo;
use std::env;

/// Build and push the current project's image.
pub async fn release(overrides: Overrides, deploy: bool, mut output: Output) -> Result<()> {
    output.start_timer();
    let cwd = env::current_dir()?;
    let mut diag = Diagnostics::default();

    // Everything below is resolved before the engine is contacted
    config::load_env_file(&cwd)?;
    let config = Config::from_env()?.with_deploy(deploy);
    let manifest = Manifest::discover(&cwd)?;
    let vcs = VcsInfo::discover(&cwd);
    match &vcs {
        Some(info) => output.progress(&format!(
            "  → Revision {} on {}",
            info.abbreviated_sha(),
            info.branch().unwrap_or("detached HEAD")
        )),
        None => diag.warn(Warning::untracked_source(format!(
            "no git commit found in {}; tag has no revision suffix",
            cwd.display()
        ))),
    }

    let target = resolve(&overrides, &config, &manifest, vcs.as_ref(), &cwd);
    tracing::debug!(?target, "resolved build target");

    let rollout_target = if should_deploy(&config) {
        Some(config.deployment.require()?)
    } else {
        None
    };

    output.progress(&format!(
        "Building {} from {}",
        target.full_image_reference(),
        target.build_context_path().display()
    ));

    let runtime = connect_to_runtime(&output).await?;

    let built = Release::new(target)
        .build(&runtime, |line| output.line(line))
        .await?;
    output.success(&format!(
        "Successfully built image {}",
        built.target().full_image_reference()
    ));

    let auth = config.credentials.to_auth();
    let pushed = built
        .push(&runtime, Some(&auth), |line| output.line(line))
        .await?;
    output.success(&format!(
        "Successfully pushed image {}",
        pushed.target().full_image_reference()
    ));

    let target = pushed.finish();
    if let Some(rollout_target) = &rollout_target {
        deploy_step(rollout_target, &target, &output, &mut diag).await;
    }

    for warning in diag.warnings() {
        output.warning(warning);
    }

    Ok(())
}
