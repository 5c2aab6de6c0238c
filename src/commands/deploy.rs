// ABOUTME: Deployment step run after a successful push when enabled.
// ABOUTME: Failures become warnings; they never change the exit status.

use dockutil::config::RolloutTarget;
use dockutil::deploy::{ClusterOps, DeployError, KubeCluster, RolloutReport, rollout};
use dockutil::diagnostics::{Diagnostics, Warning};
use dockutil::output::Output;
use dockutil::resolve::BuildTarget;

/// Connect to the cluster and roll the deployment to `target`'s image.
pub async fn deploy_step(
    rollout_target: &RolloutTarget,
    target: &BuildTarget,
    output: &Output,
    diag: &mut Diagnostics,
) {
    output.progress("  → Deploying to kubernetes...");
    match KubeCluster::connect().await {
        Ok(cluster) => {
            deploy_to(&cluster, rollout_target, target, output, diag).await;
        }
        Err(e) => diag.warn(deploy_warning(&e)),
    }
}

/// Roll the deployment through `cluster`, recording any failure as a warning.
pub async fn deploy_to<C: ClusterOps>(
    cluster: &C,
    rollout_target: &RolloutTarget,
    target: &BuildTarget,
    output: &Output,
    diag: &mut Diagnostics,
) -> Option<RolloutReport> {
    match rollout(cluster, rollout_target, target.reference()).await {
        Ok(report) => {
            output.success(&format!(
                "Rolled {} container(s) in {}/{} to {}",
                report.updated.len(),
                report.namespace.name,
                rollout_target.deployment,
                target.full_image_reference()
            ));
            Some(report)
        }
        Err(e) => {
            diag.warn(deploy_warning(&e));
            None
        }
    }
}

fn deploy_warning(e: &DeployError) -> Warning {
    Warning::deployment(format!("Unable to deploy to kubernetes; {e}"))
}
