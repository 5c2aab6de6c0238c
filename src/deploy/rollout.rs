// ABOUTME: Rolls a deployment's matching containers to a freshly pushed image.
// ABOUTME: Looks up namespace, service, and deployment before patching.

use super::cluster::{ClusterOps, ContainerImage, NamespaceSummary};
use super::error::DeployError;
use crate::config::RolloutTarget;
use crate::types::ImageRef;

/// What a rollout found and changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutReport {
    pub namespace: NamespaceSummary,
    /// `None` when no service name was configured.
    pub service_found: Option<bool>,
    pub updated: Vec<ContainerImage>,
}

/// Point every container of the target deployment that runs `image`'s
/// repository at `image`.
///
/// # Errors
///
/// Returns `DeployError::NoMatchingContainer` if nothing runs the repository,
/// or the cluster's error for failed lookups and patches.
pub async fn rollout<C: ClusterOps>(
    cluster: &C,
    target: &RolloutTarget,
    image: &ImageRef,
) -> Result<RolloutReport, DeployError> {
    let namespace = target.namespace.as_str();
    let deployment = target.deployment.as_str();

    let ns = cluster.namespace(namespace).await?;
    tracing::info!(namespace = %ns.name, phase = ?ns.phase, "found namespace");

    let service_found = match target.service.as_deref() {
        Some(service) => {
            let found = cluster.service_exists(namespace, service).await?;
            if !found {
                tracing::warn!("service {} not found in namespace {}", service, namespace);
            }
            Some(found)
        }
        None => None,
    };

    let repository = image.repository();
    let updated: Vec<ContainerImage> = cluster
        .deployment_containers(namespace, deployment)
        .await?
        .into_iter()
        .filter(|c| {
            ImageRef::parse(&c.image)
                .map(|current| current.repository() == repository)
                .unwrap_or(false)
        })
        .map(|c| ContainerImage {
            container: c.container,
            image: image.to_string(),
        })
        .collect();

    if updated.is_empty() {
        return Err(DeployError::NoMatchingContainer {
            deployment: deployment.to_string(),
            repository,
        });
    }

    cluster.set_images(namespace, deployment, &updated).await?;
    tracing::info!(
        deployment = %deployment,
        containers = updated.len(),
        "rolled deployment to {}",
        image
    );

    Ok(RolloutReport {
        namespace: ns,
        service_found,
        updated,
    })
}
