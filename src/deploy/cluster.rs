// ABOUTME: Cluster operations trait and its kube-backed implementation.
// ABOUTME: Namespace and deployment lookups plus container image patches.

use super::error::DeployError;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{Namespace, Service};
use kube::Api;
use kube::Client;
use kube::api::{Patch, PatchParams};

/// Namespace as reported by the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSummary {
    pub name: String,
    pub phase: Option<String>,
}

/// A container name and the image it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImage {
    pub container: String,
    pub image: String,
}

/// Cluster operations the rollout needs.
#[async_trait]
pub trait ClusterOps: Send + Sync {
    /// Fetch a namespace.
    async fn namespace(&self, name: &str) -> Result<NamespaceSummary, DeployError>;

    /// Containers of a deployment's pod template.
    async fn deployment_containers(
        &self,
        namespace: &str,
        deployment: &str,
    ) -> Result<Vec<ContainerImage>, DeployError>;

    /// Whether a service exists in the namespace.
    async fn service_exists(&self, namespace: &str, service: &str) -> Result<bool, DeployError>;

    /// Point the named containers of a deployment at new images.
    async fn set_images(
        &self,
        namespace: &str,
        deployment: &str,
        images: &[ContainerImage],
    ) -> Result<(), DeployError>;
}

/// Cluster access through the Kubernetes API using the default kubeconfig
/// or in-cluster service account.
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the inferred configuration.
    pub async fn connect() -> Result<Self, DeployError> {
        let client = Client::try_default()
            .await
            .map_err(|e| DeployError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl ClusterOps for KubeCluster {
    async fn namespace(&self, name: &str) -> Result<NamespaceSummary, DeployError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let ns = api
            .get(name)
            .await
            .map_err(|e| DeployError::NamespaceNotFound(name.to_string(), e.to_string()))?;

        Ok(NamespaceSummary {
            name: ns.metadata.name.unwrap_or_else(|| name.to_string()),
            phase: ns.status.and_then(|s| s.phase),
        })
    }

    async fn deployment_containers(
        &self,
        namespace: &str,
        deployment: &str,
    ) -> Result<Vec<ContainerImage>, DeployError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let found = api.get(deployment).await.map_err(|e| {
            DeployError::DeploymentNotFound(deployment.to_string(), e.to_string())
        })?;

        let containers = found
            .spec
            .and_then(|spec| spec.template.spec)
            .map(|pod| pod.containers)
            .unwrap_or_default();

        Ok(containers
            .into_iter()
            .map(|c| ContainerImage {
                container: c.name,
                image: c.image.unwrap_or_default(),
            })
            .collect())
    }

    async fn service_exists(&self, namespace: &str, service: &str) -> Result<bool, DeployError> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(service).await?.is_some())
    }

    async fn set_images(
        &self,
        namespace: &str,
        deployment: &str,
        images: &[ContainerImage],
    ) -> Result<(), DeployError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);

        // Strategic merge keys containers by name, leaving the rest untouched
        let containers: Vec<serde_json::Value> = images
            .iter()
            .map(|c| serde_json::json!({ "name": c.container, "image": c.image }))
            .collect();
        let patch = serde_json::json!({
            "spec": { "template": { "spec": { "containers": containers } } }
        });

        api.patch(deployment, &PatchParams::default(), &Patch::Strategic(&patch))
            .await?;
        Ok(())
    }
}
