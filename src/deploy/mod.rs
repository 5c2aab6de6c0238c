// ABOUTME: Optional rollout of the pushed image to a Kubernetes deployment.
// ABOUTME: Cluster access sits behind ClusterOps; KubeCluster talks to the API server.

mod cluster;
mod error;
mod rollout;

pub use cluster::{ClusterOps, ContainerImage, KubeCluster, NamespaceSummary};
pub use error::DeployError;
pub use rollout::{RolloutReport, rollout};
