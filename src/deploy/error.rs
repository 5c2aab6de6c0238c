// ABOUTME: Error types for the deployment step.
// ABOUTME: Covers cluster connection and API failures, and unmatched containers.

/// Errors that can occur while rolling a deployment.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Could not build a cluster client.
    #[error("cluster connection failed: {0}")]
    ConnectionFailed(String),

    /// Namespace lookup failed.
    #[error("namespace {0} not found: {1}")]
    NamespaceNotFound(String, String),

    /// Deployment lookup failed.
    #[error("deployment {0} not found: {1}")]
    DeploymentNotFound(String, String),

    /// No container in the deployment runs the image's repository.
    #[error("no container in deployment {deployment} runs {repository}")]
    NoMatchingContainer {
        deployment: String,
        repository: String,
    },

    /// Any other API failure.
    #[error("cluster API error: {0}")]
    Api(String),
}

impl From<kube::Error> for DeployError {
    fn from(err: kube::Error) -> Self {
        DeployError::Api(err.to_string())
    }
}
