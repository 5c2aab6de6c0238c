// ABOUTME: Kubernetes deployment target read from the environment.
// ABOUTME: Only validated when the deployment step is enabled.

use crate::error::{Error, Result};

use super::{ENV_DEPLOYMENT, ENV_NAMESPACE};

/// Deployment names as found in the environment, possibly incomplete.
#[derive(Debug, Clone, Default)]
pub struct DeploymentTarget {
    pub namespace: Option<String>,
    pub deployment: Option<String>,
    pub service: Option<String>,
}

/// A deployment target with both required names present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutTarget {
    pub namespace: String,
    pub deployment: String,
    pub service: Option<String>,
}

impl DeploymentTarget {
    /// Check that namespace and deployment are set.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnvVar` naming the first unset variable.
    pub fn require(&self) -> Result<RolloutTarget> {
        let namespace = self
            .namespace
            .clone()
            .ok_or_else(|| Error::MissingEnvVar(ENV_NAMESPACE.to_string()))?;
        let deployment = self
            .deployment
            .clone()
            .ok_or_else(|| Error::MissingEnvVar(ENV_DEPLOYMENT.to_string()))?;
        Ok(RolloutTarget {
            namespace,
            deployment,
            service: self.service.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_first_missing_variable() {
        let target = DeploymentTarget {
            namespace: Some("prod".to_string()),
            ..Default::default()
        };
        let err = target.require().unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(ref var) if var == ENV_DEPLOYMENT));

        let err = DeploymentTarget::default().require().unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(ref var) if var == ENV_NAMESPACE));
    }

    #[test]
    fn require_carries_the_optional_service() {
        let target = DeploymentTarget {
            namespace: Some("prod".to_string()),
            deployment: Some("svc".to_string()),
            service: Some("svc-http".to_string()),
        };
        assert_eq!(
            target.require().unwrap(),
            RolloutTarget {
                namespace: "prod".to_string(),
                deployment: "svc".to_string(),
                service: Some("svc-http".to_string()),
            }
        );
    }
}
