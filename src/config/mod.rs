// ABOUTME: Run configuration assembled once from the process environment.
// ABOUTME: Holds registry credentials, the deployment target, and the deploy flag.

mod credentials;
mod deployment;

pub use credentials::RegistryCredentials;
pub use deployment::{DeploymentTarget, RolloutTarget};

use crate::error::{Error, Result};
use std::path::Path;

pub const ENV_USERNAME: &str = "DOCKER_USERNAME";
pub const ENV_EMAIL: &str = "DOCKER_EMAIL";
pub const ENV_PASSWORD: &str = "DOCKER_PASSWORD";
pub const ENV_REGISTRY: &str = "DOCKER_PRIVATE_REGISTRY";
pub const ENV_NAMESPACE: &str = "K8S_NAMESPACE";
pub const ENV_DEPLOYMENT: &str = "K8S_DEPLOYMENT";
pub const ENV_SERVICE: &str = "K8S_SERVICE";
pub const ENV_DEPLOY: &str = "DOCKUTIL_DEPLOY";

pub const ENV_FILENAME: &str = ".env";

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: RegistryCredentials,
    pub deployment: DeploymentTarget,
    pub deploy_enabled: bool,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let registry =
            get(ENV_REGISTRY).ok_or_else(|| Error::MissingEnvVar(ENV_REGISTRY.to_string()))?;

        let credentials = RegistryCredentials {
            username: get(ENV_USERNAME),
            email: get(ENV_EMAIL),
            password: get(ENV_PASSWORD),
            registry,
        };

        let deployment = DeploymentTarget {
            namespace: get(ENV_NAMESPACE),
            deployment: get(ENV_DEPLOYMENT),
            service: get(ENV_SERVICE),
        };

        let deploy_enabled = match get(ENV_DEPLOY) {
            Some(value) => parse_flag(&value)?,
            None => false,
        };

        Ok(Self {
            credentials,
            deployment,
            deploy_enabled,
        })
    }

    /// Registry host every image reference is rooted at.
    pub fn registry(&self) -> &str {
        &self.credentials.registry
    }

    /// Enable the deployment step regardless of the environment.
    pub fn with_deploy(mut self, enabled: bool) -> Self {
        self.deploy_enabled |= enabled;
        self
    }
}

/// Load `.env` from `dir` into the process environment, if present.
///
/// Variables already set in the environment win over the file.
pub fn load_env_file(dir: &Path) -> Result<()> {
    match dotenvy::from_path(dir.join(ENV_FILENAME)) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(Error::EnvFile(e)),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::InvalidConfig(format!(
            "{ENV_DEPLOY} must be a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (ENV_USERNAME, "ci"),
            (ENV_EMAIL, "ci@example.com"),
            (ENV_PASSWORD, "hunter2"),
            (ENV_REGISTRY, "reg.example.com"),
            (ENV_NAMESPACE, "prod"),
            (ENV_DEPLOYMENT, "svc"),
            (ENV_SERVICE, "svc-http"),
        ]))
        .unwrap();

        assert_eq!(config.registry(), "reg.example.com");
        assert_eq!(config.credentials.username.as_deref(), Some("ci"));
        assert_eq!(config.credentials.email.as_deref(), Some("ci@example.com"));
        assert_eq!(config.deployment.namespace.as_deref(), Some("prod"));
        assert_eq!(config.deployment.service.as_deref(), Some("svc-http"));
        assert!(!config.deploy_enabled);
    }

    #[test]
    fn missing_registry_is_an_error() {
        let err = Config::from_lookup(lookup(&[(ENV_USERNAME, "ci")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(ref var) if var == ENV_REGISTRY));
    }

    #[test]
    fn empty_registry_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[(ENV_REGISTRY, "")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnvVar(_)));
    }

    #[test]
    fn credentials_are_optional() {
        let config = Config::from_lookup(lookup(&[(ENV_REGISTRY, "reg.example.com")])).unwrap();
        assert!(config.credentials.username.is_none());
        assert!(config.credentials.password.is_none());
    }

    #[test]
    fn deploy_flag_parsing() {
        let on = Config::from_lookup(lookup(&[(ENV_REGISTRY, "r"), (ENV_DEPLOY, "TRUE")])).unwrap();
        assert!(on.deploy_enabled);

        let off = Config::from_lookup(lookup(&[(ENV_REGISTRY, "r"), (ENV_DEPLOY, "0")])).unwrap();
        assert!(!off.deploy_enabled);

        let err = Config::from_lookup(lookup(&[(ENV_REGISTRY, "r"), (ENV_DEPLOY, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn with_deploy_only_turns_the_flag_on() {
        let config = Config::from_lookup(lookup(&[(ENV_REGISTRY, "r"), (ENV_DEPLOY, "yes")]))
            .unwrap()
            .with_deploy(false);
        assert!(config.deploy_enabled);
    }
}
