// ABOUTME: Registry credentials taken verbatim from the environment.
// ABOUTME: Converts to the runtime's auth type and keeps the password out of Debug output.

use crate::runtime::RegistryAuth;
use std::fmt;

#[derive(Clone)]
pub struct RegistryCredentials {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub registry: String,
}

impl RegistryCredentials {
    /// Auth payload for a push to the private registry.
    pub fn to_auth(&self) -> RegistryAuth {
        RegistryAuth {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            server: Some(format!("https://{}", self.registry)),
        }
    }
}

impl fmt::Debug for RegistryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("registry", &self.registry)
            .finish()
    }
}
