//! Credential lookup injected into the relay.

use secrecy::{ExposeSecret, Secret, SecretString};
use std::env;

/// Supplies the upstream credential at request time.
///
/// `None` means the deployment is misconfigured; the relay refuses every
/// request until a credential is present.
pub trait CredentialSource: Send + Sync {
    fn credential(&self) -> Option<SecretString>;
}

/// Reads the credential from an environment variable on every call, so a
/// rotated key is picked up without a restart.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl CredentialSource for EnvCredential {
    fn credential(&self) -> Option<SecretString> {
        non_blank(env::var(&self.var).ok()?)
    }
}

/// Fixed credential, or none at all.
pub struct StaticCredential(Option<SecretString>);

impl StaticCredential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(non_blank(value.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredential {
    fn credential(&self) -> Option<SecretString> {
        self.0
            .as_ref()
            .map(|secret| Secret::new(secret.expose_secret().clone()))
    }
}

fn non_blank(value: String) -> Option<SecretString> {
    if value.trim().is_empty() {
        None
    } else {
        Some(Secret::new(value))
    }
}
