// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admin password resolution: environment overrides first, then AWS Secrets Manager.

pub mod secrets_manager;

pub use secrets_manager::{secret_region, SecretStore, SecretsManagerStore};

use crate::constants::env;
use crate::constants::outputs::ADMIN_PASSWORD_SECRET_ARN;
use crate::infra::{read_output, OutputSource};
use crate::report::Reporter;
use std::fmt;
use tracing::{debug, instrument};

/// An opaque secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Process environment lookups
pub trait Environment: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Password from the override variable, falling back to the generic one.
/// Empty values count as unset.
pub fn password_from_env(environment: &dyn Environment) -> Option<Credential> {
    [env::PASSWORD_OVERRIDE, env::PASSWORD]
        .into_iter()
        .filter_map(|key| environment.var(key))
        .find(|value| !value.is_empty())
        .map(Credential::new)
}

/// Resolve the admin password, reporting every failure.
///
/// The secret store is only consulted when neither environment variable is set.
#[instrument(skip_all)]
pub async fn resolve_admin_password(
    environment: &dyn Environment,
    source: &dyn OutputSource,
    store: &dyn SecretStore,
    reporter: &dyn Reporter,
) -> Option<Credential> {
    if let Some(password) = password_from_env(environment) {
        reporter.info("Using admin password from environment variable");
        return Some(password);
    }

    let Some(secret_arn) = read_output(source, ADMIN_PASSWORD_SECRET_ARN, reporter).await else {
        reporter.error(&format!(
            "{} not found in Terraform outputs",
            ADMIN_PASSWORD_SECRET_ARN
        ));
        return None;
    };

    let region = match secret_region(&secret_arn) {
        Ok(region) => region,
        Err(e) => {
            reporter.error(&e.to_string());
            return None;
        }
    };

    debug!("Fetching admin password from Secrets Manager in {}", region);
    match store.secret_string(&secret_arn, region).await {
        Ok(password) => {
            reporter.success("Retrieved admin password from AWS Secrets Manager");
            Some(Credential::new(password))
        }
        Err(e) => {
            reporter.error(&e.to_string());
            None
        }
    }
}
