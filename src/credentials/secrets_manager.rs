// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! AWS Secrets Manager lookup by secret ARN

use crate::constants::SECRETS_MANAGER_ARN_PREFIX;
use crate::error::{Result, VerifyError};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use tracing::{info, instrument};

/// A store that returns the string payload of a secret
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn secret_string(&self, secret_id: &str, region: &str) -> Result<String>;
}

/// Secrets Manager using the ambient AWS credential chain
pub struct SecretsManagerStore;

#[async_trait]
impl SecretStore for SecretsManagerStore {
    #[instrument(skip(self))]
    async fn secret_string(&self, secret_id: &str, region: &str) -> Result<String> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        let client = aws_sdk_secretsmanager::Client::new(&config);

        let response = client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| VerifyError::SecretStore(DisplayErrorContext(&e).to_string()))?;

        info!("Retrieved secret value");
        response
            .secret_string()
            .map(str::to_string)
            .ok_or_else(|| VerifyError::SecretStore("secret has no string value".to_string()))
    }
}

/// Region of a Secrets Manager ARN.
///
/// Format: `arn:aws:secretsmanager:<region>:<account-id>:secret:<name>`; the region is
/// the fourth colon-delimited field.
pub fn secret_region(arn: &str) -> Result<&str> {
    if !arn.starts_with(SECRETS_MANAGER_ARN_PREFIX) {
        return Err(VerifyError::InvalidSecretArn(arn.to_string()));
    }

    match arn.split(':').nth(3) {
        Some(region) if !region.is_empty() => Ok(region),
        _ => Err(VerifyError::MissingArnRegion(arn.to_string())),
    }
}
