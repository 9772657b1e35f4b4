// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation from a session kubeconfig

use super::Session;
use crate::error::{Result, VerifyError};
use async_trait::async_trait;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Client;
use tracing::{debug, instrument};

/// Turns an authenticated session into an API client
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn build(&self, session: &Session) -> Result<Client>;
}

/// Builds clients from the session's kubeconfig file
pub struct KubeconfigClientFactory;

#[async_trait]
impl ClientFactory for KubeconfigClientFactory {
    async fn build(&self, session: &Session) -> Result<Client> {
        build_client(session).await
    }
}

/// Create a Kubernetes client for the current context of the session's kubeconfig
#[instrument(fields(kubeconfig = %session.kubeconfig().display()))]
pub async fn build_client(session: &Session) -> Result<Client> {
    let path = session.kubeconfig();
    if !path.exists() {
        return Err(VerifyError::KubeconfigError(format!(
            "Kubeconfig not found at {}. Run 'oc login' first.",
            path.display()
        )));
    }

    let kubeconfig = tokio::fs::read_to_string(path).await.map_err(|e| {
        VerifyError::KubeconfigError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    create_client_from_kubeconfig(&kubeconfig).await
}

/// Create a Kubernetes client from a kubeconfig string
async fn create_client_from_kubeconfig(kubeconfig: &str) -> Result<Client> {
    let kubeconfig_parsed: Kubeconfig = serde_yaml::from_str(kubeconfig)
        .map_err(|e| VerifyError::KubeconfigError(format!("Failed to parse kubeconfig: {}", e)))?;

    debug!(
        "Using kubeconfig context {:?}",
        kubeconfig_parsed.current_context
    );

    let client_config =
        kube::Config::from_custom_kubeconfig(kubeconfig_parsed, &KubeConfigOptions::default())
            .await
            .map_err(|e| {
                VerifyError::KubeconfigError(format!("Failed to create config: {}", e))
            })?;

    Client::try_from(client_config)
        .map_err(|e| VerifyError::KubeconfigError(format!("Failed to create client: {}", e)))
}
