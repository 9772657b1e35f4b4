// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to load kubeconfig: {0}")]
    KubeconfigError(String),

    #[error("{tool} not found. {hint}")]
    ToolNotFound { tool: String, hint: &'static str },

    #[error("{command} timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to run {command}: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid secret ARN format: {0}")]
    InvalidSecretArn(String),

    #[error("Could not extract region from secret ARN: {0}")]
    MissingArnRegion(String),

    #[error("Failed to retrieve password from Secrets Manager: {0}")]
    SecretStore(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Terraform directory not found: {}", .0.display())]
    MissingTerraformDir(PathBuf),

    #[error("Could not get {0} from Terraform outputs. Is the cluster deployed?")]
    MissingOutput(&'static str),

    #[error("Could not retrieve admin password")]
    MissingCredential,
}

impl VerifyError {
    /// Whether this wraps an API error with the given HTTP status code
    pub fn is_api_status(&self, code: u16) -> bool {
        matches!(self, VerifyError::KubeError(kube::Error::Api(err)) if err.code == code)
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;
