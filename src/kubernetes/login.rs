// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `oc login` with an optional insecure-TLS retry

use super::Session;
use crate::constants::timeouts::LOGIN_SECS;
use crate::credentials::Credential;
use crate::error::{Result, VerifyError};
use crate::process::{self, stderr_of, Tool};
use async_trait::async_trait;
use clap::ValueEnum;
use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;
use tracing::{info, instrument, warn};

const OC_HINT: &str = "Please install OpenShift CLI";

/// Lower-cased stderr fragments that mark a certificate verification failure
const TLS_ERROR_MARKERS: &[&str] = &[
    "x509",
    "certificate",
    "unknown authority",
    "tls: failed to verify",
    "insecure-skip-tls-verify",
];

/// When a failed strict login is retried with `--insecure-skip-tls-verify=true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TlsFallback {
    /// Retry after any failure of the strict attempt
    Always,
    /// Retry only when the strict attempt failed certificate verification
    #[default]
    TlsErrors,
    /// Never retry insecurely
    Never,
}

impl TlsFallback {
    pub fn should_retry(self, strict_stderr: &str) -> bool {
        match self {
            TlsFallback::Always => true,
            TlsFallback::TlsErrors => is_tls_verification_error(strict_stderr),
            TlsFallback::Never => false,
        }
    }
}

/// Whether login CLI output describes a TLS certificate verification failure
pub fn is_tls_verification_error(stderr: &str) -> bool {
    let stderr = stderr.to_lowercase();
    TLS_ERROR_MARKERS.iter().any(|marker| stderr.contains(marker))
}

/// Authenticates against the cluster API and yields a session
#[async_trait]
pub trait ClusterLogin: Send + Sync {
    async fn login(&self, api_url: &str, username: &str, password: &Credential) -> Result<Session>;
}

/// Logs in with the OpenShift CLI, writing the session to a dedicated kubeconfig
#[derive(Debug, Clone)]
pub struct OcLogin {
    tool: Tool,
    kubeconfig: PathBuf,
    timeout: Duration,
    tls_fallback: TlsFallback,
}

impl OcLogin {
    pub fn new(kubeconfig: impl Into<PathBuf>, tls_fallback: TlsFallback) -> Self {
        Self {
            tool: Tool::new("oc", OC_HINT),
            kubeconfig: kubeconfig.into(),
            timeout: Duration::from_secs(LOGIN_SECS),
            tls_fallback,
        }
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn attempt(
        &self,
        api_url: &str,
        username: &str,
        password: &Credential,
        insecure: bool,
    ) -> Result<Output> {
        let tls_flag = format!("--insecure-skip-tls-verify={}", insecure);
        let kubeconfig = self.kubeconfig.to_string_lossy();
        let args = [
            "login",
            api_url,
            "--username",
            username,
            "--password",
            password.expose(),
            tls_flag.as_str(),
            "--kubeconfig",
            &*kubeconfig,
        ];

        process::run(&self.tool, &args, None, self.timeout, "oc login").await
    }
}

#[async_trait]
impl ClusterLogin for OcLogin {
    #[instrument(skip(self, password), fields(kubeconfig = %self.kubeconfig.display()))]
    async fn login(&self, api_url: &str, username: &str, password: &Credential) -> Result<Session> {
        if let Some(parent) = self.kubeconfig.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| VerifyError::Io {
                    command: format!("create {}", parent.display()),
                    source: e,
                })?;
        }

        let strict = self.attempt(api_url, username, password, false).await?;
        let output = if strict.status.success() {
            strict
        } else if self.tls_fallback.should_retry(&stderr_of(&strict)) {
            warn!(
                "Strict TLS login failed, retrying with certificate verification disabled: {}",
                stderr_of(&strict)
            );
            self.attempt(api_url, username, password, true).await?
        } else {
            strict
        };

        if output.status.success() {
            info!("oc login succeeded");
            Ok(Session::new(self.kubeconfig.clone()))
        } else {
            Err(VerifyError::LoginFailed(stderr_of(&output)))
        }
    }
}
