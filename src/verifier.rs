// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Drives a verification run: outputs, credentials, login, client, checks, summary.

use crate::checks::{run_checks, VerificationSummary};
use crate::config::Config;
use crate::constants::outputs::{API_URL, CLUSTER_ID, CLUSTER_NAME};
use crate::constants::ADMIN_USERNAME;
use crate::credentials::{
    resolve_admin_password, Environment, ProcessEnv, SecretStore, SecretsManagerStore,
};
use crate::error::{Result, VerifyError};
use crate::infra::{read_output, ClusterEndpoint, OutputSource, TerraformOutputs};
use crate::kubernetes::{ClientFactory, ClusterLogin, KubeconfigClientFactory, OcLogin, Session};
use crate::report::{reporter_for, Reporter};
use tracing::{info, instrument};

/// One verification run and its collaborators
pub struct Verifier {
    config: Config,
    reporter: Box<dyn Reporter>,
    outputs: Box<dyn OutputSource>,
    environment: Box<dyn Environment>,
    secrets: Box<dyn SecretStore>,
    login: Box<dyn ClusterLogin>,
    clients: Box<dyn ClientFactory>,
}

impl Verifier {
    /// A verifier wired to terraform, the process environment, Secrets Manager and `oc`
    pub fn new(config: Config) -> Self {
        Self {
            reporter: reporter_for(config.output),
            outputs: Box::new(TerraformOutputs::new(&config.terraform_dir)),
            environment: Box::new(ProcessEnv),
            secrets: Box::new(SecretsManagerStore),
            login: Box::new(OcLogin::new(&config.kubeconfig, config.tls_fallback)),
            clients: Box::new(KubeconfigClientFactory),
            config,
        }
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn with_outputs(mut self, outputs: impl OutputSource + 'static) -> Self {
        self.outputs = Box::new(outputs);
        self
    }

    pub fn with_environment(mut self, environment: impl Environment + 'static) -> Self {
        self.environment = Box::new(environment);
        self
    }

    pub fn with_secret_store(mut self, secrets: impl SecretStore + 'static) -> Self {
        self.secrets = Box::new(secrets);
        self
    }

    pub fn with_login(mut self, login: impl ClusterLogin + 'static) -> Self {
        self.login = Box::new(login);
        self
    }

    pub fn with_client_factory(mut self, clients: impl ClientFactory + 'static) -> Self {
        self.clients = Box::new(clients);
        self
    }

    /// Run and map the outcome to a process exit code
    pub async fn execute(&self) -> u8 {
        match self.run().await {
            Ok(summary) => summary.exit_code(),
            Err(e) => {
                info!("Verification aborted: {}", e);
                1
            }
        }
    }

    /// Run every step. An `Err` is a failed precondition, already reported; no
    /// check ran.
    #[instrument(skip(self), fields(cluster = %self.config.cluster_name))]
    pub async fn run(&self) -> Result<VerificationSummary> {
        let reporter = self.reporter.as_ref();

        reporter.info(&format!("Verifying cluster: {}", self.config.cluster_name));
        reporter.blank();

        if !self.config.terraform_dir.is_dir() {
            return Err(self.fatal(VerifyError::MissingTerraformDir(
                self.config.terraform_dir.clone(),
            )));
        }

        let endpoint = self.read_endpoint().await?;

        let session = if self.config.skip_login {
            reporter.info("Skipping login (assuming already logged in)");
            Session::new(&self.config.kubeconfig)
        } else {
            let session = self.authenticate(&endpoint).await?;
            reporter.blank();
            session
        };

        let client = match self.clients.build(&session).await {
            Ok(client) => client,
            Err(e) => {
                reporter.error(&e.to_string());
                reporter.error("Failed to get Kubernetes client");
                return Err(e);
            }
        };
        reporter.blank();

        let summary = run_checks(&client, reporter, &self.config.applicationset_name).await;

        reporter.separator();
        if summary.all_passed() {
            reporter.success(&format!(
                "All checks passed ({}/{})",
                summary.passed, summary.total
            ));
        } else {
            reporter.error(&format!(
                "Some checks failed ({}/{} passed)",
                summary.passed, summary.total
            ));
        }

        Ok(summary)
    }

    async fn read_endpoint(&self) -> Result<ClusterEndpoint> {
        let reporter = self.reporter.as_ref();
        let outputs = self.outputs.as_ref();

        reporter.info("Reading Terraform outputs...");
        let api_url = read_output(outputs, API_URL, reporter).await;
        let cluster_id = read_output(outputs, CLUSTER_ID, reporter).await;
        let cluster_name = read_output(outputs, CLUSTER_NAME, reporter).await;

        let Some(api_url) = api_url else {
            return Err(self.fatal(VerifyError::MissingOutput(API_URL)));
        };

        reporter.success(&format!("Cluster API URL: {}", api_url));
        if let Some(id) = &cluster_id {
            reporter.success(&format!("Cluster ID: {}", id));
        }
        if let Some(name) = &cluster_name {
            reporter.success(&format!("Cluster Name: {}", name));
        }
        reporter.blank();

        Ok(ClusterEndpoint {
            api_url,
            cluster_id,
            cluster_name,
        })
    }

    async fn authenticate(&self, endpoint: &ClusterEndpoint) -> Result<Session> {
        let reporter = self.reporter.as_ref();

        let Some(password) = resolve_admin_password(
            self.environment.as_ref(),
            self.outputs.as_ref(),
            self.secrets.as_ref(),
            reporter,
        )
        .await
        else {
            return Err(self.fatal(VerifyError::MissingCredential));
        };

        reporter.info(&format!("Logging into cluster at {}...", endpoint.api_url));
        match self
            .login
            .login(&endpoint.api_url, ADMIN_USERNAME, &password)
            .await
        {
            Ok(session) => {
                reporter.success("Successfully logged into cluster");
                Ok(session)
            }
            Err(e) => {
                reporter.error(&e.to_string());
                reporter.error("Failed to login to cluster");
                Err(e)
            }
        }
    }

    fn fatal(&self, error: VerifyError) -> VerifyError {
        self.reporter.error(&error.to_string());
        error
    }
}
