// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::argocd::DEFAULT_APPLICATIONSET_NAME;
use crate::constants::TERRAFORM_DIR_NAME;
use crate::error::{Result, VerifyError};
use crate::kubernetes::TlsFallback;
use crate::report::OutputFormat;
use clap::Parser;
use std::env;
use std::path::PathBuf;

/// Verify ROSA HCP cluster deployment, GitOps operator, and ApplicationSet
#[derive(Parser, Debug)]
#[command(name = "cluster-verify", version, about, long_about = None)]
pub struct Cli {
    /// Name of the cluster to verify (display only)
    pub cluster_name: String,

    /// Expected ApplicationSet name, matched as a case-insensitive substring
    #[arg(long, default_value = DEFAULT_APPLICATIONSET_NAME)]
    pub applicationset_name: String,

    /// Skip oc login (assumes already logged in)
    #[arg(long)]
    pub skip_login: bool,

    /// Project root containing the terraform/ directory
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,

    /// Terraform directory, overriding <project-root>/terraform
    #[arg(long)]
    pub terraform_dir: Option<PathBuf>,

    /// Kubeconfig written by login and read by the checks [default: $KUBECONFIG or ~/.kube/config]
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Output format [default: colored on a terminal, plain otherwise]
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// When to retry a failed login with TLS verification disabled
    #[arg(long, value_enum, default_value_t = TlsFallback::TlsErrors)]
    pub tls_fallback: TlsFallback,
}

/// Resolved settings for one verification run
#[derive(Debug, Clone)]
pub struct Config {
    pub cluster_name: String,
    pub applicationset_name: String,
    pub skip_login: bool,
    pub terraform_dir: PathBuf,
    pub kubeconfig: PathBuf,
    pub output: OutputFormat,
    pub tls_fallback: TlsFallback,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let terraform_dir = cli
            .terraform_dir
            .unwrap_or_else(|| cli.project_root.join(TERRAFORM_DIR_NAME));
        let kubeconfig = match cli.kubeconfig {
            Some(path) => path,
            None => default_kubeconfig_path()?,
        };

        Ok(Config {
            cluster_name: cli.cluster_name,
            applicationset_name: cli.applicationset_name,
            skip_login: cli.skip_login,
            terraform_dir,
            kubeconfig,
            output: cli.output.unwrap_or_else(OutputFormat::detect),
            tls_fallback: cli.tls_fallback,
        })
    }
}

/// First entry of `$KUBECONFIG`, falling back to `~/.kube/config`
pub fn default_kubeconfig_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os("KUBECONFIG")
        .and_then(|value| env::split_paths(&value).find(|p| !p.as_os_str().is_empty()))
    {
        return Ok(path);
    }

    dirs::home_dir()
        .map(|home| home.join(".kube").join("config"))
        .ok_or_else(|| {
            VerifyError::KubeconfigError("could not determine home directory".to_string())
        })
}
