// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Terraform output names read during verification
pub mod outputs {
    pub const API_URL: &str = "api_url";
    pub const CLUSTER_ID: &str = "cluster_id";
    pub const CLUSTER_NAME: &str = "cluster_name";
    pub const ADMIN_PASSWORD_SECRET_ARN: &str = "admin_password_secret_arn";
}

/// Environment variables consulted for the admin password, highest priority first
pub mod env {
    pub const PASSWORD_OVERRIDE: &str = "TF_VAR_admin_password_override";
    pub const PASSWORD: &str = "ADMIN_PASSWORD";
}

/// OpenShift GitOps operator layout
pub mod gitops {
    pub const NAMESPACE: &str = "openshift-gitops";
    /// Deployments whose lower-cased name contains this belong to the operator
    pub const DEPLOYMENT_MARKER: &str = "gitops";
}

/// Argo CD custom resources
pub mod argocd {
    pub const DEFAULT_APPLICATIONSET_NAME: &str = "cluster-config-applicationset";
    /// Condition type whose healthy status is "False"
    pub const ERROR_OCCURRED: &str = "ErrorOccurred";
    /// Number of managed Applications printed after a successful ApplicationSet check
    pub const MAX_LISTED_APPLICATIONS: usize = 5;
}

/// Subprocess timeouts
pub mod timeouts {
    pub const TERRAFORM_OUTPUT_SECS: u64 = 30;
    pub const LOGIN_SECS: u64 = 60;
}

pub const ADMIN_USERNAME: &str = "admin";
pub const TERRAFORM_DIR_NAME: &str = "terraform";
pub const SECRETS_MANAGER_ARN_PREFIX: &str = "arn:aws:secretsmanager:";
pub const CHECKS_TOTAL: usize = 3;
pub const SEPARATOR_WIDTH: usize = 60;
