// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GitOps operator deployment readiness

use super::is_not_found;
use crate::constants::gitops::{DEPLOYMENT_MARKER, NAMESPACE};
use crate::error::Result;
use crate::report::Reporter;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Namespace;
use kube::{api::ListParams, Api, Client, ResourceExt};
use std::fmt;
use tracing::{debug, instrument};

/// Ready versus desired replicas of a deployment; missing counts are zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    pub ready: i32,
    pub desired: i32,
}

impl Readiness {
    pub fn of(deployment: &Deployment) -> Self {
        Self {
            ready: deployment
                .status
                .as_ref()
                .and_then(|s| s.ready_replicas)
                .unwrap_or(0),
            desired: deployment
                .spec
                .as_ref()
                .and_then(|s| s.replicas)
                .unwrap_or(0),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready >= self.desired
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} replicas", self.ready, self.desired)
    }
}

/// Whether a deployment belongs to the GitOps operator, by name
pub fn is_operator_deployment(name: &str) -> bool {
    name.to_lowercase().contains(DEPLOYMENT_MARKER)
}

/// Check the GitOps namespace exists and every operator deployment is ready
#[instrument(skip_all)]
pub async fn check_gitops_operator(client: &Client, reporter: &dyn Reporter) -> bool {
    reporter.info("Checking GitOps operator deployment...");

    match gitops_operator_ready(client, reporter).await {
        Ok(ready) => ready,
        Err(e) => {
            reporter.error(&format!("Failed to check GitOps operator: {}", e));
            false
        }
    }
}

async fn gitops_operator_ready(client: &Client, reporter: &dyn Reporter) -> Result<bool> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    match namespaces.get(NAMESPACE).await {
        Ok(_) => debug!("Namespace {} exists", NAMESPACE),
        Err(e) if is_not_found(&e) => {
            reporter.error(&format!("Namespace '{}' not found", NAMESPACE));
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    }

    let deployments: Api<Deployment> = Api::namespaced(client.clone(), NAMESPACE);
    let operator_deployments: Vec<Deployment> = deployments
        .list(&ListParams::default())
        .await?
        .items
        .into_iter()
        .filter(|d| is_operator_deployment(&d.name_any()))
        .collect();

    if operator_deployments.is_empty() {
        reporter.error(&format!(
            "No GitOps deployments found in namespace '{}'",
            NAMESPACE
        ));
        return Ok(false);
    }

    // Every deployment is reported, even after the first unready one
    let mut all_ready = true;
    for deployment in &operator_deployments {
        let name = deployment.name_any();
        let readiness = Readiness::of(deployment);
        if readiness.is_ready() {
            reporter.success(&format!("Deployment '{}' is ready ({})", name, readiness));
        } else {
            reporter.warning(&format!("Deployment '{}' not ready ({})", name, readiness));
            all_ready = false;
        }
    }

    if !all_ready {
        reporter.warning("Some GitOps deployments are not ready yet");
        return Ok(false);
    }

    reporter.success("GitOps operator is deployed and ready");
    Ok(true)
}
