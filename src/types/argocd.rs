// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::argocd::ERROR_OCCURRED;
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// Only the fields the verifier reads; everything else in the Argo CD schema is ignored.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "argoproj.io", version = "v1alpha1", kind = "ApplicationSet")]
#[kube(namespaced)]
#[kube(status = "ApplicationSetStatus")]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSetSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generators: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSetStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<ApplicationSetCondition>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSetCondition {
    #[serde(rename = "type", default)]
    pub condition_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApplicationSetCondition {
    /// `ErrorOccurred` is healthy when "False"; every other condition when "True"
    pub fn is_healthy(&self) -> bool {
        if self.condition_type == ERROR_OCCURRED {
            self.status == "False"
        } else {
            self.status == "True"
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

impl ApplicationSet {
    pub fn conditions(&self) -> &[ApplicationSetCondition] {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_deref())
            .unwrap_or_default()
    }
}

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "argoproj.io", version = "v1alpha1", kind = "Application")]
#[kube(namespaced)]
#[kube(status = "ApplicationStatus")]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<StatusField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<StatusField>,
}

/// The `{ "status": "..." }` shape shared by sync and health
#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

const UNKNOWN: &str = "Unknown";

impl Application {
    pub fn sync_status(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.sync.as_ref())
            .and_then(|s| s.status.as_deref())
            .unwrap_or(UNKNOWN)
    }

    pub fn health_status(&self) -> &str {
        self.status
            .as_ref()
            .and_then(|s| s.health.as_ref())
            .and_then(|s| s.status.as_deref())
            .unwrap_or(UNKNOWN)
    }
}
