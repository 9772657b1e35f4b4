// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ApplicationSet presence and health

use super::is_not_found;
use crate::constants::argocd::{ERROR_OCCURRED, MAX_LISTED_APPLICATIONS};
use crate::constants::gitops::NAMESPACE;
use crate::error::{Result, VerifyError};
use crate::report::Reporter;
use crate::types::argocd::{Application, ApplicationSet};
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::{debug, instrument};

/// First ApplicationSet whose name contains `expected_name`, ignoring case.
///
/// Candidates are considered in the order the API server returned them, so when
/// several names match, the earliest listed wins.
pub fn find_applicationset<'a>(
    items: &'a [ApplicationSet],
    expected_name: &str,
) -> Option<&'a ApplicationSet> {
    let expected = expected_name.to_lowercase();
    items
        .iter()
        .find(|appset| appset.name_any().to_lowercase().contains(&expected))
}

/// Check the expected ApplicationSet exists, then report its conditions and managed Applications
#[instrument(skip(client, reporter))]
pub async fn check_applicationset(
    client: &Client,
    reporter: &dyn Reporter,
    expected_name: &str,
) -> bool {
    reporter.info(&format!("Checking ApplicationSet '{}'...", expected_name));

    match applicationset_present(client, reporter, expected_name).await {
        Ok(found) => found,
        Err(e) => {
            reporter.error(&format!("Failed to check ApplicationSet: {}", e));
            if e.is_api_status(403) {
                reporter.error(
                    "Permission denied. Ensure you have access to ApplicationSet resources.",
                );
            }
            false
        }
    }
}

async fn applicationset_present(
    client: &Client,
    reporter: &dyn Reporter,
    expected_name: &str,
) -> Result<bool> {
    let appsets: Api<ApplicationSet> = Api::namespaced(client.clone(), NAMESPACE);
    let items = match appsets.list(&ListParams::default()).await {
        Ok(list) => list.items,
        Err(e) if is_not_found(&e) => {
            reporter.error("ApplicationSet CRD not found. GitOps may not be fully installed.");
            return Ok(false);
        }
        Err(e) => return Err(VerifyError::from(e)),
    };

    if items.is_empty() {
        reporter.error(&format!(
            "No ApplicationSets found in namespace '{}'",
            NAMESPACE
        ));
        return Ok(false);
    }

    let Some(appset) = find_applicationset(&items, expected_name) else {
        let names: Vec<String> = items.iter().map(|a| a.name_any()).collect();
        reporter.warning(&format!("ApplicationSet '{}' not found", expected_name));
        reporter.info(&format!("Found ApplicationSets: {:?}", names));
        return Ok(false);
    };

    reporter.success(&format!("ApplicationSet '{}' found", appset.name_any()));
    report_conditions(appset, reporter);
    report_managed_applications(client, reporter).await;

    Ok(true)
}

fn report_conditions(appset: &ApplicationSet, reporter: &dyn Reporter) {
    for condition in appset.conditions() {
        let kind = &condition.condition_type;
        if condition.is_healthy() {
            reporter.success(&format!("  Condition '{}': {}", kind, condition.message()));
        } else if kind == ERROR_OCCURRED {
            reporter.error(&format!("  Condition '{}': {}", kind, condition.message()));
        } else {
            reporter.warning(&format!(
                "  Condition '{}': {} - {}",
                kind,
                condition.status,
                condition.message()
            ));
        }
    }
}

/// Best effort; a failure here never affects the check outcome
async fn report_managed_applications(client: &Client, reporter: &dyn Reporter) {
    let applications: Api<Application> = Api::namespaced(client.clone(), NAMESPACE);
    let items = match applications.list(&ListParams::default()).await {
        Ok(list) => list.items,
        Err(e) => {
            debug!("Skipping Application listing: {}", e);
            return;
        }
    };

    if items.is_empty() {
        return;
    }

    reporter.info(&format!(
        "Found {} Application(s) managed by ApplicationSet",
        items.len()
    ));
    for app in items.iter().take(MAX_LISTED_APPLICATIONS) {
        reporter.info(&format!(
            "  - {}: sync={}, health={}",
            app.name_any(),
            app.sync_status(),
            app.health_status()
        ));
    }
}
