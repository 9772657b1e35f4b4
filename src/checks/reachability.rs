// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::report::Reporter;
use kube::Client;
use tracing::instrument;

/// Check the API server answers a core resource discovery request
#[instrument(skip_all)]
pub async fn check_cluster_reachable(client: &Client, reporter: &dyn Reporter) -> bool {
    reporter.info("Checking cluster accessibility...");

    match client.list_core_api_resources("v1").await {
        Ok(_) => {
            reporter.success("Cluster is accessible");
            true
        }
        Err(e) => {
            reporter.error(&format!("Cluster not accessible: {}", e));
            false
        }
    }
}
