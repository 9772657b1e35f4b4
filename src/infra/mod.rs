// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Infrastructure outputs describing the deployed cluster.

pub mod terraform;

pub use terraform::TerraformOutputs;

use crate::error::{Result, VerifyError};
use crate::report::Reporter;
use async_trait::async_trait;

/// Read-only access to named outputs of an applied infrastructure plan
#[async_trait]
pub trait OutputSource: Send + Sync {
    /// Fetch a single output. `Ok(None)` means the output is unset.
    async fn output(&self, name: &str) -> Result<Option<String>>;
}

/// Where to reach the cluster, as recorded by the infrastructure plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEndpoint {
    pub api_url: String,
    pub cluster_id: Option<String>,
    pub cluster_name: Option<String>,
}

/// Fetch an output, reporting failures instead of returning them.
///
/// A failed command is a warning since the caller decides whether the output is
/// critical; timeouts and missing tooling are errors.
pub async fn read_output(
    source: &dyn OutputSource,
    name: &str,
    reporter: &dyn Reporter,
) -> Option<String> {
    match source.output(name).await {
        Ok(value) => value,
        Err(e @ VerifyError::CommandFailed { .. }) => {
            reporter.warning(&e.to_string());
            None
        }
        Err(e) => {
            reporter.error(&e.to_string());
            None
        }
    }
}

/// Treat empty output and the literal `null` as unset
pub fn normalize_output(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() || value == "null" {
        None
    } else {
        Some(value.to_string())
    }
}
