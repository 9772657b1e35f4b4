// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! `terraform output` backed output source

use super::{normalize_output, OutputSource};
use crate::constants::timeouts::TERRAFORM_OUTPUT_SECS;
use crate::error::{Result, VerifyError};
use crate::process::{self, stderr_of, Tool};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};

const TERRAFORM_HINT: &str = "Please install Terraform";

/// Reads outputs with `terraform output -raw <name>` inside the Terraform directory
#[derive(Debug, Clone)]
pub struct TerraformOutputs {
    tool: Tool,
    dir: PathBuf,
    timeout: Duration,
}

impl TerraformOutputs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            tool: Tool::new("terraform", TERRAFORM_HINT),
            dir: dir.into(),
            timeout: Duration::from_secs(TERRAFORM_OUTPUT_SECS),
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
}

#[async_trait]
impl OutputSource for TerraformOutputs {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    async fn output(&self, name: &str) -> Result<Option<String>> {
        let label = format!("terraform output '{}'", name);
        let output = process::run(
            &self.tool,
            &["output", "-raw", name],
            Some(&self.dir),
            self.timeout,
            &label,
        )
        .await?;

        if !output.status.success() {
            return Err(VerifyError::CommandFailed {
                command: label,
                stderr: stderr_of(&output),
            });
        }

        let value = normalize_output(&String::from_utf8_lossy(&output.stdout));
        debug!("Terraform output {} present: {}", name, value.is_some());
        Ok(value)
    }
}
