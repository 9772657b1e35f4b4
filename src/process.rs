// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Bounded subprocess execution for the external CLIs (terraform, oc)

use crate::error::{Result, VerifyError};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument};

/// An external executable plus the hint printed when it is missing
#[derive(Debug, Clone)]
pub struct Tool {
    pub program: PathBuf,
    pub prefix_args: Vec<String>,
    pub hint: &'static str,
}

impl Tool {
    pub fn new(program: impl Into<PathBuf>, hint: &'static str) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
            hint,
        }
    }

    /// Arguments inserted before every invocation, e.g. a script for an interpreter
    pub fn with_prefix_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefix_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}

/// Run `tool` with `args` and wait at most `timeout` for it to exit.
///
/// A non-zero exit is not an error here; callers inspect `Output::status`.
/// The child is killed when the timeout elapses. `label` names the command in
/// errors and must not contain secrets.
#[instrument(skip(tool, args, cwd), fields(tool = %tool.name()))]
pub async fn run(
    tool: &Tool,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
    label: &str,
) -> Result<Output> {
    let mut command = Command::new(&tool.program);
    command
        .args(&tool.prefix_args)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(VerifyError::ToolNotFound {
                tool: tool.name(),
                hint: tool.hint,
            })
        }
        Ok(Err(e)) => {
            return Err(VerifyError::Io {
                command: label.to_string(),
                source: e,
            })
        }
        Err(_) => {
            return Err(VerifyError::Timeout {
                command: label.to_string(),
                seconds: timeout.as_secs(),
            })
        }
    };

    debug!("{} exited with {}", label, output.status);
    Ok(output)
}

/// Lossy, trimmed stderr of a finished process
pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}
