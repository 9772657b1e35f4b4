// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cluster_verify::config::{Cli, Config};
use cluster_verify::verifier::Verifier;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // Diagnostics go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    let config = Config::from_cli(Cli::parse())?;
    debug!("Configuration loaded: {:?}", config);

    let verifier = Verifier::new(config);
    Ok(ExitCode::from(verifier.execute().await))
}
