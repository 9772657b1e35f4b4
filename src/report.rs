// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! User-facing progress output.
//!
//! Every diagnostic the verifier prints goes through a [`Reporter`], so the same run
//! can render colored terminal output, plain CI logs, or one JSON object per line.

use crate::constants::SEPARATOR_WIDTH;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::IsTerminal;

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn symbol(self) -> &'static str {
        match self {
            Level::Info => "ℹ",
            Level::Success => "✓",
            Level::Warning => "⚠",
            Level::Error => "✗",
        }
    }
}

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Colored,
    Plain,
    Json,
}

impl OutputFormat {
    /// Colored on an interactive terminal unless NO_COLOR is set, plain otherwise
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if std::io::stdout().is_terminal() && !no_color {
            OutputFormat::Colored
        } else {
            OutputFormat::Plain
        }
    }
}

/// Presentation strategy for verification progress
pub trait Reporter: Send + Sync {
    fn line(&self, level: Level, message: &str);

    /// Visual break between sections
    fn blank(&self) {}

    /// Rule printed before the final summary
    fn separator(&self) {}

    fn info(&self, message: &str) {
        self.line(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.line(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.line(Level::Warning, message);
    }

    fn error(&self, message: &str) {
        self.line(Level::Error, message);
    }
}

/// Build the reporter for a format
pub fn reporter_for(format: OutputFormat) -> Box<dyn Reporter> {
    match format {
        OutputFormat::Colored => Box::new(ColoredReporter),
        OutputFormat::Plain => Box::new(PlainReporter),
        OutputFormat::Json => Box::new(JsonReporter),
    }
}

/// ANSI-colored lines with a status symbol
pub struct ColoredReporter;

impl Reporter for ColoredReporter {
    fn line(&self, level: Level, message: &str) {
        let text = format!("{} {}", level.symbol(), message);
        let styled = match level {
            Level::Info => text.blue(),
            Level::Success => text.green(),
            Level::Warning => text.yellow().bold(),
            Level::Error => text.red(),
        };
        println!("{}", styled);
    }

    fn blank(&self) {
        println!();
    }

    fn separator(&self) {
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
    }
}

/// Symbol-prefixed lines without escape sequences
pub struct PlainReporter;

impl PlainReporter {
    pub fn format(level: Level, message: &str) -> String {
        format!("{} {}", level.symbol(), message)
    }
}

impl Reporter for PlainReporter {
    fn line(&self, level: Level, message: &str) {
        println!("{}", Self::format(level, message));
    }

    fn blank(&self) {
        println!();
    }

    fn separator(&self) {
        println!("{}", "=".repeat(SEPARATOR_WIDTH));
    }
}

/// One JSON object per line; blanks and separators are dropped
pub struct JsonReporter;

#[derive(Serialize)]
struct JsonLine<'a> {
    level: Level,
    message: &'a str,
}

impl JsonReporter {
    pub fn format(level: Level, message: &str) -> String {
        // Serializing a flat struct of a unit enum and a str cannot fail
        serde_json::to_string(&JsonLine { level, message }).unwrap_or_default()
    }
}

impl Reporter for JsonReporter {
    fn line(&self, level: Level, message: &str) {
        println!("{}", Self::format(level, message));
    }
}
