// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod checks;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod infra;
pub mod kubernetes;
pub mod process;
pub mod report;
pub mod types;
pub mod verifier;

#[cfg(test)]
pub mod test_utils;
