// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The three verification checks.
//!
//! Each check prints its own diagnostics as it goes and returns only pass/fail.
//! Errors never escape a check; they become a printed failure.

pub mod applicationset;
pub mod gitops;
pub mod reachability;

pub use applicationset::check_applicationset;
pub use gitops::check_gitops_operator;
pub use reachability::check_cluster_reachable;

use crate::constants::CHECKS_TOTAL;
use crate::report::Reporter;
use kube::Client;

/// Tally of a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationSummary {
    pub passed: usize,
    pub total: usize,
}

impl VerificationSummary {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Run every check in order, regardless of earlier failures
pub async fn run_checks(
    client: &Client,
    reporter: &dyn Reporter,
    applicationset_name: &str,
) -> VerificationSummary {
    let mut passed = 0;

    if check_cluster_reachable(client, reporter).await {
        passed += 1;
    }
    reporter.blank();

    if check_gitops_operator(client, reporter).await {
        passed += 1;
    }
    reporter.blank();

    if check_applicationset(client, reporter, applicationset_name).await {
        passed += 1;
    }
    reporter.blank();

    VerificationSummary {
        passed,
        total: CHECKS_TOTAL,
    }
}

pub(crate) fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(e) if e.code == 404)
}
