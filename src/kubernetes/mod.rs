// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Cluster login through the OpenShift CLI and client construction from the resulting kubeconfig.

pub mod client;
pub mod login;

pub use client::{build_client, ClientFactory, KubeconfigClientFactory};
pub use login::{ClusterLogin, OcLogin, TlsFallback};

use std::path::{Path, PathBuf};

/// An authenticated session: the kubeconfig written by a login.
///
/// Passed from the login step to the client factory so neither side relies on
/// an implicit well-known path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    kubeconfig: PathBuf,
}

impl Session {
    pub fn new(kubeconfig: impl Into<PathBuf>) -> Self {
        Self {
            kubeconfig: kubeconfig.into(),
        }
    }

    pub fn kubeconfig(&self) -> &Path {
        &self.kubeconfig
    }
}
