// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles: a mock Kubernetes API, a recording reporter, and in-memory collaborators.

use crate::credentials::{Credential, Environment, SecretStore};
use crate::error::{Result as VerifyResult, VerifyError};
use crate::infra::OutputSource;
use crate::kubernetes::{ClientFactory, ClusterLogin, Session};
use crate::report::{Level, Reporter};
use async_trait::async_trait;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

pub const GITOPS_NAMESPACE_PATH: &str = "/api/v1/namespaces/openshift-gitops";
pub const DEPLOYMENTS_PATH: &str = "/apis/apps/v1/namespaces/openshift-gitops/deployments";
pub const APPLICATIONSETS_PATH: &str =
    "/apis/argoproj.io/v1alpha1/namespaces/openshift-gitops/applicationsets";
pub const APPLICATIONS_PATH: &str =
    "/apis/argoproj.io/v1alpha1/namespaces/openshift-gitops/applications";

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Longest registered prefix that ends on a path segment boundary
        responses
            .iter()
            .filter(|((m, p), _)| {
                m == method
                    && path
                        .strip_prefix(p.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|((_, p), _)| p.len())
            .map(|(_, resp)| resp.clone())
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Captures reported lines for assertions
#[derive(Clone, Default)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, level: Level, fragment: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(l, message)| *l == level && message.contains(fragment))
    }

    pub fn has_level(&self, level: Level) -> bool {
        self.lines.lock().unwrap().iter().any(|(l, _)| *l == level)
    }
}

impl Reporter for RecordingReporter {
    fn line(&self, level: Level, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

/// Fixed infrastructure outputs; unknown names are unset
#[derive(Default)]
pub struct StaticOutputs {
    values: HashMap<String, String>,
    failures: Mutex<HashMap<String, VerifyError>>,
}

impl StaticOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    /// Fail the first read of `name` with `error`
    pub fn fail_with(self, name: &str, error: VerifyError) -> Self {
        self.failures.lock().unwrap().insert(name.to_string(), error);
        self
    }
}

#[async_trait]
impl OutputSource for StaticOutputs {
    async fn output(&self, name: &str) -> VerifyResult<Option<String>> {
        if let Some(error) = self.failures.lock().unwrap().remove(name) {
            return Err(error);
        }
        Ok(self.values.get(name).cloned())
    }
}

/// Environment backed by a map
#[derive(Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Secret store that records `(secret_id, region)` lookups
#[derive(Clone)]
pub struct StaticSecretStore {
    result: std::result::Result<String, String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl StaticSecretStore {
    pub fn returning(secret: &str) -> Self {
        Self {
            result: Ok(secret.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn secret_string(&self, secret_id: &str, region: &str) -> VerifyResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((secret_id.to_string(), region.to_string()));
        self.result.clone().map_err(VerifyError::SecretStore)
    }
}

/// Login that records `(api_url, username, password)` and either succeeds or fails
#[derive(Clone)]
pub struct RecordingLogin {
    session: Option<Session>,
    calls: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl RecordingLogin {
    pub fn succeeding(session: Session) -> Self {
        Self {
            session: Some(session),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            session: None,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClusterLogin for RecordingLogin {
    async fn login(
        &self,
        api_url: &str,
        username: &str,
        password: &Credential,
    ) -> VerifyResult<Session> {
        self.calls.lock().unwrap().push((
            api_url.to_string(),
            username.to_string(),
            password.expose().to_string(),
        ));
        self.session
            .clone()
            .ok_or_else(|| VerifyError::LoginFailed("Login failed (401 Unauthorized)".to_string()))
    }
}

/// Client factory handing out clients of a mock service, or failing
#[derive(Clone)]
pub struct MockClientFactory {
    service: Option<MockService>,
    sessions: Arc<Mutex<Vec<Session>>>,
}

impl MockClientFactory {
    pub fn new(service: MockService) -> Self {
        Self {
            service: Some(service),
            sessions: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            service: None,
            sessions: Arc::default(),
        }
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientFactory for MockClientFactory {
    async fn build(&self, session: &Session) -> VerifyResult<Client> {
        self.sessions.lock().unwrap().push(session.clone());
        match &self.service {
            Some(service) => Ok(service.clone().into_client()),
            None => Err(VerifyError::KubeconfigError(format!(
                "Kubeconfig not found at {}. Run 'oc login' first.",
                session.kubeconfig().display()
            ))),
        }
    }
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a 403 forbidden response
pub fn forbidden_json(user: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("resource is forbidden: User \"{}\" cannot list resource", user),
        "reason": "Forbidden",
        "code": 403
    })
    .to_string()
}

/// Core v1 resource discovery response
pub fn api_resource_list_json() -> String {
    serde_json::json!({
        "kind": "APIResourceList",
        "apiVersion": "v1",
        "groupVersion": "v1",
        "resources": [{
            "name": "namespaces",
            "singularName": "namespace",
            "namespaced": false,
            "kind": "Namespace",
            "verbs": ["get", "list"]
        }]
    })
    .to_string()
}

/// Wrap items in a list response
pub fn list_json(api_version: &str, kind: &str, items: Vec<serde_json::Value>) -> String {
    serde_json::json!({
        "apiVersion": api_version,
        "kind": kind,
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

pub fn deployment_json(name: &str, desired: Option<i32>, ready: Option<i32>) -> serde_json::Value {
    let mut spec = serde_json::json!({
        "selector": { "matchLabels": { "app": name } },
        "template": { "metadata": { "labels": { "app": name } } }
    });
    if let Some(replicas) = desired {
        spec["replicas"] = replicas.into();
    }
    let mut status = serde_json::json!({});
    if let Some(replicas) = ready {
        status["readyReplicas"] = replicas.into();
    }

    serde_json::json!({
        "apiVersion": "apps/v1",
        "kind": "Deployment",
        "metadata": { "name": name, "namespace": "openshift-gitops" },
        "spec": spec,
        "status": status
    })
}

pub fn condition_json(condition_type: &str, status: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "type": condition_type,
        "status": status,
        "message": message,
        "reason": "ApplicationSetUpToDate"
    })
}

pub fn applicationset_json(name: &str, conditions: Vec<serde_json::Value>) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "ApplicationSet",
        "metadata": { "name": name, "namespace": "openshift-gitops" },
        "spec": { "generators": [{ "list": { "elements": [] } }] },
        "status": { "conditions": conditions }
    })
}

pub fn application_json(name: &str, sync: Option<&str>, health: Option<&str>) -> serde_json::Value {
    let mut status = serde_json::json!({});
    if let Some(sync) = sync {
        status["sync"] = serde_json::json!({ "status": sync });
    }
    if let Some(health) = health {
        status["health"] = serde_json::json!({ "status": health });
    }

    serde_json::json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "Application",
        "metadata": { "name": name, "namespace": "openshift-gitops" },
        "spec": { "project": "default" },
        "status": status
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_response_prefers_exact_then_longest_prefix() {
        let mock = MockService::new()
            .on_get("/api/v1", 200, "core")
            .on_get("/api/v1/namespaces", 200, "namespaces");

        assert_eq!(mock.find_response("GET", "/api/v1").unwrap().1, "core");
        assert_eq!(
            mock.find_response("GET", "/api/v1/namespaces/foo").unwrap().1,
            "namespaces"
        );
    }

    #[test]
    fn test_find_response_respects_segment_boundary() {
        let mock = MockService::new().on_get(APPLICATIONS_PATH, 200, "apps");

        assert!(mock.find_response("GET", APPLICATIONSETS_PATH).is_none());
        assert!(mock.find_response("POST", APPLICATIONS_PATH).is_none());
    }
}
