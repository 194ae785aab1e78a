//! Common test utilities for all integration tests.
//!
//! Provides a mock Vault server speaking the token and KV v2 HTTP APIs.

#![allow(dead_code)]

use gradeloop_secrets::ClientConfig;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "hvs.integration-token";

fn envelope(data: Value) -> Value {
    json!({
        "request_id": "5a1f2b3c-0000-4c2f-8f7d-7c0f0c1f2a11",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": data,
        "wrap_info": null,
        "warnings": null,
        "auth": null
    })
}

fn lookup_self_body() -> Value {
    envelope(json!({
        "accessor": "2c5a9b1e-4f6d-4b8a-9f3e-1d2c3b4a5e6f",
        "creation_time": 1700000000,
        "creation_ttl": 2764800,
        "display_name": "token-assignment",
        "entity_id": "",
        "expire_time": "2030-01-01T00:00:00Z",
        "explicit_max_ttl": 0,
        "id": TOKEN,
        "identity_policies": [],
        "issue_time": "2024-01-01T00:00:00Z",
        "meta": {"service": "assignment"},
        "num_uses": 0,
        "orphan": true,
        "path": "auth/token/create",
        "policies": ["default"],
        "renewable": true,
        "ttl": 2764790,
        "type": "service"
    }))
}

/// Mock Vault that accepts [`TOKEN`].
pub struct MockVault {
    pub server: MockServer,
}

impl MockVault {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/auth/token/lookup-self"))
            .and(header("X-Vault-Token", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(lookup_self_body()))
            .mount(&server)
            .await;
        Self { server }
    }

    /// Serve `secrets` at `secret/data/{secret_path}`, expecting `reads` requests.
    pub async fn mount_secret(&self, secret_path: &str, secrets: Value, reads: u64) {
        let body = envelope(json!({
            "data": secrets,
            "metadata": {
                "created_time": "2024-03-22T02:24:06.945319214Z",
                "custom_metadata": null,
                "deletion_time": "",
                "destroyed": false,
                "version": 1
            }
        }));

        Mock::given(method("GET"))
            .and(path(format!("/v1/secret/data/{}", secret_path)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(reads)
            .mount(&self.server)
            .await;
    }

    /// Respond 404 at `secret/data/{secret_path}`.
    pub async fn mount_missing(&self, secret_path: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/v1/secret/data/{}", secret_path)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": []})))
            .mount(&self.server)
            .await;
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            address: self.server.uri(),
            token: TOKEN.into(),
            timeout_seconds: 5,
            ..Default::default()
        }
    }
}
