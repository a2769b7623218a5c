//! Vault HTTP API store.
//!
//! Talks to `/v1/...` endpoints with the `X-Vault-Token` header. Request and
//! response bodies are never logged.

use reqwest::blocking::{Client, Response};
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{MountKind, SecretStore, StoreResult};
use crate::core::constants;
use crate::core::domain::{IssuedToken, Policy, SecretDocument, TokenRequest};
use crate::error::StoreError;

/// Store backed by a running Vault server.
pub struct HttpStore {
    http: Client,
    addr: String,
    token: Zeroizing<String>,
}

impl HttpStore {
    /// Create a client for `addr` authenticated with `token`.
    ///
    /// No request is made until the first call.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unreachable` if the HTTP client cannot be built.
    pub fn new(addr: &str, token: &str) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(constants::REQUEST_TIMEOUT)
            .user_agent(concat!("thothix-vault/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StoreError::Unreachable {
                operation: "client setup",
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            addr: addr.trim_end_matches('/').to_string(),
            token: Zeroizing::new(token.to_string()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.addr, path)
    }

    fn send(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> StoreResult<Response> {
        debug!(operation, %method, path, "vault request");

        let mut req = self
            .http
            .request(method, self.url(path))
            .header("X-Vault-Token", self.token.as_str());
        if let Some(body) = body {
            req = req.json(body);
        }

        req.send().map_err(|e| StoreError::Unreachable {
            operation,
            reason: e.to_string(),
        })
    }

    /// Send a request and decode the JSON body of a successful response.
    ///
    /// Empty and 204 responses decode to `Value::Null`.
    fn call(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> StoreResult<Value> {
        let resp = self.send(operation, method, path, body)?;
        let status = resp.status();
        debug!(operation, path, status = status.as_u16(), "vault response");

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let text = resp.text().map_err(|e| StoreError::Unreachable {
            operation,
            reason: format!("failed to read response body: {}", e),
        })?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Auth {
                operation,
                path: path.to_string(),
            });
        }

        if !status.is_success() {
            return Err(StoreError::OperationFailed {
                operation,
                path: path.to_string(),
                status: status.as_u16(),
                message: error_message(&text, status),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| StoreError::Decode {
            operation,
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

impl SecretStore for HttpStore {
    fn is_ready(&self) -> bool {
        match self.send("health check", Method::GET, "sys/health", None) {
            // 429 is an unsealed standby node
            Ok(resp) => {
                let status = resp.status();
                let ready = status.is_success() || status == StatusCode::TOO_MANY_REQUESTS;
                if !ready {
                    debug!(status = status.as_u16(), "vault not ready");
                }
                ready
            }
            Err(e) => {
                debug!(error = %e, "vault not reachable");
                false
            }
        }
    }

    fn mount_exists(&self, mount: &str) -> bool {
        match self.call("list mounts", Method::GET, "sys/mounts", None) {
            Ok(body) => mounts_contain(&body, mount),
            Err(e) => {
                warn!(error = %e, "cannot list mounts");
                false
            }
        }
    }

    fn enable_mount(&self, mount: &str, kind: MountKind) -> StoreResult<()> {
        let mut body = json!({ "type": kind.engine_type() });
        if let Some(version) = kind.version() {
            body["options"] = json!({ "version": version });
        }
        self.call(
            "enable mount",
            Method::POST,
            &format!("sys/mounts/{}", mount),
            Some(&body),
        )?;
        Ok(())
    }

    fn write_policy(&self, policy: &Policy) -> StoreResult<()> {
        let body = json!({ "policy": policy.to_hcl() });
        self.call(
            "write policy",
            Method::PUT,
            &format!("sys/policies/acl/{}", policy.name),
            Some(&body),
        )?;
        Ok(())
    }

    fn create_token(&self, request: &TokenRequest) -> StoreResult<IssuedToken> {
        let path = "auth/token/create";
        let body = json!({
            "policies": [request.policy],
            "ttl": request.ttl_string(),
            "renewable": request.renewable,
            "display_name": request.display_name,
        });
        let resp = self.call("create token", Method::POST, path, Some(&body))?;

        let value = resp
            .pointer("/auth/client_token")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Decode {
                operation: "create token",
                path: path.to_string(),
                reason: "response has no auth.client_token".to_string(),
            })?;

        Ok(IssuedToken::new(request, value.to_string()))
    }

    fn put_secret(
        &self,
        mount: &str,
        key: &str,
        document: &SecretDocument,
    ) -> StoreResult<Option<u64>> {
        let body = json!({ "data": document });
        let resp = self.call(
            "write secret",
            Method::POST,
            &data_path(mount, key),
            Some(&body),
        )?;
        Ok(resp.pointer("/data/version").and_then(Value::as_u64))
    }

    fn get_secret(&self, mount: &str, key: &str) -> StoreResult<Option<SecretDocument>> {
        let path = data_path(mount, key);
        let resp = match self.call("read secret", Method::GET, &path, None) {
            Ok(resp) => resp,
            Err(StoreError::OperationFailed { status: 404, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        match resp.pointer("/data/data") {
            // A soft-deleted version reads back as `data: null`.
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), field_to_string(v)))
                    .collect(),
            )),
            Some(_) => Err(StoreError::Decode {
                operation: "read secret",
                path,
                reason: "data.data is not an object".to_string(),
            }),
        }
    }
}

fn data_path(mount: &str, key: &str) -> String {
    format!("{}/data/{}", mount, key)
}

/// Mount listings key entries as `"<path>/"`, at the top level on older
/// servers and under `data` on newer ones.
fn mounts_contain(body: &Value, mount: &str) -> bool {
    let entry = format!("{}/", mount);
    body.get(&entry).is_some()
        || body
            .get("data")
            .and_then(|d| d.get(&entry))
            .is_some()
}

/// Stored fields written by other tools may not be strings.
fn field_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Join Vault's `errors` array, falling back to the status line.
fn error_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("errors").and_then(Value::as_array).map(|errs| {
                errs.iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
        .filter(|msg| !msg.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
