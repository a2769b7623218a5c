//! In-memory store.
//!
//! Behaves like a fresh KV v2 server: versions accumulate per path, policies
//! overwrite by name, every token is new. Used for `--dry-run` and as the
//! test double for the sync engine, so it records every call and can be told
//! to fail specific operations.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use tracing::trace;

use super::{MountKind, SecretStore, StoreResult};
use crate::core::domain::{IssuedToken, Policy, SecretDocument, TokenRequest};
use crate::error::StoreError;

/// A call made against a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    IsReady,
    MountExists(String),
    EnableMount(String),
    WritePolicy(String),
    CreateToken(String),
    PutSecret(String),
    GetSecret(String),
}

#[derive(Default)]
struct State {
    mounts: BTreeMap<String, MountKind>,
    policies: BTreeMap<String, String>,
    tokens: Vec<TokenRequest>,
    secrets: BTreeMap<String, Vec<SecretDocument>>,
    calls: Vec<Call>,
    put_failures: BTreeMap<String, StoreError>,
    get_failures: BTreeMap<String, StoreError>,
    tampered: BTreeMap<String, SecretDocument>,
    policy_failure: Option<StoreError>,
    token_failure: Option<StoreError>,
}

/// In-process secret store.
pub struct MemoryStore {
    /// Remaining `is_ready` probes that answer false; `None` means never ready
    unready_probes: Cell<Option<u32>>,
    state: RefCell<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// A ready store with nothing mounted.
    pub fn new() -> Self {
        Self {
            unready_probes: Cell::new(Some(0)),
            state: RefCell::new(State::default()),
        }
    }

    /// Pre-mount a KV v2 engine at `mount`.
    pub fn with_mount(self, mount: &str) -> Self {
        self.state
            .borrow_mut()
            .mounts
            .insert(mount.to_string(), MountKind::KvV2);
        self
    }

    /// Answer `false` to every readiness probe.
    pub fn never_ready(self) -> Self {
        self.unready_probes.set(None);
        self
    }

    /// Answer `false` to the first `probes` readiness probes.
    pub fn ready_after(self, probes: u32) -> Self {
        self.unready_probes.set(Some(probes));
        self
    }

    /// Fail writes to section `key` with `error`.
    pub fn fail_put(self, key: &str, error: StoreError) -> Self {
        self.state
            .borrow_mut()
            .put_failures
            .insert(key.to_string(), error);
        self
    }

    /// Fail reads of section `key` with `error`.
    pub fn fail_get(self, key: &str, error: StoreError) -> Self {
        self.state
            .borrow_mut()
            .get_failures
            .insert(key.to_string(), error);
        self
    }

    /// Serve `document` on reads of `key` regardless of what was written.
    pub fn tamper(self, key: &str, document: SecretDocument) -> Self {
        self.state
            .borrow_mut()
            .tampered
            .insert(key.to_string(), document);
        self
    }

    /// Fail every policy write with `error`.
    pub fn fail_policies(self, error: StoreError) -> Self {
        self.state.borrow_mut().policy_failure = Some(error);
        self
    }

    /// Fail every token creation with `error`.
    pub fn fail_tokens(self, error: StoreError) -> Self {
        self.state.borrow_mut().token_failure = Some(error);
        self
    }

    /// Calls made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.borrow().calls.iter().filter(|c| pred(c)).count()
    }

    /// Every version written to `mount/key`, oldest first.
    pub fn versions(&self, mount: &str, key: &str) -> Vec<SecretDocument> {
        self.state
            .borrow()
            .secrets
            .get(&path(mount, key))
            .cloned()
            .unwrap_or_default()
    }

    /// Policy document by name.
    pub fn policy(&self, name: &str) -> Option<String> {
        self.state.borrow().policies.get(name).cloned()
    }

    /// Token requests served so far.
    pub fn tokens(&self) -> Vec<TokenRequest> {
        self.state.borrow().tokens.clone()
    }

    pub fn has_mount(&self, mount: &str) -> bool {
        self.state.borrow().mounts.contains_key(mount)
    }

    fn record(&self, call: Call) {
        trace!(?call, "memory store call");
        self.state.borrow_mut().calls.push(call);
    }
}

fn path(mount: &str, key: &str) -> String {
    format!("{}/data/{}", mount, key)
}

fn no_route(operation: &'static str, path: String) -> StoreError {
    StoreError::OperationFailed {
        message: format!("no handler for route \"{}\"", path),
        operation,
        path,
        status: 404,
    }
}

impl SecretStore for MemoryStore {
    fn is_ready(&self) -> bool {
        self.record(Call::IsReady);
        match self.unready_probes.get() {
            None => false,
            Some(0) => true,
            Some(n) => {
                self.unready_probes.set(Some(n - 1));
                false
            }
        }
    }

    fn mount_exists(&self, mount: &str) -> bool {
        self.record(Call::MountExists(mount.to_string()));
        self.has_mount(mount)
    }

    fn enable_mount(&self, mount: &str, kind: MountKind) -> StoreResult<()> {
        self.record(Call::EnableMount(mount.to_string()));
        let mut state = self.state.borrow_mut();
        if state.mounts.contains_key(mount) {
            return Err(StoreError::OperationFailed {
                operation: "enable mount",
                path: format!("sys/mounts/{}", mount),
                status: 400,
                message: format!("path is already in use at {}/", mount),
            });
        }
        state.mounts.insert(mount.to_string(), kind);
        Ok(())
    }

    fn write_policy(&self, policy: &Policy) -> StoreResult<()> {
        self.record(Call::WritePolicy(policy.name.clone()));
        let mut state = self.state.borrow_mut();
        if let Some(err) = &state.policy_failure {
            return Err(err.clone());
        }
        state.policies.insert(policy.name.clone(), policy.to_hcl());
        Ok(())
    }

    fn create_token(&self, request: &TokenRequest) -> StoreResult<IssuedToken> {
        self.record(Call::CreateToken(request.policy.clone()));
        let mut state = self.state.borrow_mut();
        if let Some(err) = &state.token_failure {
            return Err(err.clone());
        }
        state.tokens.push(request.clone());
        let value = format!("mem.{}.{}", request.policy, state.tokens.len());
        Ok(IssuedToken::new(request, value))
    }

    fn put_secret(
        &self,
        mount: &str,
        key: &str,
        document: &SecretDocument,
    ) -> StoreResult<Option<u64>> {
        self.record(Call::PutSecret(key.to_string()));
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.put_failures.get(key) {
            return Err(err.clone());
        }
        if !state.mounts.contains_key(mount) {
            return Err(no_route("write secret", path(mount, key)));
        }
        let versions = state.secrets.entry(path(mount, key)).or_default();
        versions.push(document.clone());
        Ok(Some(versions.len() as u64))
    }

    fn get_secret(&self, mount: &str, key: &str) -> StoreResult<Option<SecretDocument>> {
        self.record(Call::GetSecret(key.to_string()));
        let state = self.state.borrow();
        if let Some(err) = state.get_failures.get(key) {
            return Err(err.clone());
        }
        if !state.mounts.contains_key(mount) {
            return Err(no_route("read secret", path(mount, key)));
        }
        if let Some(doc) = state.tampered.get(key) {
            return Ok(Some(doc.clone()));
        }
        Ok(state
            .secrets
            .get(&path(mount, key))
            .and_then(|versions| versions.last().cloned()))
    }
}
