//! First-run setup of the secret store.
//!
//! Ensures the KV v2 mount exists, writes the app and readonly policies, and
//! mints one token for each. The sequence is not transactional: a failure
//! stops the remaining steps and leaves earlier ones in place. Re-running is
//! safe for the mount and policies; tokens are minted fresh every time.

use tracing::{info, warn};

use crate::core::constants;
use crate::core::domain::{
    BootstrapTokens, Capability, IssuedToken, Policy, Rule, TokenRequest,
};
use crate::core::store::{MountKind, SecretStore};
use crate::error::BootstrapError;

/// Name of the application policy for `mount`.
pub fn app_policy_name(mount: &str) -> String {
    format!("{}-app", mount)
}

/// Name of the readonly policy for `mount`.
pub fn readonly_policy_name(mount: &str) -> String {
    format!("{}-readonly", mount)
}

/// Read access to every secret under `mount`, plus token self-service.
pub fn app_policy(mount: &str) -> Policy {
    Policy::new(
        app_policy_name(mount),
        vec![
            Rule::new(format!("{}/data/*", mount), &[Capability::Read])
                .with_comment("Read-only access to application secrets"),
            Rule::new("auth/token/renew-self", &[Capability::Update])
                .with_comment("Allow token renewal"),
            Rule::new("auth/token/lookup-self", &[Capability::Read])
                .with_comment("Allow token lookup"),
        ],
    )
}

/// Read access to every secret under `mount`.
pub fn readonly_policy(mount: &str) -> Policy {
    Policy::new(
        readonly_policy_name(mount),
        vec![Rule::new(format!("{}/data/*", mount), &[Capability::Read])
            .with_comment("Read-only access for monitoring/debugging")],
    )
}

/// Token parameters for the app policy.
pub fn app_token_request(mount: &str, environment: &str) -> TokenRequest {
    TokenRequest {
        policy: app_policy_name(mount),
        ttl: constants::APP_TOKEN_TTL,
        renewable: true,
        display_name: format!("{}-app-token-{}", mount, environment),
    }
}

/// Token parameters for the readonly policy.
pub fn readonly_token_request(mount: &str, environment: &str) -> TokenRequest {
    TokenRequest {
        policy: readonly_policy_name(mount),
        ttl: constants::READONLY_TOKEN_TTL,
        renewable: true,
        display_name: format!("{}-readonly-token-{}", mount, environment),
    }
}

/// Run the bootstrap sequence against `store`.
///
/// # Errors
///
/// Returns the first failing step as a `BootstrapError`. Steps already
/// completed are not rolled back.
pub fn bootstrap<S: SecretStore + ?Sized>(
    store: &S,
    mount: &str,
    environment: &str,
) -> Result<BootstrapTokens, BootstrapError> {
    info!(mount, environment, "bootstrapping secret store");

    if store.mount_exists(mount) {
        info!(mount, "mount already exists");
    } else {
        info!(mount, kind = %MountKind::KvV2, "enabling mount");
        store
            .enable_mount(mount, MountKind::KvV2)
            .map_err(|source| BootstrapError::Mount {
                mount: mount.to_string(),
                source,
            })?;
    }

    for policy in [app_policy(mount), readonly_policy(mount)] {
        store
            .write_policy(&policy)
            .map_err(|source| BootstrapError::PolicyWrite {
                name: policy.name.clone(),
                source,
            })?;
        info!(policy = %policy.name, "policy written");
    }

    // Tokens are always minted new; earlier ones stay valid until they
    // expire or are revoked.
    let app = mint(store, &app_token_request(mount, environment))?;
    let readonly = mint(store, &readonly_token_request(mount, environment))?;

    Ok(BootstrapTokens { app, readonly })
}

fn mint<S: SecretStore + ?Sized>(
    store: &S,
    request: &TokenRequest,
) -> Result<IssuedToken, BootstrapError> {
    let token = store.create_token(request).map_err(|source| {
        warn!(policy = %request.policy, error = %source, "token creation failed");
        BootstrapError::TokenCreate {
            policy: request.policy.clone(),
            source,
        }
    })?;
    info!(policy = %request.policy, ttl = %request.ttl_string(), "token created");
    Ok(token)
}
