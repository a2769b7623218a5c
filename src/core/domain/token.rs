//! Token request and issued-token types.

use std::fmt;
use std::time::Duration;

use zeroize::Zeroizing;

/// Parameters for minting a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub policy: String,
    pub ttl: Duration,
    pub renewable: bool,
    pub display_name: String,
}

impl TokenRequest {
    /// TTL in Vault's duration syntax, rounded down to whole hours when exact.
    ///
    /// `8760h` rather than `31536000s`, to match what operators type.
    pub fn ttl_string(&self) -> String {
        let secs = self.ttl.as_secs();
        if secs > 0 && secs % 3600 == 0 {
            format!("{}h", secs / 3600)
        } else {
            format!("{}s", secs)
        }
    }
}

/// A credential returned by the store.
///
/// The value is wiped on drop and never shown by `Debug`.
#[derive(Clone)]
pub struct IssuedToken {
    pub policy: String,
    pub display_name: String,
    pub ttl: Duration,
    value: Zeroizing<String>,
}

impl IssuedToken {
    pub fn new(request: &TokenRequest, value: String) -> Self {
        Self {
            policy: request.policy.clone(),
            display_name: request.display_name.clone(),
            ttl: request.ttl,
            value: Zeroizing::new(value),
        }
    }

    /// The bearer credential.
    pub fn expose(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("policy", &self.policy)
            .field("display_name", &self.display_name)
            .field("ttl", &self.ttl)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// Tokens minted by a bootstrap run.
#[derive(Debug, Clone)]
pub struct BootstrapTokens {
    /// Long-lived application token
    pub app: IssuedToken,
    /// Short-lived monitoring token
    pub readonly: IssuedToken,
}
