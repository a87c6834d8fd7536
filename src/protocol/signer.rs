use super::canonical::CanonicalQuery;
use crate::error::{GatewayError, Result};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha512;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// Length of a hex-encoded HMAC-SHA512 digest.
pub const SIGNATURE_HEX_LEN: usize = 128;

/// Lowercase hex HMAC-SHA512 digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, constant-time comparison against a declared signature.
    pub fn matches(&self, declared: &str) -> bool {
        bool::from(self.0.as_bytes().ct_eq(declared.as_bytes()))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keyed HMAC-SHA512 over canonical strings.
///
/// The key is consumed into the MAC state on construction and never kept
/// as text; only a masked prefix survives for logging.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha512,
    masked_key: String,
}

impl Signer {
    pub fn new(secret: &SecretString) -> Result<Self> {
        let key = secret.expose_secret();
        if key.trim().is_empty() {
            return Err(GatewayError::Configuration(
                "secret key must not be empty".to_string(),
            ));
        }
        let mac = HmacSha512::new_from_slice(key.as_bytes())
            .map_err(|e| GatewayError::Configuration(format!("invalid secret key: {e}")))?;
        Ok(Self {
            mac,
            masked_key: mask_secret(key),
        })
    }

    pub fn sign(&self, canonical: &CanonicalQuery) -> Signature {
        self.sign_str(canonical.as_str())
    }

    pub fn sign_str(&self, data: &str) -> Signature {
        let mut mac = self.mac.clone();
        mac.update(data.as_bytes());
        Signature(hex::encode(mac.finalize().into_bytes()))
    }

    pub fn masked_key(&self) -> &str {
        &self.masked_key
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("key", &self.masked_key)
            .finish()
    }
}

/// At most a quarter of the secret, capped at four characters, then `****`.
pub fn mask_secret(secret: &str) -> String {
    let shown = (secret.chars().count() / 4).min(4);
    let prefix: String = secret.chars().take(shown).collect();
    format!("{prefix}****")
}
