//! Canonical encoding of a parameter set.
//!
//! Both the outbound URL and the inbound callback check go through
//! [`CanonicalQuery`], so the bytes that get signed are produced in exactly
//! one place. Keys are sorted by byte value; absent and empty values are
//! dropped; keys and values are `application/x-www-form-urlencoded`, which
//! renders a space as `+`.

use super::fields;
use crate::domain::params::ParamValue;
use crate::error::{GatewayError, Result};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use url::form_urlencoded::byte_serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalQuery {
    pairs: Vec<(String, String)>,
    encoded: String,
}

impl CanonicalQuery {
    /// Canonicalizes `params`. Signature fields are skipped even if present.
    pub fn from_params<I, K, V>(params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Borrow<ParamValue>,
    {
        let mut sorted: BTreeMap<String, String> = BTreeMap::new();
        for (key, value) in params {
            let key = key.as_ref();
            if fields::is_signature_field(key) {
                continue;
            }
            let Some(rendered) = value.borrow().rendered() else {
                continue;
            };
            if key.is_empty() {
                return Err(GatewayError::Encoding(
                    "parameter name must not be empty".to_string(),
                ));
            }
            match sorted.entry(key.to_string()) {
                Entry::Occupied(_) => {
                    return Err(GatewayError::Encoding(format!(
                        "duplicate parameter '{key}'"
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(form_encode(&rendered));
                }
            }
        }

        let pairs: Vec<(String, String)> = sorted
            .into_iter()
            .map(|(key, value)| (form_encode(&key), value))
            .collect();
        let encoded = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        Ok(Self { pairs, encoded })
    }

    /// Encoded `(key, value)` pairs in canonical order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

fn form_encode(raw: &str) -> String {
    byte_serialize(raw.as_bytes()).collect()
}
