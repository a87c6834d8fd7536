use crate::error::{GatewayError, Result};
use crate::protocol::fields;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A single parameter value as it enters canonicalization.
///
/// Only text and numbers are representable. Anything else is rejected when
/// converting from untyped input, so it can never reach the signer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Absent,
    Text(String),
    Number(serde_json::Number),
}

impl ParamValue {
    /// The value as it is rendered on the wire, or `None` when the key must
    /// be dropped (absent or empty).
    pub fn rendered(&self) -> Option<Cow<'_, str>> {
        match self {
            ParamValue::Absent => None,
            ParamValue::Text(text) if text.is_empty() => None,
            ParamValue::Text(text) => Some(Cow::Borrowed(text)),
            ParamValue::Number(number) => Some(Cow::Owned(number.to_string())),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Absent, Into::into)
    }
}

impl TryFrom<serde_json::Value> for ParamValue {
    type Error = GatewayError;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(ParamValue::Absent),
            serde_json::Value::String(text) => Ok(ParamValue::Text(text)),
            serde_json::Value::Number(number) => Ok(ParamValue::Number(number)),
            other => Err(GatewayError::Encoding(format!(
                "unsupported parameter value: {other}"
            ))),
        }
    }
}

/// Raw parameters delivered by the gateway on a return or IPN callback.
///
/// Keys are unique. The declared signature fields are kept here and only
/// stripped by the verifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackParams {
    params: BTreeMap<String, ParamValue>,
}

impl CallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parameter set from key/value pairs, rejecting repeated keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key, value)?;
        }
        Ok(params)
    }

    /// Builds a parameter set from a flat JSON object.
    pub fn from_json(body: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(object) = body else {
            return Err(GatewayError::Encoding(
                "callback body must be a JSON object".to_string(),
            ));
        };
        let mut params = Self::new();
        for (key, value) in object {
            params.insert(key, ParamValue::try_from(value)?)?;
        }
        Ok(params)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Result<()> {
        match self.params.entry(key.into()) {
            Entry::Occupied(entry) => Err(GatewayError::Encoding(format!(
                "duplicate parameter '{}'",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                Ok(())
            }
        }
    }

    /// Replaces a value in place. Used to model tampering in tests and replays.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// The rendered value of `key`, if present and non-empty.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(ParamValue::rendered)
            .map(Cow::into_owned)
    }

    pub fn declared_signature(&self) -> Option<String> {
        self.text(fields::SECURE_HASH)
    }

    /// Parameters that take part in signing: everything but the signature fields.
    pub fn signed_fields(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params
            .iter()
            .filter(|(key, _)| !fields::is_signature_field(key))
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}
