use crate::domain::params::CallbackParams;
use crate::error::{GatewayError, Result};
use url::form_urlencoded;

/// Parses a callback delivered as a query string (browser return, GET IPN).
///
/// Accepts a full URL, a `?`-prefixed query, or a bare query. Values are
/// form-decoded, so `+` becomes a space; a repeated key is an error.
pub fn parse_query(raw: &str) -> Result<CallbackParams> {
    let raw = raw.trim();
    let query = match raw.split_once('?') {
        Some((_, query)) => query,
        None => raw,
    };
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    CallbackParams::from_pairs(
        form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned())),
    )
}

/// Parses a callback delivered as a flat JSON object (POST IPN).
pub fn parse_json_body(body: &str) -> Result<CallbackParams> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GatewayError::Encoding(format!("invalid JSON callback body: {e}")))?;
    CallbackParams::from_json(value)
}
