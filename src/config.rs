//! Gateway configuration.
//!
//! Settings are supplied from outside the process (environment or the CLI)
//! and may be incomplete when loaded. Completeness is checked when a
//! [`PaymentUrlBuilder`](crate::application::url_builder::PaymentUrlBuilder)
//! or [`CallbackVerifier`](crate::application::verifier::CallbackVerifier) is
//! constructed, and a missing merchant code or secret is fatal there.

use crate::error::{GatewayError, Result};
use chrono::Duration;
use secrecy::SecretString;
use url::Url;

pub const ENV_TMN_CODE: &str = "VNPAY_TMN_CODE";
pub const ENV_HASH_SECRET: &str = "VNPAY_HASH_SECRET";
pub const ENV_URL: &str = "VNPAY_URL";
pub const ENV_RETURN_URL: &str = "VNPAY_RETURN_URL";
pub const ENV_EXPIRE_MINUTES: &str = "VNPAY_EXPIRE_MINUTES";

#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    merchant_code: Option<String>,
    secret_key: Option<SecretString>,
    gateway_base_url: Option<String>,
    return_url: Option<String>,
    expire_after: Option<Duration>,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `VNPAY_TMN_CODE`, `VNPAY_HASH_SECRET`, `VNPAY_URL`,
    /// `VNPAY_RETURN_URL` and the optional `VNPAY_EXPIRE_MINUTES`.
    ///
    /// Unset variables stay unset; only a malformed expiry fails here.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let expire_after = match var(ENV_EXPIRE_MINUTES) {
            Some(raw) => Some(parse_expire_minutes(&raw)?),
            None => None,
        };

        Ok(Self {
            merchant_code: var(ENV_TMN_CODE),
            secret_key: var(ENV_HASH_SECRET).map(SecretString::new),
            gateway_base_url: var(ENV_URL),
            return_url: var(ENV_RETURN_URL),
            expire_after,
        })
    }

    pub fn with_merchant_code(mut self, merchant_code: impl Into<String>) -> Self {
        self.merchant_code = Some(merchant_code.into());
        self
    }

    /// Returns a config signing under `secret_key`. Builders and verifiers
    /// created from the previous config keep the old key.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(SecretString::new(secret_key.into()));
        self
    }

    pub fn with_gateway_base_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_base_url = Some(url.into());
        self
    }

    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    pub fn with_expire_after(mut self, expire_after: Duration) -> Self {
        self.expire_after = Some(expire_after);
        self
    }

    pub fn merchant_code(&self) -> Result<&str> {
        required(self.merchant_code.as_deref(), "merchant code", ENV_TMN_CODE)
    }

    pub fn secret_key(&self) -> Result<&SecretString> {
        self.secret_key.as_ref().ok_or_else(|| missing("secret key", ENV_HASH_SECRET))
    }

    /// The payment page URL. Must be absolute `http(s)` without a query.
    pub fn gateway_base_url(&self) -> Result<&str> {
        let raw = required(self.gateway_base_url.as_deref(), "gateway URL", ENV_URL)?;
        let parsed = Url::parse(raw)
            .map_err(|e| GatewayError::Configuration(format!("invalid gateway URL '{raw}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(GatewayError::Configuration(format!(
                "gateway URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.query().is_some() {
            return Err(GatewayError::Configuration(
                "gateway URL must not carry a query string".to_string(),
            ));
        }
        Ok(raw)
    }

    pub fn return_url(&self) -> Result<&str> {
        required(self.return_url.as_deref(), "return URL", ENV_RETURN_URL)
    }

    pub fn expire_after(&self) -> Option<Duration> {
        self.expire_after
    }
}

fn required<'a>(value: Option<&'a str>, what: &str, env: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing(what, env)),
    }
}

fn missing(what: &str, env: &str) -> GatewayError {
    GatewayError::Configuration(format!("{what} is not configured ({env})"))
}

fn parse_expire_minutes(raw: &str) -> Result<Duration> {
    let minutes: i64 = raw.trim().parse().map_err(|_| {
        GatewayError::Configuration(format!("{ENV_EXPIRE_MINUTES} must be a whole number, got '{raw}'"))
    })?;
    if minutes <= 0 {
        return Err(GatewayError::Configuration(format!(
            "{ENV_EXPIRE_MINUTES} must be positive"
        )));
    }
    Ok(Duration::minutes(minutes))
}
