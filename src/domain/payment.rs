use crate::error::{GatewayError, Result};
use crate::protocol::fields::MINOR_UNIT_SCALE;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// A positive payment amount in the major currency unit (VND).
///
/// The gateway denominates amounts in 1/100 of the major unit, so the value
/// is scaled on the way out and divided back on the way in.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(GatewayError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `round(amount * 100)`, half away from zero.
    pub fn to_minor_units(&self) -> Result<u64> {
        let out_of_range = || GatewayError::Encoding(format!("amount {} out of range", self.0));
        self.0
            .checked_mul(Decimal::from(MINOR_UNIT_SCALE))
            .ok_or_else(out_of_range)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or_else(out_of_range)
    }

    /// `minor / 100`, normalized so `100000.00` reads as `100000`.
    pub fn from_minor_units(minor: u64) -> Decimal {
        (Decimal::from(minor) / Decimal::from(MINOR_UNIT_SCALE)).normalize()
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Vn,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Vn => "vn",
            Locale::En => "en",
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vn" => Ok(Locale::Vn),
            "en" => Ok(Locale::En),
            other => Err(GatewayError::Validation(format!(
                "unsupported locale '{other}'"
            ))),
        }
    }
}

/// Client address in the IPv4 form the gateway accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(String);

impl ClientIp {
    /// Loopback and IPv4-mapped IPv6 addresses are rewritten to IPv4.
    /// Strings that do not parse as an address pass through trimmed.
    pub fn normalize(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::Validation(
                "client IP must not be empty".to_string(),
            ));
        }

        let normalized = match trimmed.parse::<IpAddr>() {
            Ok(IpAddr::V6(v6)) if v6.is_loopback() => Ipv4Addr::LOCALHOST.to_string(),
            Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
                Some(v4) => v4.to_string(),
                None => v6.to_string(),
            },
            Ok(IpAddr::V4(v4)) => v4.to_string(),
            Err(_) => trimmed.to_string(),
        };
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A checkout's request to pay, produced by the business layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Unique per checkout; travels as the transaction reference.
    pub order_id: String,
    pub amount: Amount,
    pub order_description: String,
    pub client_ip: String,
    #[serde(default)]
    pub bank_code: Option<String>,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub order_type: Option<String>,
}

impl PaymentRequest {
    pub fn new(
        order_id: impl Into<String>,
        amount: Amount,
        order_description: impl Into<String>,
        client_ip: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            order_description: order_description.into(),
            client_ip: client_ip.into(),
            bank_code: None,
            locale: Locale::default(),
            order_type: None,
        }
    }

    pub fn with_bank_code(mut self, bank_code: impl Into<String>) -> Self {
        self.bank_code = Some(bank_code.into());
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_order_type(mut self, order_type: impl Into<String>) -> Self {
        self.order_type = Some(order_type.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.order_id.trim().is_empty() {
            return Err(GatewayError::Validation(
                "order id must not be empty".to_string(),
            ));
        }
        if self.order_description.trim().is_empty() {
            return Err(GatewayError::Validation(
                "order description must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
