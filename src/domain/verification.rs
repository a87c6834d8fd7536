use super::response_code::ResponseCategory;
use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Classification of one callback delivery.
///
/// When `is_valid` is false every other field is left at its default and
/// must not be trusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub is_success: bool,
    pub response_code: String,
    pub message: String,
    pub category: Option<ResponseCategory>,
    pub order_id: String,
    /// Major currency unit.
    pub amount: Decimal,
    pub bank_code: String,
    /// The gateway's own transaction number.
    pub transaction_ref: String,
    pub transaction_status: Option<String>,
    pub bank_transaction_no: Option<String>,
    /// `YYYYMMDDHHMMSS` in gateway time, as received.
    pub pay_timestamp: String,
}

impl VerificationResult {
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            is_success: false,
            response_code: String::new(),
            message: String::new(),
            category: None,
            order_id: String::new(),
            amount: Decimal::ZERO,
            bank_code: String::new(),
            transaction_ref: String::new(),
            transaction_status: None,
            bank_transaction_no: None,
            pay_timestamp: String::new(),
        }
    }

    /// Turns an untrusted result into `SignatureMismatch`.
    pub fn into_trusted(self, order_hint: &str) -> Result<Self> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(GatewayError::SignatureMismatch {
                order_id: order_hint.to_string(),
            })
        }
    }
}
