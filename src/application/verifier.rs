use crate::config::GatewayConfig;
use crate::domain::params::CallbackParams;
use crate::domain::payment::Amount;
use crate::domain::response_code::ResponseCode;
use crate::domain::verification::VerificationResult;
use crate::error::{GatewayError, Result};
use crate::protocol::canonical::CanonicalQuery;
use crate::protocol::fields;
use crate::protocol::signer::Signer;
use secrecy::SecretString;
use tracing::warn;

/// Checks signed callbacks from the gateway.
///
/// The browser return and the IPN carry the same parameters, so both go
/// through [`CallbackVerifier::verify_callback`]. Verification is stateless:
/// a redelivered notification produces the same result every time, and
/// deduplication belongs to whoever settles the order.
#[derive(Debug, Clone)]
pub struct CallbackVerifier {
    signer: Signer,
}

impl CallbackVerifier {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        Self::from_secret(config.secret_key()?)
    }

    pub fn from_secret(secret: &SecretString) -> Result<Self> {
        Ok(Self {
            signer: Signer::new(secret)?,
        })
    }

    /// Recomputes the signature over `params` and classifies the callback.
    ///
    /// A mismatch is not an error: it yields `is_valid == false` with every
    /// other field empty. Errors are reserved for parameters that cannot be
    /// canonicalized or a correctly signed callback with a malformed amount.
    pub fn verify_callback(&self, params: &CallbackParams) -> Result<VerificationResult> {
        let order_hint = params.text(fields::TXN_REF).unwrap_or_default();

        let Some(declared) = params.declared_signature() else {
            warn!(
                target: "vnpay::security",
                order_id = %order_hint,
                "callback without signature rejected"
            );
            return Ok(VerificationResult::invalid());
        };

        let canonical = CanonicalQuery::from_params(params.signed_fields())?;
        let expected = self.signer.sign(&canonical);
        if !expected.matches(&declared) {
            warn!(
                target: "vnpay::security",
                order_id = %order_hint,
                declared = %declared.chars().take(8).collect::<String>(),
                "callback signature mismatch"
            );
            return Ok(VerificationResult::invalid());
        }

        let response_code = params.text(fields::RESPONSE_CODE).unwrap_or_default();
        let code = ResponseCode::parse(&response_code);
        if !code.is_known() {
            warn!(
                order_id = %order_hint,
                response_code = %response_code,
                "unknown gateway response code"
            );
        }

        Ok(VerificationResult {
            is_valid: true,
            is_success: code.is_success(),
            message: code.message().to_string(),
            category: Some(code.category()),
            response_code,
            amount: decode_amount(params)?,
            order_id: order_hint,
            bank_code: params.text(fields::BANK_CODE).unwrap_or_default(),
            transaction_ref: params.text(fields::TRANSACTION_NO).unwrap_or_default(),
            transaction_status: params.text(fields::TRANSACTION_STATUS),
            bank_transaction_no: params.text(fields::BANK_TRAN_NO),
            pay_timestamp: params.text(fields::PAY_DATE).unwrap_or_default(),
        })
    }

    /// Like [`verify_callback`](Self::verify_callback) but an untrusted
    /// callback is a [`GatewayError::SignatureMismatch`].
    pub fn verify_trusted(&self, params: &CallbackParams) -> Result<VerificationResult> {
        let order_hint = params.text(fields::TXN_REF).unwrap_or_default();
        self.verify_callback(params)?.into_trusted(&order_hint)
    }
}

fn decode_amount(params: &CallbackParams) -> Result<rust_decimal::Decimal> {
    let raw = params
        .text(fields::AMOUNT)
        .ok_or_else(|| GatewayError::Encoding(format!("{} is missing", fields::AMOUNT)))?;
    let minor: u64 = raw.trim().parse().map_err(|_| {
        GatewayError::Encoding(format!("{} is not a whole number: '{raw}'", fields::AMOUNT))
    })?;
    Ok(Amount::from_minor_units(minor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response_code::ResponseCategory;
    use rust_decimal_macros::dec;

    const SECRET: &str = "SECRETKEY";

    fn verifier() -> CallbackVerifier {
        CallbackVerifier::from_secret(&SecretString::new(SECRET.to_string())).unwrap()
    }

    fn signed(pairs: &[(&str, &str)]) -> CallbackParams {
        let mut params = CallbackParams::from_pairs(pairs.iter().copied()).unwrap();
        let canonical = CanonicalQuery::from_params(params.signed_fields()).unwrap();
        let signer = Signer::new(&SecretString::new(SECRET.to_string())).unwrap();
        params.set(fields::SECURE_HASH, signer.sign(&canonical).to_string());
        params.set(fields::SECURE_HASH_TYPE, "HmacSHA512");
        params
    }

    fn callback(response_code: &str) -> CallbackParams {
        signed(&[
            ("vnp_Amount", "10000000"),
            ("vnp_BankCode", "NCB"),
            ("vnp_BankTranNo", "VNP14226112"),
            ("vnp_CardType", "ATM"),
            ("vnp_OrderInfo", "Thanh toan don hang 19123456"),
            ("vnp_PayDate", "20240115163512"),
            ("vnp_ResponseCode", response_code),
            ("vnp_TmnCode", "DEMOSHOP"),
            ("vnp_TransactionNo", "14226112"),
            ("vnp_TransactionStatus", response_code),
            ("vnp_TxnRef", "19123456"),
        ])
    }

    #[test]
    fn test_successful_callback() {
        let result = verifier().verify_callback(&callback("00")).unwrap();
        assert!(result.is_valid);
        assert!(result.is_success);
        assert_eq!(result.response_code, "00");
        assert_eq!(result.message, "Transaction successful");
        assert_eq!(result.category, Some(ResponseCategory::Success));
        assert_eq!(result.order_id, "19123456");
        assert_eq!(result.amount, dec!(100000));
        assert_eq!(result.bank_code, "NCB");
        assert_eq!(result.transaction_ref, "14226112");
        assert_eq!(result.transaction_status.as_deref(), Some("00"));
        assert_eq!(result.bank_transaction_no.as_deref(), Some("VNP14226112"));
        assert_eq!(result.pay_timestamp, "20240115163512");
    }

    #[test]
    fn test_failed_payment_is_valid_but_not_success() {
        let result = verifier().verify_callback(&callback("24")).unwrap();
        assert!(result.is_valid);
        assert!(!result.is_success);
        assert_eq!(result.category, Some(ResponseCategory::CustomerCancelled));
    }

    #[test]
    fn test_unknown_code_keeps_validity() {
        let result = verifier().verify_callback(&callback("77")).unwrap();
        assert!(result.is_valid);
        assert!(!result.is_success);
        assert_eq!(result.response_code, "77");
        assert_eq!(result.message, "Unknown error");
    }

    #[test]
    fn test_tampered_amount_is_invalid() {
        let mut params = callback("00");
        params.set("vnp_Amount", "10000001");
        let result = verifier().verify_callback(&params).unwrap();
        assert_eq!(result, VerificationResult::invalid());
    }

    #[test]
    fn test_injected_parameter_is_invalid() {
        let mut params = callback("00");
        params.set("vnp_Extra", "1");
        assert!(!verifier().verify_callback(&params).unwrap().is_valid);
    }

    #[test]
    fn test_missing_signature_is_invalid() {
        let mut params = callback("00");
        params.set(fields::SECURE_HASH, "");
        assert!(!verifier().verify_callback(&params).unwrap().is_valid);
    }

    #[test]
    fn test_signature_type_is_not_signed() {
        let mut params = callback("00");
        params.set(fields::SECURE_HASH_TYPE, "SHA256");
        assert!(verifier().verify_callback(&params).unwrap().is_valid);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let other = CallbackVerifier::from_secret(&SecretString::new("ROTATED".to_string())).unwrap();
        assert!(!other.verify_callback(&callback("00")).unwrap().is_valid);
    }

    #[test]
    fn test_verify_trusted_raises_mismatch() {
        let mut params = callback("00");
        params.set("vnp_ResponseCode", "24");
        let err = verifier().verify_trusted(&params).unwrap_err();
        assert!(matches!(err, GatewayError::SignatureMismatch { order_id } if order_id == "19123456"));
    }

    #[test]
    fn test_malformed_amount_on_signed_callback_is_encoding_error() {
        let params = signed(&[
            ("vnp_Amount", "lots"),
            ("vnp_ResponseCode", "00"),
            ("vnp_TxnRef", "1"),
        ]);
        assert!(matches!(
            verifier().verify_callback(&params),
            Err(GatewayError::Encoding(_))
        ));
    }

    #[test]
    fn test_redelivery_is_stable() {
        let params = callback("00");
        let first = verifier().verify_callback(&params).unwrap();
        let second = verifier().verify_callback(&params).unwrap();
        assert_eq!(first, second);
    }
}
