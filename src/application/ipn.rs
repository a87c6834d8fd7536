use super::verifier::CallbackVerifier;
use crate::domain::params::CallbackParams;
use crate::domain::ports::OrderLedgerBox;
use crate::domain::verification::VerificationResult;
use serde::Serialize;
use tracing::{info, warn};

/// Answers the merchant returns to an IPN delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpnResponseCode {
    ConfirmSuccess,
    OrderNotFound,
    AlreadyConfirmed,
    InvalidAmount,
    InvalidSignature,
    UnknownError,
}

impl IpnResponseCode {
    pub fn code(&self) -> &'static str {
        match self {
            IpnResponseCode::ConfirmSuccess => "00",
            IpnResponseCode::OrderNotFound => "01",
            IpnResponseCode::AlreadyConfirmed => "02",
            IpnResponseCode::InvalidAmount => "04",
            IpnResponseCode::InvalidSignature => "97",
            IpnResponseCode::UnknownError => "99",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            IpnResponseCode::ConfirmSuccess => "Confirm Success",
            IpnResponseCode::OrderNotFound => "Order not found",
            IpnResponseCode::AlreadyConfirmed => "Order already confirmed",
            IpnResponseCode::InvalidAmount => "Invalid amount",
            IpnResponseCode::InvalidSignature => "Invalid signature",
            IpnResponseCode::UnknownError => "Unknown error",
        }
    }
}

/// JSON body returned to the gateway, e.g. `{"RspCode":"00","Message":"Confirm Success"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpnAcknowledgement {
    #[serde(rename = "RspCode")]
    pub rsp_code: String,
    #[serde(rename = "Message")]
    pub message: String,
}

impl From<IpnResponseCode> for IpnAcknowledgement {
    fn from(code: IpnResponseCode) -> Self {
        Self {
            rsp_code: code.code().to_string(),
            message: code.message().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementOutcome {
    Paid,
    Failed,
}

/// A state change the business layer should apply to a pending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub order_id: String,
    pub outcome: SettlementOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IpnDecision {
    pub acknowledgement: IpnAcknowledgement,
    pub verification: Option<VerificationResult>,
    /// Set only for a first, matching notification on a pending order.
    pub settlement: Option<Settlement>,
}

impl IpnDecision {
    fn reply(code: IpnResponseCode, verification: Option<VerificationResult>) -> Self {
        Self {
            acknowledgement: code.into(),
            verification,
            settlement: None,
        }
    }
}

/// Verifies an IPN and decides the acknowledgement against the order ledger.
///
/// The handler only reads the ledger. Settling the order is left to the
/// caller through [`IpnDecision::settlement`].
pub struct IpnHandler {
    verifier: CallbackVerifier,
    ledger: OrderLedgerBox,
}

impl IpnHandler {
    pub fn new(verifier: CallbackVerifier, ledger: OrderLedgerBox) -> Self {
        Self { verifier, ledger }
    }

    pub async fn handle(&self, params: &CallbackParams) -> IpnDecision {
        let verification = match self.verifier.verify_callback(params) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "IPN could not be verified");
                return IpnDecision::reply(IpnResponseCode::UnknownError, None);
            }
        };
        if !verification.is_valid {
            return IpnDecision::reply(IpnResponseCode::InvalidSignature, Some(verification));
        }

        let order = match self.ledger.find_order(&verification.order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                warn!(order_id = %verification.order_id, "IPN for unknown order");
                return IpnDecision::reply(IpnResponseCode::OrderNotFound, Some(verification));
            }
            Err(e) => {
                warn!(order_id = %verification.order_id, error = %e, "order lookup failed");
                return IpnDecision::reply(IpnResponseCode::UnknownError, Some(verification));
            }
        };

        if order.amount != verification.amount {
            warn!(
                order_id = %order.order_id,
                expected = %order.amount,
                received = %verification.amount,
                "IPN amount does not match order"
            );
            return IpnDecision::reply(IpnResponseCode::InvalidAmount, Some(verification));
        }

        if order.status.is_settled() {
            info!(order_id = %order.order_id, "IPN redelivered for settled order");
            return IpnDecision::reply(IpnResponseCode::AlreadyConfirmed, Some(verification));
        }

        let outcome = if verification.is_success {
            SettlementOutcome::Paid
        } else {
            SettlementOutcome::Failed
        };
        info!(
            order_id = %order.order_id,
            response_code = %verification.response_code,
            ?outcome,
            "IPN confirmed"
        );
        IpnDecision {
            acknowledgement: IpnResponseCode::ConfirmSuccess.into(),
            settlement: Some(Settlement {
                order_id: order.order_id,
                outcome,
            }),
            verification: Some(verification),
        }
    }
}
