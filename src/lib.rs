//! Signing and verification for the VNPay payment gateway.
//!
//! Outbound, [`PaymentUrlBuilder`] turns a checkout's [`PaymentRequest`] into
//! a signed redirect URL. Inbound, [`CallbackVerifier`] recomputes the
//! signature on a browser return or IPN and classifies the outcome. Both go
//! through the same [`CanonicalQuery`] encoder and HMAC-SHA512 [`Signer`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod protocol;

pub use application::ipn::{IpnAcknowledgement, IpnDecision, IpnHandler, Settlement, SettlementOutcome};
pub use application::url_builder::{PaymentUrlBuilder, create_payment_url};
pub use application::verifier::CallbackVerifier;
pub use config::GatewayConfig;
pub use domain::params::{CallbackParams, ParamValue};
pub use domain::payment::{Amount, Locale, PaymentRequest};
pub use domain::response_code::{ResponseCategory, ResponseCode};
pub use domain::verification::VerificationResult;
pub use error::{GatewayError, Result};
pub use protocol::canonical::CanonicalQuery;
pub use protocol::signer::{Signature, Signer};
