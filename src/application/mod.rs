//! Operations exposed to the business layer.
//!
//! `PaymentUrlBuilder` signs the outbound redirect, `CallbackVerifier` checks
//! the browser return and IPN, and `IpnHandler` turns a verified IPN into the
//! acknowledgement the gateway expects. All of them hold only read-only
//! configuration and can be shared freely between tasks.

pub mod ipn;
pub mod url_builder;
pub mod verifier;
