//! Domain types for the checkout/payment-gateway boundary.

pub mod params;
pub mod payment;
pub mod ports;
pub mod response_code;
pub mod verification;
