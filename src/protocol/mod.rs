//! Wire rules shared by the outbound and inbound paths.

pub mod canonical;
pub mod fields;
pub mod signer;
