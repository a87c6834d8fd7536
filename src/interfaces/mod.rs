//! Adapters from raw transport payloads into domain types.

pub mod csv;
pub mod query;
