use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(vnpay::config),
        help("set VNPAY_TMN_CODE, VNPAY_HASH_SECRET, VNPAY_URL and VNPAY_RETURN_URL")
    )]
    Configuration(String),
    #[error("Encoding error: {0}")]
    #[diagnostic(code(vnpay::encoding))]
    Encoding(String),
    #[error("Validation error: {0}")]
    #[diagnostic(code(vnpay::validation))]
    Validation(String),
    #[error("Signature mismatch for order '{order_id}'")]
    #[diagnostic(code(vnpay::signature))]
    SignatureMismatch { order_id: String },
    #[error("Ledger error: {0}")]
    #[diagnostic(code(vnpay::ledger))]
    Ledger(String),
    #[error("CSV error: {0}")]
    #[diagnostic(code(vnpay::csv))]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    #[diagnostic(code(vnpay::io))]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
