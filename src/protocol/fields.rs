//! Field names and fixed values of the gateway's wire format.

pub const VERSION: &str = "vnp_Version";
pub const COMMAND: &str = "vnp_Command";
pub const TMN_CODE: &str = "vnp_TmnCode";
pub const LOCALE: &str = "vnp_Locale";
pub const CURR_CODE: &str = "vnp_CurrCode";
pub const TXN_REF: &str = "vnp_TxnRef";
pub const ORDER_INFO: &str = "vnp_OrderInfo";
pub const ORDER_TYPE: &str = "vnp_OrderType";
pub const AMOUNT: &str = "vnp_Amount";
pub const RETURN_URL: &str = "vnp_ReturnUrl";
pub const IP_ADDR: &str = "vnp_IpAddr";
pub const CREATE_DATE: &str = "vnp_CreateDate";
pub const EXPIRE_DATE: &str = "vnp_ExpireDate";
pub const BANK_CODE: &str = "vnp_BankCode";

pub const RESPONSE_CODE: &str = "vnp_ResponseCode";
pub const TRANSACTION_NO: &str = "vnp_TransactionNo";
pub const TRANSACTION_STATUS: &str = "vnp_TransactionStatus";
pub const BANK_TRAN_NO: &str = "vnp_BankTranNo";
pub const PAY_DATE: &str = "vnp_PayDate";

pub const SECURE_HASH: &str = "vnp_SecureHash";
pub const SECURE_HASH_TYPE: &str = "vnp_SecureHashType";

/// Keys that never take part in canonicalization.
pub const SIGNATURE_FIELDS: [&str; 2] = [SECURE_HASH, SECURE_HASH_TYPE];

pub const PROTOCOL_VERSION: &str = "2.1.0";
pub const PAY_COMMAND: &str = "pay";
pub const CURRENCY_VND: &str = "VND";
pub const DEFAULT_ORDER_TYPE: &str = "other";

/// Amounts travel in 1/100 of the major unit.
pub const MINOR_UNIT_SCALE: u32 = 100;

/// `YYYYMMDDHHMMSS`, the format of every gateway timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Gateway clock offset (GMT+7) in seconds.
pub const GATEWAY_UTC_OFFSET_SECS: i32 = 7 * 3600;

pub fn is_signature_field(key: &str) -> bool {
    SIGNATURE_FIELDS.contains(&key)
}
