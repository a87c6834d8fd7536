#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo_bin;
use secrecy::SecretString;
use vnpay_gateway::{CallbackVerifier, GatewayConfig};

pub const SECRET: &str = "SECRETKEY";
pub const MERCHANT: &str = "DEMOSHOP";
pub const GATEWAY_URL: &str = "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html";
pub const RETURN_URL: &str = "https://shop.example/payment/return";

// Signatures below were computed with an independent HMAC-SHA512
// implementation over the form-encoded, byte-sorted parameters.

/// Order 19123456, 100000 VND, client `::1`, created 2024-01-15 16:30:00 GMT+7.
pub const PAY_URL: &str = "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html?vnp_Amount=10000000&vnp_Command=pay&vnp_CreateDate=20240115163000&vnp_CurrCode=VND&vnp_IpAddr=127.0.0.1&vnp_Locale=vn&vnp_OrderInfo=Thanh+toan+don+hang+19123456&vnp_OrderType=other&vnp_ReturnUrl=https%3A%2F%2Fshop.example%2Fpayment%2Freturn&vnp_TmnCode=DEMOSHOP&vnp_TxnRef=19123456&vnp_Version=2.1.0&vnp_SecureHash=1e386b9abb0dc81b90b10c003944fd09bceac3cbdde3170767645c9e58f421feaa57d06959cbac694ed9a8b58acea6eec318098d54da04812a1389f4dbf9db5f";

/// Successful return for order 19123456.
pub const RETURN_SUCCESS: &str = "vnp_Amount=10000000&vnp_BankCode=NCB&vnp_BankTranNo=VNP14226112&vnp_CardType=ATM&vnp_OrderInfo=Thanh+toan+don+hang+19123456&vnp_PayDate=20240115163512&vnp_ResponseCode=00&vnp_TmnCode=DEMOSHOP&vnp_TransactionNo=14226112&vnp_TransactionStatus=00&vnp_TxnRef=19123456&vnp_SecureHashType=HmacSHA512&vnp_SecureHash=6d3f3010e060357c848d0c0076338e1c57fdc9ed6b8a6a1c16b6253c40528f757f847ddf031e4c698bb6318c1b6d12f150bf7c14e77b918bcf5b05ac1a87568d";

/// Customer cancelled (code 24) for order 19123456.
pub const RETURN_CANCELLED: &str = "vnp_Amount=10000000&vnp_BankCode=NCB&vnp_BankTranNo=VNP14226112&vnp_CardType=ATM&vnp_OrderInfo=Thanh+toan+don+hang+19123456&vnp_PayDate=20240115163512&vnp_ResponseCode=24&vnp_TmnCode=DEMOSHOP&vnp_TransactionNo=14226112&vnp_TransactionStatus=02&vnp_TxnRef=19123456&vnp_SecureHash=b92e150d2500b5a0a69efc53c49cb79d2e89ae21004274a5bdec6bba2235fe033791033ee4961538ca7ff549e9ad699fc51ecba712ee8e691a5502ef30570560";

/// Code 77, which is not in the published table.
pub const RETURN_UNKNOWN_CODE: &str = "vnp_Amount=10000000&vnp_BankCode=NCB&vnp_BankTranNo=VNP14226112&vnp_CardType=ATM&vnp_OrderInfo=Thanh+toan+don+hang+19123456&vnp_PayDate=20240115163512&vnp_ResponseCode=77&vnp_TmnCode=DEMOSHOP&vnp_TransactionNo=14226112&vnp_TransactionStatus=02&vnp_TxnRef=19123456&vnp_SecureHash=3350fe0deb1619ef4a2177ff74d9c0f8498e4fa98c7c9b9ae53ed3c2b4f4d8a602a313fb06fefd7d190be75344a7fa459119882656d0104ecb2909798ccc69a4";

pub fn config() -> GatewayConfig {
    GatewayConfig::new()
        .with_merchant_code(MERCHANT)
        .with_secret_key(SECRET)
        .with_gateway_base_url(GATEWAY_URL)
        .with_return_url(RETURN_URL)
}

pub fn verifier() -> CallbackVerifier {
    CallbackVerifier::from_secret(&SecretString::new(SECRET.to_string())).unwrap()
}

/// The binary without `VNPAY_*` or `RUST_LOG` inherited from the environment.
pub fn cli() -> Command {
    let mut cmd = Command::new(cargo_bin!("vnpay-gateway"));
    for var in [
        "VNPAY_TMN_CODE",
        "VNPAY_HASH_SECRET",
        "VNPAY_URL",
        "VNPAY_RETURN_URL",
        "VNPAY_EXPIRE_MINUTES",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
