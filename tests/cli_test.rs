mod common;

use common::{GATEWAY_URL, MERCHANT, PAY_URL, RETURN_SUCCESS, RETURN_URL, SECRET};
use predicates::prelude::*;
use std::io::Write;

fn pay_url_args() -> [&'static str; 11] {
    [
        "pay-url",
        "--order-id",
        "19123456",
        "--amount",
        "100000",
        "--description",
        "Thanh toan don hang 19123456",
        "--ip",
        "::1",
        "--created-at",
        "20240115163000",
    ]
}

fn orders_csv(status: &str) -> tempfile::NamedTempFile {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "order_id,amount,status").unwrap();
    writeln!(csv, "19123456,100000,{status}").unwrap();
    csv
}

#[test]
fn test_pay_url_from_flags() {
    let mut cmd = common::cli();
    cmd.args(["--tmn-code", MERCHANT, "--hash-secret", SECRET])
        .args(["--gateway-url", GATEWAY_URL, "--return-url", RETURN_URL])
        .args(pay_url_args());

    cmd.assert()
        .success()
        .stdout(predicate::str::diff(format!("{PAY_URL}\n")));
}

#[test]
fn test_pay_url_from_environment() {
    let mut cmd = common::cli();
    cmd.env("VNPAY_TMN_CODE", MERCHANT)
        .env("VNPAY_HASH_SECRET", SECRET)
        .env("VNPAY_URL", GATEWAY_URL)
        .env("VNPAY_RETURN_URL", RETURN_URL)
        .args(pay_url_args());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(PAY_URL));
}

#[test]
fn test_pay_url_with_expiry() {
    let mut cmd = common::cli();
    cmd.env("VNPAY_EXPIRE_MINUTES", "15")
        .args(["--tmn-code", MERCHANT, "--hash-secret", SECRET])
        .args(["--gateway-url", GATEWAY_URL, "--return-url", RETURN_URL])
        .args(pay_url_args());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("&vnp_ExpireDate=20240115164500&"));
}

#[test]
fn test_pay_url_without_secret_fails() {
    let mut cmd = common::cli();
    cmd.args(["--tmn-code", MERCHANT])
        .args(["--gateway-url", GATEWAY_URL, "--return-url", RETURN_URL])
        .args(pay_url_args());

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("secret key is not configured"));
}

#[test]
fn test_secret_not_echoed_in_logs() {
    let mut cmd = common::cli();
    cmd.env("RUST_LOG", "vnpay_gateway=debug")
        .args(["--tmn-code", MERCHANT, "--hash-secret", SECRET])
        .args(["--gateway-url", GATEWAY_URL, "--return-url", RETURN_URL])
        .args(pay_url_args());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("SE****"))
        .stderr(predicate::str::contains(SECRET).not());
}

#[test]
fn test_verify_valid_callback() {
    let mut cmd = common::cli();
    cmd.args(["--hash-secret", SECRET, "verify", RETURN_SUCCESS]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""is_valid": true"#))
        .stdout(predicate::str::contains(r#""is_success": true"#))
        .stdout(predicate::str::contains(r#""amount": "100000""#));
}

#[test]
fn test_verify_reads_stdin_and_flags_tampering() {
    let tampered = RETURN_SUCCESS.replace("vnp_Amount=10000000", "vnp_Amount=10000001");
    let mut cmd = common::cli();
    cmd.args(["--hash-secret", SECRET, "verify", "-"])
        .write_stdin(tampered);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""is_valid": false"#))
        .stderr(predicate::str::contains("callback signature mismatch"));
}

#[test]
fn test_ipn_confirms_pending_order() {
    let csv = orders_csv("pending");
    let mut cmd = common::cli();
    cmd.args(["--hash-secret", SECRET, "ipn", "--orders"])
        .arg(csv.path())
        .arg(RETURN_SUCCESS);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"RspCode":"00","Message":"Confirm Success"}"#,
        ));
}

#[test]
fn test_ipn_for_paid_order_is_already_confirmed() {
    let csv = orders_csv("paid");
    let mut cmd = common::cli();
    cmd.args(["--hash-secret", SECRET, "ipn", "--orders"])
        .arg(csv.path())
        .arg(RETURN_SUCCESS);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(r#""RspCode":"02""#));
}
