use serde::Serialize;

/// Outcome class of a gateway response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    Success,
    /// Funds were debited but the gateway flagged the transaction.
    Suspicious,
    CustomerCancelled,
    Declined,
    Timeout,
    Unavailable,
    Unknown,
}

/// Response codes published by the gateway for payment results.
///
/// Anything outside the table lands in `Unknown`, which keeps the raw code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    SuspectedFraud,
    NotRegisteredForInternetBanking,
    AuthenticationFailedTooManyTimes,
    PaymentTimeout,
    AccountLocked,
    WrongOtp,
    CancelledByCustomer,
    InsufficientBalance,
    DailyLimitExceeded,
    BankMaintenance,
    WrongPasswordTooManyTimes,
    Other,
    Unknown(String),
}

impl ResponseCode {
    pub const UNKNOWN_MESSAGE: &'static str = "Unknown error";

    /// Every code the gateway publishes, in table order.
    pub const KNOWN_CODES: [&'static str; 13] = [
        "00", "07", "09", "10", "11", "12", "13", "24", "51", "65", "75", "79", "99",
    ];

    pub fn parse(code: &str) -> Self {
        match code {
            "00" => ResponseCode::Success,
            "07" => ResponseCode::SuspectedFraud,
            "09" => ResponseCode::NotRegisteredForInternetBanking,
            "10" => ResponseCode::AuthenticationFailedTooManyTimes,
            "11" => ResponseCode::PaymentTimeout,
            "12" => ResponseCode::AccountLocked,
            "13" => ResponseCode::WrongOtp,
            "24" => ResponseCode::CancelledByCustomer,
            "51" => ResponseCode::InsufficientBalance,
            "65" => ResponseCode::DailyLimitExceeded,
            "75" => ResponseCode::BankMaintenance,
            "79" => ResponseCode::WrongPasswordTooManyTimes,
            "99" => ResponseCode::Other,
            other => ResponseCode::Unknown(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ResponseCode::Success => "00",
            ResponseCode::SuspectedFraud => "07",
            ResponseCode::NotRegisteredForInternetBanking => "09",
            ResponseCode::AuthenticationFailedTooManyTimes => "10",
            ResponseCode::PaymentTimeout => "11",
            ResponseCode::AccountLocked => "12",
            ResponseCode::WrongOtp => "13",
            ResponseCode::CancelledByCustomer => "24",
            ResponseCode::InsufficientBalance => "51",
            ResponseCode::DailyLimitExceeded => "65",
            ResponseCode::BankMaintenance => "75",
            ResponseCode::WrongPasswordTooManyTimes => "79",
            ResponseCode::Other => "99",
            ResponseCode::Unknown(raw) => raw,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ResponseCode::Success => "Transaction successful",
            ResponseCode::SuspectedFraud => {
                "Amount debited; transaction flagged as suspicious (possible fraud)"
            }
            ResponseCode::NotRegisteredForInternetBanking => {
                "Card/account is not registered for internet banking"
            }
            ResponseCode::AuthenticationFailedTooManyTimes => {
                "Card/account verification failed more than 3 times"
            }
            ResponseCode::PaymentTimeout => "Payment window expired",
            ResponseCode::AccountLocked => "Card/account is locked",
            ResponseCode::WrongOtp => "Incorrect one-time password (OTP)",
            ResponseCode::CancelledByCustomer => "Transaction cancelled by customer",
            ResponseCode::InsufficientBalance => "Insufficient account balance",
            ResponseCode::DailyLimitExceeded => "Daily transaction limit exceeded",
            ResponseCode::BankMaintenance => "Issuing bank is under maintenance",
            ResponseCode::WrongPasswordTooManyTimes => {
                "Payment password entered incorrectly too many times"
            }
            ResponseCode::Other => "Other error reported by the gateway",
            ResponseCode::Unknown(_) => Self::UNKNOWN_MESSAGE,
        }
    }

    pub fn category(&self) -> ResponseCategory {
        match self {
            ResponseCode::Success => ResponseCategory::Success,
            ResponseCode::SuspectedFraud => ResponseCategory::Suspicious,
            ResponseCode::CancelledByCustomer => ResponseCategory::CustomerCancelled,
            ResponseCode::PaymentTimeout => ResponseCategory::Timeout,
            ResponseCode::BankMaintenance => ResponseCategory::Unavailable,
            ResponseCode::NotRegisteredForInternetBanking
            | ResponseCode::AuthenticationFailedTooManyTimes
            | ResponseCode::AccountLocked
            | ResponseCode::WrongOtp
            | ResponseCode::InsufficientBalance
            | ResponseCode::DailyLimitExceeded
            | ResponseCode::WrongPasswordTooManyTimes
            | ResponseCode::Other => ResponseCategory::Declined,
            ResponseCode::Unknown(_) => ResponseCategory::Unknown,
        }
    }

    /// Only `00` counts as a completed payment.
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseCode::Success)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ResponseCode::Unknown(_))
    }
}
