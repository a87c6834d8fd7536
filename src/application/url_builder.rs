use crate::config::GatewayConfig;
use crate::domain::params::ParamValue;
use crate::domain::payment::{ClientIp, PaymentRequest};
use crate::error::{GatewayError, Result};
use crate::protocol::canonical::CanonicalQuery;
use crate::protocol::fields;
use crate::protocol::signer::Signer;
use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use tracing::debug;

/// Builds signed redirect URLs for the gateway's payment page.
///
/// Construction validates the configuration, so a builder that exists can
/// always sign. The builder holds no mutable state and can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct PaymentUrlBuilder {
    merchant_code: String,
    gateway_base_url: String,
    return_url: String,
    expire_after: Option<Duration>,
    signer: Signer,
}

impl PaymentUrlBuilder {
    /// Fails with [`GatewayError::Configuration`] if the merchant code,
    /// secret, gateway URL or return URL is missing.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let merchant_code = config.merchant_code()?.to_string();
        let signer = Signer::new(config.secret_key()?)?;
        Ok(Self {
            merchant_code,
            gateway_base_url: config.gateway_base_url()?.to_string(),
            return_url: config.return_url()?.to_string(),
            expire_after: config.expire_after(),
            signer,
        })
    }

    /// Signed URL stamped with the current gateway time.
    pub fn create_payment_url(&self, request: &PaymentRequest) -> Result<String> {
        self.create_payment_url_at(request, Utc::now())
    }

    /// Signed URL stamped with `created_at`. Same inputs give the same URL.
    pub fn create_payment_url_at<Tz: TimeZone>(
        &self,
        request: &PaymentRequest,
        created_at: DateTime<Tz>,
    ) -> Result<String> {
        let params = self.payment_params(request, created_at)?;
        let canonical = CanonicalQuery::from_params(params)?;
        let signature = self.signer.sign(&canonical);

        debug!(
            order_id = %request.order_id,
            merchant = %self.merchant_code,
            key = %self.signer.masked_key(),
            "created payment URL"
        );

        Ok(format!(
            "{}?{}&{}={}",
            self.gateway_base_url,
            canonical,
            fields::SECURE_HASH,
            signature
        ))
    }

    /// The unsigned parameter set sent to the gateway for `request`.
    pub fn payment_params<Tz: TimeZone>(
        &self,
        request: &PaymentRequest,
        created_at: DateTime<Tz>,
    ) -> Result<Vec<(&'static str, ParamValue)>> {
        request.validate()?;
        let ip = ClientIp::normalize(&request.client_ip)?;
        let created_at = created_at.with_timezone(&gateway_offset()?);
        let expire_at = self.expire_after.map(|window| created_at + window);

        let order_type = request
            .order_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(fields::DEFAULT_ORDER_TYPE);

        Ok(vec![
            (fields::VERSION, fields::PROTOCOL_VERSION.into()),
            (fields::COMMAND, fields::PAY_COMMAND.into()),
            (fields::TMN_CODE, self.merchant_code.as_str().into()),
            (fields::LOCALE, request.locale.as_str().into()),
            (fields::CURR_CODE, fields::CURRENCY_VND.into()),
            (fields::TXN_REF, request.order_id.as_str().into()),
            (fields::ORDER_INFO, request.order_description.as_str().into()),
            (fields::ORDER_TYPE, order_type.into()),
            (fields::AMOUNT, request.amount.to_minor_units()?.into()),
            (fields::RETURN_URL, self.return_url.as_str().into()),
            (fields::IP_ADDR, ip.as_str().into()),
            (fields::CREATE_DATE, format_timestamp(&created_at).into()),
            (fields::EXPIRE_DATE, expire_at.as_ref().map(format_timestamp).into()),
            (fields::BANK_CODE, request.bank_code.as_deref().into()),
        ])
    }
}

/// Convenience entry point: validates `config` and signs one request.
pub fn create_payment_url(config: &GatewayConfig, request: &PaymentRequest) -> Result<String> {
    PaymentUrlBuilder::new(config)?.create_payment_url(request)
}

/// The gateway's fixed GMT+7 clock.
pub fn gateway_offset() -> Result<FixedOffset> {
    FixedOffset::east_opt(fields::GATEWAY_UTC_OFFSET_SECS).ok_or_else(|| {
        GatewayError::Configuration("invalid gateway UTC offset".to_string())
    })
}

/// `YYYYMMDDHHMMSS` in the timestamp's own offset.
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.format(fields::TIMESTAMP_FORMAT).to_string()
}
