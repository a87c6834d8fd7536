use chrono::{NaiveDateTime, TimeZone};
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vnpay_gateway::application::ipn::IpnHandler;
use vnpay_gateway::application::url_builder::{PaymentUrlBuilder, gateway_offset};
use vnpay_gateway::application::verifier::CallbackVerifier;
use vnpay_gateway::config::GatewayConfig;
use vnpay_gateway::domain::payment::{Amount, Locale, PaymentRequest};
use vnpay_gateway::error::GatewayError;
use vnpay_gateway::infrastructure::in_memory::InMemoryOrderLedger;
use vnpay_gateway::interfaces::csv::order_reader::OrderReader;
use vnpay_gateway::interfaces::query::parse_query;
use vnpay_gateway::protocol::fields::TIMESTAMP_FORMAT;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    gateway: GatewayArgs,

    #[command(subcommand)]
    command: Command,
}

/// Overrides for the VNPAY_* environment variables.
#[derive(Args)]
struct GatewayArgs {
    /// Merchant terminal code (VNPAY_TMN_CODE)
    #[arg(long, global = true)]
    tmn_code: Option<String>,

    /// Shared hash secret (VNPAY_HASH_SECRET)
    #[arg(long, global = true)]
    hash_secret: Option<String>,

    /// Payment page URL (VNPAY_URL)
    #[arg(long, global = true)]
    gateway_url: Option<String>,

    /// Browser return URL (VNPAY_RETURN_URL)
    #[arg(long, global = true)]
    return_url: Option<String>,

    /// Minutes before the payment page expires (VNPAY_EXPIRE_MINUTES)
    #[arg(long, global = true)]
    expire_minutes: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Print a signed payment URL for one order
    PayUrl {
        #[arg(long)]
        order_id: String,

        /// Amount in VND
        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        description: String,

        /// Client IP address; IPv6 loopback is sent as 127.0.0.1
        #[arg(long)]
        ip: String,

        #[arg(long)]
        bank_code: Option<String>,

        #[arg(long, default_value = "vn")]
        locale: Locale,

        /// Creation time in gateway time, YYYYMMDDHHMMSS (defaults to now)
        #[arg(long)]
        created_at: Option<String>,
    },
    /// Verify a callback query string and print the result as JSON
    Verify {
        /// Query string or full return URL; `-` reads stdin
        query: String,
    },
    /// Answer an IPN against orders loaded from a CSV export
    Ipn {
        /// CSV with columns order_id, amount, status
        #[arg(long)]
        orders: PathBuf,

        /// Query string or full IPN URL; `-` reads stdin
        query: String,
    },
}

impl GatewayArgs {
    fn into_config(self) -> Result<GatewayConfig> {
        let mut config = GatewayConfig::from_env()?;
        if let Some(code) = self.tmn_code {
            config = config.with_merchant_code(code);
        }
        if let Some(secret) = self.hash_secret {
            config = config.with_secret_key(secret);
        }
        if let Some(url) = self.gateway_url {
            config = config.with_gateway_base_url(url);
        }
        if let Some(url) = self.return_url {
            config = config.with_return_url(url);
        }
        match self.expire_minutes {
            Some(0) => {
                return Err(GatewayError::Configuration(
                    "--expire-minutes must be positive".to_string(),
                )
                .into());
            }
            Some(minutes) => {
                config = config.with_expire_after(chrono::Duration::minutes(i64::from(minutes)));
            }
            None => {}
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("vnpay_gateway=info,vnpay=info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.gateway.into_config()?;

    match cli.command {
        Command::PayUrl {
            order_id,
            amount,
            description,
            ip,
            bank_code,
            locale,
            created_at,
        } => {
            let builder = PaymentUrlBuilder::new(&config)?;
            let mut request = PaymentRequest::new(order_id, Amount::new(amount)?, description, ip)
                .with_locale(locale);
            if let Some(bank_code) = bank_code {
                request = request.with_bank_code(bank_code);
            }

            let url = match created_at {
                Some(raw) => {
                    let naive = NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
                        .map_err(|e| GatewayError::Validation(format!("invalid --created-at '{raw}': {e}")))?;
                    let created_at = gateway_offset()?
                        .from_local_datetime(&naive)
                        .single()
                        .ok_or_else(|| GatewayError::Validation(format!("ambiguous --created-at '{raw}'")))?;
                    builder.create_payment_url_at(&request, created_at)?
                }
                None => builder.create_payment_url(&request)?,
            };
            println!("{url}");
        }
        Command::Verify { query } => {
            let verifier = CallbackVerifier::new(&config)?;
            let params = parse_query(&read_input(query)?)?;
            let result = verifier.verify_callback(&params)?;
            println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
        }
        Command::Ipn { orders, query } => {
            let verifier = CallbackVerifier::new(&config)?;
            let ledger = InMemoryOrderLedger::new();

            let file = File::open(orders).into_diagnostic()?;
            for order in OrderReader::new(file).orders() {
                match order {
                    Ok(order) => ledger.upsert(order).await,
                    Err(e) => warn!(error = %e, "skipping unreadable order row"),
                }
            }

            let params = parse_query(&read_input(query)?)?;
            let handler = IpnHandler::new(verifier, Box::new(ledger));
            let decision = handler.handle(&params).await;
            if let Some(settlement) = &decision.settlement {
                info!(
                    order_id = %settlement.order_id,
                    outcome = ?settlement.outcome,
                    "order should be settled"
                );
            }
            println!(
                "{}",
                serde_json::to_string(&decision.acknowledgement).into_diagnostic()?
            );
        }
    }

    Ok(())
}

fn read_input(arg: String) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).into_diagnostic()?;
        Ok(buf)
    } else {
        Ok(arg)
    }
}
