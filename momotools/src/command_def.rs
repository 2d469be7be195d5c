use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use momo_api::DEFAULT_CURRENCY;

#[derive(Debug, Subcommand)]
pub enum SandboxCommand {
    /// Creates a new API user with a random id and issues its API key. Put the printed values in MOMO_*_API_USER and
    /// MOMO_*_API_KEY.
    Provision {
        #[arg(required = true, index = 1)]
        /// The host the provider will send callbacks to, e.g. `shop.example.com`
        callback_host: String,
    },
    #[command(name = "create-user")]
    /// Registers an API user. A random id is generated when none is given.
    CreateUser {
        #[arg(required = true, index = 1)]
        callback_host: String,
        #[arg(short = 'i', long = "id")]
        id: Option<String>,
    },
    /// Fetch the provider's record of an API user
    User {
        #[arg(required = true, index = 1)]
        id: String,
    },
    #[command(name = "api-key")]
    /// Issue a new API key for an existing API user
    ApiKey {
        #[arg(required = true, index = 1)]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// Request a new access token
    Token,
    /// Ask a consumer to pay. Prints the reference id of the request.
    Pay(TransferParams),
    /// Fetch the status of a payment request
    Status {
        #[arg(required = true, index = 1)]
        reference_id: String,
    },
    /// Fetch the collection account balance
    Balance,
}

#[derive(Debug, Subcommand)]
pub enum DisbursementCommand {
    /// Request a new access token
    Token,
    /// Deposit money into a consumer's account
    Deposit(TransferParams),
    /// Transfer money to a consumer
    Transfer(TransferParams),
    /// Refund a previous collection, in full or in part
    Refund(RefundParams),
    /// Fetch the status of a deposit, transfer or refund
    Status {
        #[arg(value_enum, required = true, index = 1)]
        kind: DisbursementKind,
        #[arg(required = true, index = 2)]
        reference_id: String,
    },
    /// Fetch the disbursement account balance
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DisbursementKind {
    Deposit,
    Transfer,
    Refund,
}

#[derive(Debug, Args)]
pub struct TransferParams {
    /// The amount, as a decimal string. It is sent to the provider unchanged.
    #[arg(required = true, index = 1, value_parser = parse_amount)]
    pub amount: String,
    /// The consumer's phone number (MSISDN)
    #[arg(required = true, index = 2)]
    pub phone: String,
    /// Your own reference for the transaction
    #[arg(required = true, index = 3)]
    pub external_id: String,
    #[arg(short = 'c', long = "currency", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
    /// Shown to the payer
    #[arg(short = 'm', long = "message", default_value = "")]
    pub payer_message: String,
    /// Shown to the payee
    #[arg(short = 'n', long = "note", default_value = "")]
    pub payee_note: String,
}

#[derive(Debug, Args)]
pub struct RefundParams {
    #[arg(required = true, index = 1, value_parser = parse_amount)]
    pub amount: String,
    /// The reference id of the collection being refunded
    #[arg(required = true, index = 2)]
    pub reference_id_to_refund: String,
    #[arg(required = true, index = 3)]
    pub external_id: String,
    #[arg(short = 'c', long = "currency", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
    #[arg(short = 'm', long = "message", default_value = "")]
    pub payer_message: String,
    #[arg(short = 'n', long = "note", default_value = "")]
    pub payee_note: String,
}

fn parse_amount(s: &str) -> Result<String> {
    let value = s.parse::<f64>().map_err(|e| anyhow!("'{s}' is not a valid amount. {e}"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(anyhow!("The amount must be positive, not {s}"));
    }
    Ok(s.to_string())
}
