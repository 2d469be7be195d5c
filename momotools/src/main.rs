use clap::{Parser, Subcommand};

mod command_def;
mod command_handler;

use crate::{
    command_def::{CollectionCommand, DisbursementCommand, SandboxCommand},
    command_handler::{handle_collection_command, handle_disbursement_command, handle_sandbox_command},
};

/// Command-line access to the MTN MoMo Open API.
///
/// Credentials are read from the environment (or a `.env` file): MOMO_ENVIRONMENT, MOMO_BASE_URL,
/// MOMO_HTTP_TIMEOUT_SECS, MOMO_COLLECTION_* and MOMO_DISBURSEMENT_* (SUBSCRIPTION_KEY, API_USER, API_KEY,
/// CALLBACK_URL) and MOMO_SANDBOX_SUBSCRIPTION_KEY.
#[derive(Parser, Debug)]
#[command(version, author = "momo_api contributors")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(subcommand)]
    /// Provision sandbox API users and keys
    Sandbox(SandboxCommand),
    #[command(subcommand)]
    /// Request payments from consumers
    Collection(CollectionCommand),
    #[command(subcommand)]
    /// Deposit, transfer and refund money to consumers
    Disbursement(DisbursementCommand),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    match cli.command {
        Command::Sandbox(cmd) => handle_sandbox_command(cmd).await,
        Command::Collection(cmd) => handle_collection_command(cmd).await,
        Command::Disbursement(cmd) => handle_disbursement_command(cmd).await,
    }
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;
    use crate::command_def::DisbursementKind;

    #[test]
    fn command_definitions_are_valid() {
        Arguments::command().debug_assert();
    }

    #[test]
    fn pay_defaults() {
        let args =
            Arguments::try_parse_from(["momotools", "collection", "pay", "1000", "46733123454", "ORDER-1"]).unwrap();
        match args.command {
            Command::Collection(CollectionCommand::Pay(params)) => {
                assert_eq!(params.amount, "1000");
                assert_eq!(params.phone, "46733123454");
                assert_eq!(params.external_id, "ORDER-1");
                assert_eq!(params.currency, "XAF");
                assert_eq!(params.payer_message, "");
            },
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn disbursement_status() {
        let args = Arguments::try_parse_from(["momotools", "disbursement", "status", "refund", "abc"]).unwrap();
        match args.command {
            Command::Disbursement(DisbursementCommand::Status { kind, reference_id }) => {
                assert_eq!(kind, DisbursementKind::Refund);
                assert_eq!(reference_id, "abc");
            },
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn amounts_must_be_positive_numbers() {
        assert!(Arguments::try_parse_from(["momotools", "disbursement", "transfer", "ten", "242", "x"]).is_err());
        assert!(Arguments::try_parse_from(["momotools", "disbursement", "transfer", "-5", "242", "x"]).is_err());
        let args = ["momotools", "disbursement", "transfer", "12.50", "242", "x", "-c", "EUR"];
        let args = Arguments::try_parse_from(args).unwrap();
        assert!(matches!(
            args.command,
            Command::Disbursement(DisbursementCommand::Transfer(ref p)) if p.amount == "12.50" && p.currency == "EUR"
        ));
    }
}
