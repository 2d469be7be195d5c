use log::*;
use momo_api::{
    MomoApi,
    MomoApiError,
    MomoConfig,
    PaymentRequest,
    ProductConfig,
    RefundRequest,
    Transaction,
    TransferRequest,
};
use serde::Serialize;

use crate::command_def::{
    CollectionCommand,
    DisbursementCommand,
    DisbursementKind,
    RefundParams,
    SandboxCommand,
    TransferParams,
};

fn new_momo_api() -> (MomoApi, MomoConfig) {
    let config = MomoConfig::new_from_env_or_default();
    match MomoApi::from_config(&config) {
        Ok(api) => (api, config),
        Err(e) => {
            eprintln!("Error creating MoMo API client: {e}");
            std::process::exit(1);
        },
    }
}

fn warn_if_unconfigured(product: &str, config: &ProductConfig) {
    if !config.has_credentials() {
        warn!("The {product} credentials are incomplete. Check MOMO_{}_* in your environment.", product.to_uppercase());
    }
}

fn print_json<T: Serialize>(title: &str, value: &T) {
    let json =
        serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Could not represent {title} as JSON. {e}"));
    println!("{title}\n{json}");
}

fn print_transaction(reference_id: &str, result: Result<Transaction, MomoApiError>) {
    match result {
        Ok(tx) => {
            print_json(&format!("Transaction {reference_id} is {}", tx.status), &tx);
            if let Some(reason) = &tx.reason {
                println!("Reason: {reason}");
            }
        },
        Err(e) => eprintln!("Error fetching transaction {reference_id}: {e}"),
    }
}

fn payment_request(params: TransferParams) -> PaymentRequest {
    let TransferParams { amount, phone, external_id, currency, payer_message, payee_note } = params;
    PaymentRequest::new(amount, currency, external_id, phone, payer_message, payee_note)
}

pub async fn handle_sandbox_command(command: SandboxCommand) {
    let (api, config) = new_momo_api();
    let sandbox = match api.sandbox(config.sandbox.subscription_key().reveal()) {
        Ok(sandbox) => sandbox,
        Err(e) => {
            eprintln!("{e}. Set MOMO_ENVIRONMENT=sandbox to use these commands.");
            return;
        },
    };
    match command {
        SandboxCommand::Provision { callback_host } => match sandbox.provision_api_user(&callback_host).await {
            Ok((user, key)) => {
                println!("API user: {user}");
                println!("API key:  {key}");
            },
            Err(e) => eprintln!("Error provisioning a sandbox API user: {e}"),
        },
        SandboxCommand::CreateUser { callback_host, id } => {
            let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
            match sandbox.create_api_user(&id, &callback_host).await {
                Ok(id) => println!("Created API user {id}"),
                Err(e) => eprintln!("Error creating API user {id}: {e}"),
            }
        },
        SandboxCommand::User { id } => match sandbox.api_user(&id).await {
            Ok(user) => print_json(&format!("API user {id}"), &user),
            Err(e) => eprintln!("Error fetching API user {id}: {e}"),
        },
        SandboxCommand::ApiKey { id } => match sandbox.create_api_key(&id).await {
            Ok(key) => println!("API key for {id}: {key}"),
            Err(e) => eprintln!("Error creating an API key for {id}: {e}"),
        },
    }
}

pub async fn handle_collection_command(command: CollectionCommand) {
    let (api, config) = new_momo_api();
    warn_if_unconfigured("collection", &config.collection);
    let collection = api.collection(config.collection);
    match command {
        CollectionCommand::Token => match collection.access_token().await {
            Ok(token) => print_json("Collection access token", &token),
            Err(e) => eprintln!("Error requesting a collection token: {e}"),
        },
        CollectionCommand::Pay(params) => {
            let request = payment_request(params);
            match collection.request_to_pay(&request).await {
                Ok(id) => println!("Payment requested. Reference id: {id}"),
                Err(e) => eprintln!("Error requesting payment for {}: {e}", request.external_id),
            }
        },
        CollectionCommand::Status { reference_id } => {
            print_transaction(&reference_id, collection.payment_status(&reference_id).await)
        },
        CollectionCommand::Balance => match collection.balance().await {
            Ok(balance) => print_json("Collection balance", &balance),
            Err(e) => eprintln!("Error fetching the collection balance: {e}"),
        },
    }
}

pub async fn handle_disbursement_command(command: DisbursementCommand) {
    let (api, config) = new_momo_api();
    warn_if_unconfigured("disbursement", &config.disbursement);
    let disbursement = api.disbursement(config.disbursement);
    match command {
        DisbursementCommand::Token => match disbursement.access_token().await {
            Ok(token) => print_json("Disbursement access token", &token),
            Err(e) => eprintln!("Error requesting a disbursement token: {e}"),
        },
        DisbursementCommand::Deposit(params) => {
            let request = payment_request(params);
            match disbursement.deposit(&request).await {
                Ok(id) => println!("Deposit accepted. Reference id: {id}"),
                Err(e) => eprintln!("Error depositing to {}: {e}", request.payer),
            }
        },
        DisbursementCommand::Transfer(params) => {
            let TransferParams { amount, phone, external_id, currency, payer_message, payee_note } = params;
            let request = TransferRequest::new(amount, currency, external_id, phone, payer_message, payee_note);
            match disbursement.transfer(&request).await {
                Ok(id) => println!("Transfer accepted. Reference id: {id}"),
                Err(e) => eprintln!("Error transferring to {}: {e}", request.payee),
            }
        },
        DisbursementCommand::Refund(params) => {
            let RefundParams { amount, reference_id_to_refund, external_id, currency, payer_message, payee_note } =
                params;
            let request =
                RefundRequest::new(amount, currency, external_id, reference_id_to_refund, payer_message, payee_note);
            match disbursement.refund(&request).await {
                Ok(id) => println!("Refund accepted. Reference id: {id}"),
                Err(e) => eprintln!("Error refunding {}: {e}", request.reference_id_to_refund),
            }
        },
        DisbursementCommand::Status { kind, reference_id } => {
            debug!("Fetching {kind:?} status for {reference_id}");
            let result = match kind {
                DisbursementKind::Deposit => disbursement.deposit_status(&reference_id).await,
                DisbursementKind::Transfer => disbursement.transfer_status(&reference_id).await,
                DisbursementKind::Refund => disbursement.refund_status(&reference_id).await,
            };
            print_transaction(&reference_id, result);
        },
        DisbursementCommand::Balance => match disbursement.balance().await {
            Ok(balance) => print_json("Disbursement balance", &balance),
            Err(e) => eprintln!("Error fetching the disbursement balance: {e}"),
        },
    }
}
