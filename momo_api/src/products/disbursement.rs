use std::sync::Arc;

use log::*;

use super::ProductClient;
use crate::{
    helpers::path_segment,
    transport::HttpTransport,
    AccessToken,
    AccountBalance,
    Environment,
    MomoApiError,
    PaymentRequest,
    ProductConfig,
    RefundRequest,
    Transaction,
    TransferRequest,
};

/// Merchant-to-consumer money movement: deposits, transfers and refunds.
///
/// Every create-style call returns the reference id generated for it. The matching `*_status` method takes that id.
pub struct DisbursementApi<T> {
    inner: ProductClient<T>,
}

impl<T> Clone for DisbursementApi<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: HttpTransport> DisbursementApi<T> {
    pub(crate) fn new(client: Arc<T>, base_url: String, environment: Environment, config: ProductConfig) -> Self {
        Self { inner: ProductClient::new(client, base_url, environment, config, "disbursement") }
    }

    pub fn config(&self) -> &ProductConfig {
        self.inner.config()
    }

    pub fn set_callback_uri<S: Into<String>>(&mut self, callback_uri: S) {
        self.inner.config_mut().set_callback_uri(callback_uri);
    }

    /// Fetches a new bearer token from `/disbursement/token/`.
    pub async fn access_token(&self) -> Result<AccessToken, MomoApiError> {
        self.inner.access_token().await
    }

    pub async fn balance(&self) -> Result<AccountBalance, MomoApiError> {
        self.inner.balance().await
    }

    pub async fn deposit(&self, request: &PaymentRequest) -> Result<String, MomoApiError> {
        debug!("Depositing {} {} to {} ({})", request.amount, request.currency, request.payer, request.external_id);
        self.inner.create("/v1_0/deposit", request.to_request_body()).await
    }

    pub async fn deposit_status(&self, reference_id: &str) -> Result<Transaction, MomoApiError> {
        self.inner.transaction(&format!("/v1_0/deposit/{}", path_segment(reference_id))).await
    }

    pub async fn transfer(&self, request: &TransferRequest) -> Result<String, MomoApiError> {
        debug!("Transferring {} {} to {} ({})", request.amount, request.currency, request.payee, request.external_id);
        self.inner.create("/v1_0/transfer", request.to_request_body()).await
    }

    pub async fn transfer_status(&self, reference_id: &str) -> Result<Transaction, MomoApiError> {
        self.inner.transaction(&format!("/v1_0/transfer/{}", path_segment(reference_id))).await
    }

    pub async fn refund(&self, request: &RefundRequest) -> Result<String, MomoApiError> {
        debug!("Refunding {} {} of {}", request.amount, request.currency, request.reference_id_to_refund);
        self.inner.create("/v1_0/refund", request.to_request_body()).await
    }

    pub async fn refund_status(&self, reference_id: &str) -> Result<Transaction, MomoApiError> {
        self.inner.transaction(&format!("/v1_0/refund/{}", path_segment(reference_id))).await
    }
}
