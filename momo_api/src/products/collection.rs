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
    Transaction,
    DEFAULT_CURRENCY,
};

/// Consumer-to-merchant payments: ask a payer to approve a debit, then poll its status.
pub struct CollectionApi<T> {
    inner: ProductClient<T>,
}

impl<T> Clone for CollectionApi<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: HttpTransport> CollectionApi<T> {
    pub(crate) fn new(client: Arc<T>, base_url: String, environment: Environment, config: ProductConfig) -> Self {
        Self { inner: ProductClient::new(client, base_url, environment, config, "collection") }
    }

    pub fn config(&self) -> &ProductConfig {
        self.inner.config()
    }

    /// Changes the callback advertised on subsequent requests. An empty string disables the callback header.
    pub fn set_callback_uri<S: Into<String>>(&mut self, callback_uri: S) {
        self.inner.config_mut().set_callback_uri(callback_uri);
    }

    /// Fetches a new bearer token from `/collection/token/`.
    pub async fn access_token(&self) -> Result<AccessToken, MomoApiError> {
        self.inner.access_token().await
    }

    /// Requests a payment from a consumer. The payer is asked to authorize the debit on their handset, so the
    /// transaction completes asynchronously.
    ///
    /// Returns the reference id generated for the request. Use it with [`Self::payment_status`] to follow the payment.
    pub async fn request_to_pay(&self, request: &PaymentRequest) -> Result<String, MomoApiError> {
        debug!("Requesting {} {} from {} ({})", request.amount, request.currency, request.payer, request.external_id);
        self.inner.create("/v1_0/requesttopay", request.to_request_body()).await
    }

    pub async fn payment_status(&self, reference_id: &str) -> Result<Transaction, MomoApiError> {
        self.inner.transaction(&format!("/v1_0/requesttopay/{}", path_segment(reference_id))).await
    }

    pub async fn balance(&self) -> Result<AccountBalance, MomoApiError> {
        self.inner.balance().await
    }

    /// Shorthand for [`Self::request_to_pay`] with an empty payer message and payee note. The currency falls back to
    /// [`DEFAULT_CURRENCY`].
    pub async fn quick_pay(
        &self,
        amount: &str,
        phone: &str,
        reference: &str,
        currency: Option<&str>,
    ) -> Result<String, MomoApiError> {
        let request = PaymentRequest::new(amount, currency.unwrap_or(DEFAULT_CURRENCY), reference, phone, "", "");
        self.request_to_pay(&request).await
    }
}
