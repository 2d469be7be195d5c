mod collection;
mod disbursement;
mod sandbox;

use std::sync::Arc;

pub use collection::CollectionApi;
pub use disbursement::DisbursementApi;
use log::*;
use reqwest::Method;
pub use sandbox::SandboxApi;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::error_from_response,
    helpers::{auth_headers, create_headers, new_reference_id},
    token::request_access_token,
    transport::{ApiRequest, ApiResponse, HttpTransport},
    AccessToken,
    AccountBalance,
    Environment,
    MomoApiError,
    ProductConfig,
    Transaction,
};

/// The request plumbing shared by the collection and disbursement products. `product` is the path prefix, e.g.
/// `collection`.
pub(crate) struct ProductClient<T> {
    client: Arc<T>,
    base_url: String,
    environment: Environment,
    config: ProductConfig,
    product: &'static str,
}

impl<T> Clone for ProductClient<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            base_url: self.base_url.clone(),
            environment: self.environment.clone(),
            config: self.config.clone(),
            product: self.product,
        }
    }
}

impl<T: HttpTransport> ProductClient<T> {
    pub fn new(
        client: Arc<T>,
        base_url: String,
        environment: Environment,
        config: ProductConfig,
        product: &'static str,
    ) -> Self {
        Self { client, base_url, environment, config, product }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}{path}", self.base_url, self.product)
    }

    pub fn config(&self) -> &ProductConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ProductConfig {
        &mut self.config
    }

    pub async fn access_token(&self) -> Result<AccessToken, MomoApiError> {
        request_access_token(self.client.as_ref(), self.url("/token/"), &self.config).await
    }

    /// POSTs `body` under a freshly generated reference id and returns that id. The provider answers 202 with no body.
    pub async fn create(&self, path: &str, body: Value) -> Result<String, MomoApiError> {
        let reference_id = new_reference_id();
        let token = self.access_token().await?;
        let headers = create_headers(
            self.config.subscription_key(),
            &self.environment,
            &token,
            &reference_id,
            self.config.callback(),
        )?;
        let request = ApiRequest::new(Method::POST, self.url(path), headers).with_json(body);
        debug!("POST /{}{path} [{reference_id}]", self.product);
        let response = self.client.execute(request).await?;
        match response.status {
            202 => {
                info!("/{}{path} accepted with reference id {reference_id}", self.product);
                Ok(reference_id)
            },
            status => Err(error_from_response(status, &response.body)),
        }
    }

    /// Authenticated GET where 200 is the only success.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, MomoApiError> {
        let response = self.get_raw(path).await?;
        match response.status {
            200 => response.json(),
            status => Err(error_from_response(status, &response.body)),
        }
    }

    /// Status lookup for a previously created transaction. Both 200 and 202 carry a transaction body.
    pub async fn transaction(&self, path: &str) -> Result<Transaction, MomoApiError> {
        let response = self.get_raw(path).await?;
        match response.status {
            200 | 202 => {
                let tx = Transaction::parse(&response.body)?;
                debug!("/{}{path} is {}", self.product, tx.status);
                Ok(tx)
            },
            status => Err(error_from_response(status, &response.body)),
        }
    }

    pub async fn balance(&self) -> Result<AccountBalance, MomoApiError> {
        self.get::<AccountBalance>("/v1_0/account/balance").await
    }

    async fn get_raw(&self, path: &str) -> Result<ApiResponse, MomoApiError> {
        let token = self.access_token().await?;
        let headers = auth_headers(self.config.subscription_key(), &self.environment, &token)?;
        debug!("GET /{}{path}", self.product);
        self.client.execute(ApiRequest::new(Method::GET, self.url(path), headers)).await
    }
}
