use std::sync::Arc;

use log::*;
use reqwest::{header::HeaderValue, Method};
use serde_json::{json, Map, Value};

use crate::{
    error::error_from_response,
    helpers::{new_reference_id, path_segment, subscription_headers, with_json_headers, REFERENCE_ID_HEADER},
    transport::{ApiRequest, ApiResponse, HttpTransport},
    MomoApiError,
    ProductConfig,
};

/// Sandbox user provisioning. These calls only carry the subscription key: there is no bearer token and no target
/// environment.
pub struct SandboxApi<T> {
    client: Arc<T>,
    base_url: String,
    config: ProductConfig,
}

impl<T> Clone for SandboxApi<T> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client), base_url: self.base_url.clone(), config: self.config.clone() }
    }
}

impl<T: HttpTransport> SandboxApi<T> {
    pub(crate) fn new(client: Arc<T>, base_url: String, config: ProductConfig) -> Self {
        Self { client, base_url, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Registers `api_user_id` with the provider. The id is sent as-is; the provider rejects anything that is not a
    /// UUID with a 400.
    pub async fn create_api_user(&self, api_user_id: &str, callback_host: &str) -> Result<String, MomoApiError> {
        let mut headers = with_json_headers(subscription_headers(self.config.subscription_key())?);
        let reference = HeaderValue::from_str(api_user_id)
            .map_err(|e| MomoApiError::InvalidHeader(format!("{REFERENCE_ID_HEADER}: {e}")))?;
        headers.insert(REFERENCE_ID_HEADER, reference);
        let body = json!({ "providerCallbackHost": callback_host });
        let request = ApiRequest::new(Method::POST, self.url("/v1_0/apiuser"), headers).with_json(body);
        debug!("POST /v1_0/apiuser [{api_user_id}]");
        let response = self.client.execute(request).await?;
        match response.status {
            201 => {
                info!("Sandbox API user {api_user_id} created");
                Ok(api_user_id.to_string())
            },
            status => Err(error_from_response(status, &response.body)),
        }
    }

    /// The provider's record of the API user, e.g. `providerCallbackHost` and `targetEnvironment`.
    pub async fn api_user(&self, api_user_id: &str) -> Result<Map<String, Value>, MomoApiError> {
        let headers = subscription_headers(self.config.subscription_key())?;
        let url = self.url(&format!("/v1_0/apiuser/{}", path_segment(api_user_id)));
        let request = ApiRequest::new(Method::GET, url, headers);
        debug!("GET /v1_0/apiuser/{api_user_id}");
        let response = self.client.execute(request).await?;
        match response.status {
            200 => response.json(),
            status => Err(error_from_response(status, &response.body)),
        }
    }

    pub async fn create_api_key(&self, api_user_id: &str) -> Result<String, MomoApiError> {
        let headers = subscription_headers(self.config.subscription_key())?;
        let url = self.url(&format!("/v1_0/apiuser/{}/apikey", path_segment(api_user_id)));
        debug!("POST /v1_0/apiuser/{api_user_id}/apikey");
        let response = self.client.execute(ApiRequest::new(Method::POST, url, headers)).await?;
        match response.status {
            201 => {
                let key = api_key_from(&response)?;
                info!("API key issued for sandbox user {api_user_id}");
                Ok(key)
            },
            status => Err(error_from_response(status, &response.body)),
        }
    }

    /// Creates a new API user under a random id and issues its key. Returns `(api_user_id, api_key)`.
    pub async fn provision_api_user(&self, callback_host: &str) -> Result<(String, String), MomoApiError> {
        let api_user_id = self.create_api_user(&new_reference_id(), callback_host).await?;
        let api_key = self.create_api_key(&api_user_id).await?;
        Ok((api_user_id, api_key))
    }
}

fn api_key_from(response: &ApiResponse) -> Result<String, MomoApiError> {
    let value = response.json::<Value>()?;
    match value["apiKey"].as_str() {
        Some(key) => Ok(key.to_string()),
        None => Err(MomoApiError::QueryError { status: response.status, message: response.body.clone() }),
    }
}
