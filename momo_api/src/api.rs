use std::{sync::Arc, time::Duration};

use log::*;

use crate::{
    products::{CollectionApi, DisbursementApi, SandboxApi},
    transport::{HttpTransport, ReqwestTransport},
    Environment,
    MomoApiError,
    MomoConfig,
    ProductConfig,
};

/// Entry point of the SDK. Picks the provider host for an [`Environment`] and hands out product clients that all share
/// one transport.
pub struct MomoApi<T = ReqwestTransport> {
    environment: Environment,
    base_url: String,
    client: Arc<T>,
}

impl<T> Clone for MomoApi<T> {
    fn clone(&self) -> Self {
        Self {
            environment: self.environment.clone(),
            base_url: self.base_url.clone(),
            client: Arc::clone(&self.client),
        }
    }
}

impl MomoApi<ReqwestTransport> {
    pub fn new(environment: Environment, timeout: Option<Duration>) -> Result<Self, MomoApiError> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(environment, transport))
    }

    pub fn from_config(config: &MomoConfig) -> Result<Self, MomoApiError> {
        let api = Self::new(config.environment.clone(), config.timeout)?;
        match &config.base_url {
            Some(url) => Ok(api.with_base_url(url.as_str())),
            None => Ok(api),
        }
    }
}

impl<T: HttpTransport> MomoApi<T> {
    pub fn with_transport(environment: Environment, transport: T) -> Self {
        let base_url = environment.base_url().to_string();
        debug!("MoMo API targeting {environment} at {base_url}");
        Self { environment, base_url, client: Arc::new(transport) }
    }

    /// Sends every request to `base_url` instead of the environment's host. A trailing slash is ignored.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        info!("MoMo API base URL overridden to {}", self.base_url);
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn collection(&self, config: ProductConfig) -> CollectionApi<T> {
        CollectionApi::new(Arc::clone(&self.client), self.base_url.clone(), self.environment.clone(), config)
    }

    pub fn disbursement(&self, config: ProductConfig) -> DisbursementApi<T> {
        DisbursementApi::new(Arc::clone(&self.client), self.base_url.clone(), self.environment.clone(), config)
    }

    /// The user provisioning API, which only exists in the sandbox.
    pub fn sandbox<S: Into<String>>(&self, subscription_key: S) -> Result<SandboxApi<T>, MomoApiError> {
        if !self.environment.is_sandbox() {
            return Err(MomoApiError::Initialization(format!(
                "The sandbox provisioning API is not available in the {} environment",
                self.environment
            )));
        }
        let config = ProductConfig::sandbox(subscription_key);
        Ok(SandboxApi::new(Arc::clone(&self.client), self.base_url.clone(), config))
    }
}
