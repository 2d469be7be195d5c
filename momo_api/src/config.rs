use std::{env, time::Duration};

use log::*;

use crate::{Environment, Secret};

/// Credentials for one MoMo product (collection or disbursement), or just the subscription key for the sandbox
/// provisioning API.
///
/// Everything except the callback URI is fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct ProductConfig {
    subscription_key: Secret,
    api_user: String,
    api_key: Secret,
    callback_uri: String,
}

impl ProductConfig {
    pub fn new<S: Into<String>>(subscription_key: S, api_user: S, api_key: S, callback_uri: S) -> Self {
        Self {
            subscription_key: Secret::new(subscription_key),
            api_user: api_user.into(),
            api_key: Secret::new(api_key),
            callback_uri: callback_uri.into(),
        }
    }

    pub fn sandbox<S: Into<String>>(subscription_key: S) -> Self {
        Self { subscription_key: Secret::new(subscription_key), ..Default::default() }
    }

    /// Reads `{prefix}_SUBSCRIPTION_KEY`, `{prefix}_API_USER`, `{prefix}_API_KEY` and `{prefix}_CALLBACK_URL`.
    /// Missing values are replaced with empty strings, which the provider will reject.
    pub fn new_from_env_or_default(prefix: &str) -> Self {
        let subscription_key = Secret::new(env_or_warn(&format!("{prefix}_SUBSCRIPTION_KEY")));
        let api_user = env_or_warn(&format!("{prefix}_API_USER"));
        let api_key = Secret::new(env_or_warn(&format!("{prefix}_API_KEY")));
        let callback_uri = env::var(format!("{prefix}_CALLBACK_URL")).unwrap_or_else(|_| {
            debug!("{prefix}_CALLBACK_URL not set. No X-Callback-Url header will be sent.");
            String::default()
        });
        Self { subscription_key, api_user, api_key, callback_uri }
    }

    pub fn subscription_key(&self) -> &Secret {
        &self.subscription_key
    }

    pub fn api_user(&self) -> &str {
        self.api_user.as_str()
    }

    pub fn api_key(&self) -> &Secret {
        &self.api_key
    }

    pub fn callback_uri(&self) -> &str {
        self.callback_uri.as_str()
    }

    /// False when any of the credentials needed for a token request is missing.
    pub fn has_credentials(&self) -> bool {
        !(self.subscription_key.is_empty() || self.api_user.is_empty() || self.api_key.is_empty())
    }

    /// The callback URI to advertise, if one is configured.
    pub fn callback(&self) -> Option<&str> {
        Some(self.callback_uri.as_str()).filter(|s| !s.is_empty())
    }

    pub fn set_callback_uri<S: Into<String>>(&mut self, callback_uri: S) -> &mut Self {
        self.callback_uri = callback_uri.into();
        self
    }
}

/// Everything needed to talk to MoMo, as read from the environment by `momotools`.
#[derive(Debug, Clone, Default)]
pub struct MomoConfig {
    pub environment: Environment,
    /// Replaces the host derived from `environment`, e.g. for a local stub.
    pub base_url: Option<String>,
    /// Passed straight through to the HTTP client. `None` means no timeout.
    pub timeout: Option<Duration>,
    pub collection: ProductConfig,
    pub disbursement: ProductConfig,
    pub sandbox: ProductConfig,
}

impl MomoConfig {
    pub fn new_from_env_or_default() -> Self {
        let environment = env::var("MOMO_ENVIRONMENT").map(|s| Environment::from(s.as_str())).unwrap_or_else(|_| {
            warn!("MOMO_ENVIRONMENT not set, using sandbox as default");
            Environment::Sandbox
        });
        let base_url = env::var("MOMO_BASE_URL").ok().filter(|s| !s.is_empty());
        let timeout = env::var("MOMO_HTTP_TIMEOUT_SECS").ok().and_then(|s| match s.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                warn!("{s} is not a valid value for MOMO_HTTP_TIMEOUT_SECS. {e}. No timeout will be applied.");
                None
            },
        });
        let collection = ProductConfig::new_from_env_or_default("MOMO_COLLECTION");
        let disbursement = ProductConfig::new_from_env_or_default("MOMO_DISBURSEMENT");
        let sandbox_key = env::var("MOMO_SANDBOX_SUBSCRIPTION_KEY").unwrap_or_else(|_| {
            debug!("MOMO_SANDBOX_SUBSCRIPTION_KEY not set, using the collection subscription key");
            collection.subscription_key().reveal().to_string()
        });
        let sandbox = ProductConfig::sandbox(sandbox_key);
        Self { environment, base_url, timeout, collection, disbursement, sandbox }
    }
}

fn env_or_warn(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| {
        warn!("{name} not set, using an empty value");
        String::default()
    })
}
