use std::time::Duration;

use log::*;
use reqwest::{header::HeaderMap, Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::MomoApiError;

/// A fully-described outgoing call. Product clients build these; a [`HttpTransport`] executes them.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// `(username, password)` for HTTP Basic auth. Only the token endpoints use this.
    pub basic_auth: Option<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: String, headers: HeaderMap) -> Self {
        Self { method, url, headers, basic_auth: None, body: None }
    }

    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.basic_auth = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Convenience accessor for a header value, if it is present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &self.headers)
            .field("basic_auth", &self.basic_auth.as_ref().map(|(user, _)| (user.as_str(), "****")))
            .field("body", &self.body)
            .finish()
    }
}

/// The status and raw body of a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self { status, body: body.into() }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, MomoApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The HTTP seam. Implementations must only report transport-level failures as errors; non-success statuses are
/// returned as ordinary responses so the caller can map them.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, MomoApiError>;
}

/// [`HttpTransport`] backed by a `reqwest` client. Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self, MomoApiError> {
        let mut builder = Client::builder().user_agent(concat!("momo_api/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| MomoApiError::Initialization(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wraps an existing client, e.g. one configured with a proxy or custom TLS roots.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, MomoApiError> {
        let ApiRequest { method, url, headers, basic_auth, body } = request;
        trace!("{method} {url}");
        let mut req = self.client.request(method, url).headers(headers);
        if let Some((username, password)) = basic_auth {
            req = req.basic_auth(username, Some(password));
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        trace!("Response {status} ({} bytes)", body.len());
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod test {
    use reqwest::header::HeaderValue;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_debug_hides_the_password() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Reference-Id", HeaderValue::from_static("abc"));
        let request = ApiRequest::new(Method::POST, "http://localhost/collection/token/".into(), headers)
            .with_basic_auth("api-user", "very-secret")
            .with_json(json!({"a": 1}));
        let printed = format!("{request:?}");
        assert!(printed.contains("api-user"));
        assert!(!printed.contains("very-secret"));
        assert_eq!(request.header("x-reference-id"), Some("abc"));
        assert_eq!(request.header("X-Callback-Url"), None);
    }

    #[test]
    fn response_json() {
        let response = ApiResponse::new(200, r#"{"availableBalance":"1","currency":"EUR"}"#);
        let value = response.json::<Value>().unwrap();
        assert_eq!(value["currency"], "EUR");
        let err = ApiResponse::new(200, "<html>").json::<Value>().unwrap_err();
        assert!(matches!(err, MomoApiError::Json(_)));
    }

    #[test]
    fn client_with_timeout() {
        assert!(ReqwestTransport::new(Some(Duration::from_secs(5))).is_ok());
        assert!(ReqwestTransport::new(None).is_ok());
    }
}
