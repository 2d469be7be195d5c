use log::*;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{
    error::error_from_response,
    helpers::subscription_headers,
    transport::{ApiRequest, HttpTransport},
    MomoApiError,
    ProductConfig,
};

/// A bearer token issued by a product's `/token/` endpoint.
///
/// Tokens are fetched fresh for every authenticated call and are never stored, so `expires_in` is informational.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"****")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Exchanges the product's API user and key for a bearer token.
///
/// `url` is the full token endpoint, e.g. `https://sandbox.momodeveloper.mtn.com/collection/token/`. Success is exactly
/// HTTP 200; every other status is mapped with [`error_from_response`].
pub async fn request_access_token<T: HttpTransport>(
    client: &T,
    url: String,
    config: &ProductConfig,
) -> Result<AccessToken, MomoApiError> {
    let headers = subscription_headers(config.subscription_key())?;
    let request =
        ApiRequest::new(Method::POST, url, headers).with_basic_auth(config.api_user(), config.api_key().reveal());
    trace!("Requesting access token for API user {}", config.api_user());
    let response = client.execute(request).await?;
    if response.status == 200 {
        let token = response.json::<AccessToken>()?;
        debug!("Access token issued. Expires in {}s", token.expires_in);
        Ok(token)
    } else {
        warn!("Token request failed with status {}", response.status);
        Err(error_from_response(response.status, &response.body))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test::mocks::MockTransport, transport::ApiResponse};

    const TOKEN_T: &str = r#"{"access_token":"T","token_type":"Bearer","expires_in":3600}"#;

    fn config() -> ProductConfig {
        ProductConfig::new("sub-key", "api-user", "api-key", "")
    }

    #[test]
    fn parse_token_fixture() {
        let token: AccessToken = serde_json::from_str(include_str!("./test_assets/token_success.json")).unwrap();
        assert!(token.access_token.starts_with("eyJ"));
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
        assert!(!format!("{token:?}").contains("eyJ"));
    }

    #[tokio::test]
    async fn token_request_uses_basic_auth() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                req.method == Method::POST
                    && req.url == "https://sandbox.momodeveloper.mtn.com/collection/token/"
                    && req.basic_auth == Some(("api-user".to_string(), "api-key".to_string()))
                    && req.header("Ocp-Apim-Subscription-Key") == Some("sub-key")
                    && req.header("X-Target-Environment").is_none()
                    && req.header("Authorization").is_none()
                    && req.body.is_none()
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, TOKEN_T)));
        let url = "https://sandbox.momodeveloper.mtn.com/collection/token/".to_string();
        let token = request_access_token(&transport, url, &config()).await.unwrap();
        assert_eq!(token.access_token, "T");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);
    }

    #[tokio::test]
    async fn token_failure_is_mapped() {
        let mut transport = MockTransport::new();
        transport.expect_execute().times(1).returning(|_| {
            let body = r#"{"statusCode":401,"message":"Access denied due to invalid subscription key."}"#;
            Ok(ApiResponse::new(401, body))
        });
        let err = request_access_token(&transport, "http://localhost/collection/token/".into(), &config())
            .await
            .unwrap_err();
        assert!(matches!(err, MomoApiError::InvalidSubscriptionKey(ref m) if m.starts_with("Access denied")));
    }

    #[tokio::test]
    async fn token_server_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(500, r#"{"message":"Something went wrong"}"#)));
        let url = "http://localhost/collection/token/".to_string();
        let err = request_access_token(&transport, url, &config()).await.unwrap_err();
        assert!(matches!(err, MomoApiError::InternalServerError(ref m) if m == "Something went wrong"));
        assert_eq!(err.status_code(), Some(500));
    }

    #[tokio::test]
    async fn only_200_is_success() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(202, r#"{"access_token":"T","token_type":"Bearer","expires_in":1}"#)));
        let url = "http://localhost/disbursement/token/".to_string();
        let err = request_access_token(&transport, url, &config()).await.unwrap_err();
        assert!(matches!(err, MomoApiError::QueryError { status: 202, .. }));
    }
}
