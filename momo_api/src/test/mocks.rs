use mockall::mock;

use crate::{
    transport::{ApiRequest, ApiResponse, HttpTransport},
    MomoApiError,
};

pub const TEST_TOKEN: &str = r#"{"access_token":"testToken","token_type":"Bearer","expires_in":3600}"#;
pub const UUID_V4: &str = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";

mock! {
    pub Transport {}
    impl HttpTransport for Transport {
        async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, MomoApiError>;
    }
}

/// Expects `times` token requests against `{product}/token/` and answers each with [`TEST_TOKEN`].
pub fn expect_tokens(transport: &mut MockTransport, product: &'static str, times: usize) {
    let suffix = format!("/{product}/token/");
    transport
        .expect_execute()
        .withf(move |req| req.url.ends_with(&suffix))
        .times(times)
        .returning(|_| Ok(ApiResponse::new(200, TEST_TOKEN)));
}

pub fn is_v4_uuid(s: &str) -> bool {
    regex::Regex::new(UUID_V4).map(|re| re.is_match(s)).unwrap_or(false)
}
