use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use uuid::Uuid;

use crate::{AccessToken, Environment, MomoApiError, Secret};

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const TARGET_ENVIRONMENT_HEADER: &str = "X-Target-Environment";
pub const REFERENCE_ID_HEADER: &str = "X-Reference-Id";
pub const CALLBACK_URL_HEADER: &str = "X-Callback-Url";

/// A fresh, random (v4) reference id in lowercase hyphenated form.
pub fn new_reference_id() -> String {
    Uuid::new_v4().to_string()
}

/// Escapes a caller-supplied id so it always lands in the URL as exactly one path segment.
pub fn path_segment(id: &str) -> String {
    match id {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        other => urlencoding::encode(other).into_owned(),
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, MomoApiError> {
    HeaderValue::from_str(value).map_err(|e| MomoApiError::InvalidHeader(format!("{name}: {e}")))
}

/// Headers sent on every call, authenticated or not.
pub fn subscription_headers(subscription_key: &Secret) -> Result<HeaderMap, MomoApiError> {
    let mut headers = HeaderMap::with_capacity(6);
    let mut key = header_value(SUBSCRIPTION_KEY_HEADER, subscription_key.reveal())?;
    key.set_sensitive(true);
    headers.insert(SUBSCRIPTION_KEY_HEADER, key);
    Ok(headers)
}

/// Headers for a bearer-authenticated business call.
pub fn auth_headers(
    subscription_key: &Secret,
    environment: &Environment,
    token: &AccessToken,
) -> Result<HeaderMap, MomoApiError> {
    let mut headers = subscription_headers(subscription_key)?;
    headers.insert(TARGET_ENVIRONMENT_HEADER, header_value(TARGET_ENVIRONMENT_HEADER, environment.as_str())?);
    let mut bearer = header_value("Authorization", &format!("Bearer {}", token.access_token))?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Adds the JSON content headers.
pub fn with_json_headers(mut headers: HeaderMap) -> HeaderMap {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Headers for a create-style POST (request-to-pay, deposit, transfer, refund). `X-Callback-Url` is only added when
/// `callback` is `Some` and non-empty.
pub fn create_headers(
    subscription_key: &Secret,
    environment: &Environment,
    token: &AccessToken,
    reference_id: &str,
    callback: Option<&str>,
) -> Result<HeaderMap, MomoApiError> {
    let mut headers = with_json_headers(auth_headers(subscription_key, environment, token)?);
    headers.insert(REFERENCE_ID_HEADER, header_value(REFERENCE_ID_HEADER, reference_id)?);
    if let Some(url) = callback.filter(|s| !s.is_empty()) {
        headers.insert(CALLBACK_URL_HEADER, header_value(CALLBACK_URL_HEADER, url)?);
    }
    Ok(headers)
}

#[cfg(test)]
mod test {
    use super::*;

    fn token() -> AccessToken {
        AccessToken { access_token: "testToken".into(), token_type: "Bearer".into(), expires_in: 3600 }
    }

    #[test]
    fn reference_ids_are_v4() {
        let re = regex::Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$").unwrap();
        let a = new_reference_id();
        let b = new_reference_id();
        assert!(re.is_match(&a), "{a}");
        assert!(re.is_match(&b), "{b}");
        assert_ne!(a, b);
    }

    #[test]
    fn ids_become_a_single_segment() {
        let id = "f1db2d9e-8c4e-4b6a-9a68-2f1d2a7c9e51";
        assert_eq!(path_segment(id), id);
        assert_eq!(path_segment("../account/balance?x="), "..%2Faccount%2Fbalance%3Fx%3D");
        assert_eq!(path_segment("a#b c"), "a%23b%20c");
        assert_eq!(path_segment(".."), "%2E%2E");
        assert_eq!(path_segment("."), "%2E");
    }

    #[test]
    fn business_headers() {
        let key = Secret::from("sub");
        let headers = auth_headers(&key, &Environment::MtnCongo, &token()).unwrap();
        assert_eq!(headers.get("ocp-apim-subscription-key").unwrap(), "sub");
        assert_eq!(headers.get(TARGET_ENVIRONMENT_HEADER).unwrap(), "mtncongo");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer testToken");
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert!(headers.get(REFERENCE_ID_HEADER).is_none());
    }

    #[test]
    fn callback_header_is_optional() {
        let key = Secret::from("sub");
        let env = Environment::Sandbox;
        let headers = create_headers(&key, &env, &token(), "ref", None).unwrap();
        assert!(headers.get(CALLBACK_URL_HEADER).is_none());
        let headers = create_headers(&key, &env, &token(), "ref", Some("")).unwrap();
        assert!(headers.get(CALLBACK_URL_HEADER).is_none());
        let headers = create_headers(&key, &env, &token(), "ref", Some("https://shop.example/cb")).unwrap();
        assert_eq!(headers.get(CALLBACK_URL_HEADER).unwrap(), "https://shop.example/cb");
        assert_eq!(headers.get(REFERENCE_ID_HEADER).unwrap(), "ref");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn invalid_header_values_are_rejected() {
        let key = Secret::from("bad\nkey");
        let err = subscription_headers(&key).unwrap_err();
        assert!(matches!(err, MomoApiError::InvalidHeader(_)));
    }
}
