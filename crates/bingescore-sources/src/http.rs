//! Request plumbing shared by every provider client.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::trace;

use crate::error::SourceError;

const MAX_ERROR_BODY: usize = 200;

/// Build the HTTP client a provider uses for all of its calls
pub fn create_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bingescore/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Send a request and decode a JSON body, mapping every failure to a [`SourceError`]
pub async fn get_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|e| SourceError::from_reqwest(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        let mut error_text = response.text().await.unwrap_or_default();
        if let Some((cut, _)) = error_text.char_indices().nth(MAX_ERROR_BODY) {
            error_text.truncate(cut);
        }
        return Err(SourceError::Status {
            provider,
            status: status.as_u16(),
            message: error_text,
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SourceError::from_reqwest(provider, e))?;
    trace!("{} response: {} bytes", provider, body.len());

    serde_json::from_slice(&body).map_err(|e| SourceError::Decode {
        provider,
        message: e.to_string(),
    })
}

/// Treat empty strings from upstream payloads as missing
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_status_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
            .mount(&server)
            .await;

        let client = create_client(Duration::from_secs(5));
        let result: Result<serde_json::Value, _> =
            get_json("tmdb", client.get(format!("{}/missing", server.uri()))).await;

        let err = result.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
            .mount(&server)
            .await;

        let client = create_client(Duration::from_secs(5));
        let result: Result<Vec<u32>, _> =
            get_json("trakt", client.get(format!("{}/list", server.uri()))).await;

        assert!(matches!(result, Err(SourceError::Decode { provider: "trakt", .. })));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some("Pilot".to_string())), Some("Pilot".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
