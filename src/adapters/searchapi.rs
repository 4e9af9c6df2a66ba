use crate::domain::model::{SearchRequest, SearchResponse};
use crate::domain::ports::DestinationSource;
use crate::utils::error::{ExploreError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt;

pub const DEFAULT_ENDPOINT: &str = "https://www.searchapi.io/api/v1/search";

/// Bearer token for the provider. Never printed.
#[derive(Clone)]
pub struct ApiCredential(String);

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the key from `var`; unset, empty and whitespace-only values all
    /// count as missing.
    pub fn from_var(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self(key.trim().to_string())),
            _ => Err(ExploreError::MissingConfigError {
                field: var.to_string(),
            }),
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiCredential(***)")
    }
}

pub struct SearchApiClient {
    client: Client,
    endpoint: String,
    credential: ApiCredential,
}

impl SearchApiClient {
    pub fn new(endpoint: impl Into<String>, credential: ApiCredential) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            credential,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DestinationSource for SearchApiClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let params = request.query_params();
        tracing::debug!("Making API request to: {} with {:?}", self.endpoint, params);

        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(self.credential.expose())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ExploreError::ApiError {
                status,
                message: error_message(&body),
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

/// Prefers the provider's JSON `error` field, then the raw body. Empty when
/// neither says anything beyond the status line.
fn error_message(body: &str) -> String {
    let provider_error = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));

    if let Some(message) = provider_error {
        return message;
    }

    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use httpmock::prelude::*;
    use reqwest::StatusCode;

    fn client(server: &MockServer) -> SearchApiClient {
        SearchApiClient::new(server.url("/api/v1/search"), ApiCredential::new("test-key"))
    }

    #[tokio::test]
    async fn test_search_sends_params_and_bearer_token() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/search")
                .header("authorization", "Bearer test-key")
                .query_param("engine", "google_travel_explore")
                .query_param("departure_id", "ZRH")
                .query_param("adults", "1")
                .query_param("time_period", "one_week_trip_in_the_next_six_months")
                .query_param("interests", "popular")
                .query_param("currency", "CHF")
                .query_param("gl", "CH")
                .query_param("hl", "en-US")
                .query_param("travel_class", "economy")
                .query_param("stops", "any");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "search_metadata": {"id": "search_1", "status": "Success"},
                    "destinations": [
                        {"name": "Barcelona", "country": "Spain", "flight": {"price": 89}}
                    ]
                }));
        });

        let response = client(&server)
            .search(&SearchRequest::default())
            .await
            .unwrap();

        api_mock.assert();
        let metadata = response.search_metadata.clone().unwrap();
        assert_eq!(metadata.id.as_deref(), Some("search_1"));
        let destinations = response.into_destinations();
        assert_eq!(destinations.len(), 1);
        assert_eq!(destinations[0].price(), Some(89.0));
    }

    #[tokio::test]
    async fn test_search_forwards_max_price() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/search")
                .query_param("max_price", "250")
                .query_param("stops", "nonstop");
            then.status(200).json_body(serde_json::json!({"destinations": []}));
        });

        let request = SearchRequest {
            max_price: Some(250),
            stops: crate::domain::model::StopPreference::Nonstop,
            ..SearchRequest::default()
        };
        let response = client(&server).search(&request).await.unwrap();

        api_mock.assert();
        assert!(response.into_destinations().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_uses_provider_error_text() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/search");
            then.status(401)
                .json_body(serde_json::json!({"error": "Invalid API key."}));
        });

        let err = client(&server)
            .search(&SearchRequest::default())
            .await
            .unwrap_err();

        api_mock.assert();
        match &err {
            ExploreError::ApiError { status, message } => {
                assert_eq!(*status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid API key.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.hint().as_deref(),
            Some("Check your SEARCHAPI_API_KEY is valid")
        );
    }

    #[tokio::test]
    async fn test_rate_limited_is_not_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/v1/search");
            then.status(429);
        });

        let err = client(&server)
            .search(&SearchRequest::default())
            .await
            .unwrap_err();

        api_mock.assert_hits(1);
        assert_eq!(err.category(), ErrorCategory::Api);
        assert_eq!(
            err.to_string(),
            "API error: 429 Too Many Requests"
        );
        assert!(err.hint().unwrap().contains("Rate limit exceeded"));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v1/search");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = client(&server)
            .search(&SearchRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ExploreError::ResponseFormatError(_)));
        assert_eq!(err.category(), ErrorCategory::Api);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let unreachable =
            SearchApiClient::new("http://127.0.0.1:1/api/v1/search", ApiCredential::new("k"));

        let err = unreachable
            .search(&SearchRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ExploreError::NetworkError(_)));
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.to_string().starts_with("Network error:"));
    }

    #[test]
    fn test_credential_missing_or_blank() {
        let err = ApiCredential::from_var("TRAVEL_EXPLORE_UNIT_UNSET_KEY").unwrap_err();
        assert!(matches!(err, ExploreError::MissingConfigError { ref field } if field == "TRAVEL_EXPLORE_UNIT_UNSET_KEY"));

        std::env::set_var("TRAVEL_EXPLORE_UNIT_BLANK_KEY", "   ");
        assert!(ApiCredential::from_var("TRAVEL_EXPLORE_UNIT_BLANK_KEY").is_err());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = ApiCredential::new("sk-secret");
        assert_eq!(format!("{:?}", credential), "ApiCredential(***)");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(r#"{"error": "bad departure_id"}"#),
            "bad departure_id"
        );
        assert_eq!(
            error_message("  upstream down \n"),
            "upstream down"
        );
        assert_eq!(error_message(""), "");
    }
}
