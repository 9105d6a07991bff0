// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Plausible Stats and Sites APIs.
//!
//! Provides [`PlausibleClient`] which handles bearer authentication, URL
//! construction against cloud or self-hosted instances, and error mapping.

use std::time::Duration;

use plugboard_core::PlugboardError;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

/// Base URL of Plausible's hosted service.
pub const DEFAULT_BASE_URL: &str = "https://plausible.io";

const SITES_PATH: &str = "/api/v1/sites";
const AGGREGATE_PATH: &str = "/api/v1/stats/aggregate";
const REALTIME_PATH: &str = "/api/v1/stats/realtime/visitors";

/// Site entry returned by the Sites API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    pub domain: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SitesResponse {
    #[serde(default)]
    sites: Vec<Site>,
}

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    results: serde_json::Map<String, serde_json::Value>,
}

/// Authenticated client for one Plausible instance.
#[derive(Debug, Clone)]
pub struct PlausibleClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: Url,
}

impl PlausibleClient {
    /// Creates a client for `base_url` (trailing slashes are ignored).
    pub fn new(api_key: SecretString, base_url: &str) -> Result<Self, PlugboardError> {
        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            PlugboardError::Config(format!("invalid Plausible URL '{base_url}': {e}"))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PlugboardError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, PlugboardError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url()))
            .map_err(|e| PlugboardError::Internal(format!("bad endpoint {path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, PlugboardError> {
        self.client
            .get(url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| PlugboardError::Http {
                message: format!("request to Plausible failed: {e}"),
                source: Some(Box::new(e)),
            })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PlugboardError> {
        let response = self.send(self.endpoint(path, query)?).await?;
        let status = response.status();
        debug!(status = %status, path, "plausible response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlugboardError::Http {
                message: format!("Plausible API returned {status}: {body}"),
                source: None,
            });
        }

        response.json::<T>().await.map_err(|e| PlugboardError::Http {
            message: format!("failed to parse Plausible response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Status of an authenticated call to the Sites API, for connection checks.
    pub async fn sites_status(&self) -> Result<StatusCode, PlugboardError> {
        let response = self.send(self.endpoint(SITES_PATH, &[])?).await?;
        Ok(response.status())
    }

    /// Sites visible to the API key.
    pub async fn list_sites(&self) -> Result<Vec<Site>, PlugboardError> {
        let response: SitesResponse = self.get_json(SITES_PATH, &[]).await?;
        Ok(response.sites)
    }

    /// Aggregate metrics for a site over `period`.
    pub async fn aggregate(
        &self,
        site_id: &str,
        period: &str,
        metrics: &str,
    ) -> Result<serde_json::Map<String, serde_json::Value>, PlugboardError> {
        let query = [("site_id", site_id), ("period", period), ("metrics", metrics)];
        let response: AggregateResponse = self.get_json(AGGREGATE_PATH, &query).await?;
        Ok(response.results)
    }

    /// Visitors on the site in the last five minutes.
    pub async fn realtime_visitors(&self, site_id: &str) -> Result<u64, PlugboardError> {
        self.get_json(REALTIME_PATH, &[("site_id", site_id)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> PlausibleClient {
        PlausibleClient::new(SecretString::from("test-key".to_string()), base_url).unwrap()
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = PlausibleClient::new(SecretString::from("k".to_string()), "not a url");
        assert!(matches!(result, Err(PlugboardError::Config(_))));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let client = test_client("https://stats.example.com/");
        assert_eq!(client.base_url(), "https://stats.example.com");
    }

    #[tokio::test]
    async fn list_sites_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/sites"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sites": [
                    {"domain": "example.com", "timezone": "Europe/Berlin"},
                    {"domain": "blog.example.com"}
                ],
                "meta": {"limit": 100}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sites = test_client(&server.uri()).list_sites().await.unwrap();
        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].domain, "example.com");
        assert_eq!(sites[1].timezone, None);
    }

    #[tokio::test]
    async fn aggregate_passes_query_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/stats/aggregate"))
            .and(query_param("site_id", "example.com"))
            .and(query_param("period", "7d"))
            .and(query_param("metrics", "visitors,pageviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": {
                    "visitors": {"value": 1200},
                    "pageviews": {"value": 3400}
                }
            })))
            .mount(&server)
            .await;

        let results = test_client(&server.uri())
            .aggregate("example.com", "7d", "visitors,pageviews")
            .await
            .unwrap();
        assert_eq!(results["visitors"]["value"], 1200);
    }

    #[tokio::test]
    async fn realtime_visitors_parses_bare_integer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/stats/realtime/visitors"))
            .and(query_param("site_id", "example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_string("17"))
            .mount(&server)
            .await;

        let visitors = test_client(&server.uri())
            .realtime_visitors("example.com")
            .await
            .unwrap();
        assert_eq!(visitors, 17);
    }

    #[tokio::test]
    async fn error_status_becomes_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/sites"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).list_sites().await.unwrap_err();
        match err {
            PlugboardError::Http { message, .. } => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
