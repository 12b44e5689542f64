use crate::config::SearchConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Anything that can answer a role/location job query. Records come back
/// exactly as the API sent them.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, role: &str, location: &str) -> Result<Vec<Value>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Value>,
}

/// JSearch API client (RapidAPI). One request per call, no retry.
pub struct JSearchClient {
    client: reqwest::Client,
    api_key: Option<String>,
    host: String,
    base_url: String,
}

impl JSearchClient {
    pub fn new(api_key: impl Into<String>, host: impl Into<String>) -> Self {
        let host = host.into();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: Some(api_key.into()),
            base_url: format!("https://{host}"),
            host,
        }
    }

    /// Builds a client from config. A missing API key is reported on the
    /// first search rather than here.
    pub fn from_config(config: &SearchConfig) -> Self {
        let mut client =
            Self::new(String::new(), config.host.clone()).with_base_url(config.endpoint());
        client.api_key = config.resolve_api_key().ok();
        client
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn fetch(&self, role: &str, location: &str) -> Result<Vec<Value>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No job search API key configured (set RAPIDAPI_KEY or search.api_key)"
            )
        })?;
        let query = format!("{role} in {location}");
        debug!(%query, "Querying job search API");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("query", query.as_str()), ("num_pages", "1")])
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await
            .context("Job search request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "Job search API error {}: {}",
                status,
                error_text
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("Job search API returned malformed JSON")?;

        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn sends_query_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "Rust Developer in Berlin".into()),
                Matcher::UrlEncoded("num_pages".into(), "1".into()),
            ]))
            .match_header("x-rapidapi-key", "secret")
            .match_header("x-rapidapi-host", "jsearch.p.rapidapi.com")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"OK","data":[{"job_id":"a","job_title":"Rust Dev"},{"job_id":"b"}]}"#)
            .create_async()
            .await;

        let client =
            JSearchClient::new("secret", "jsearch.p.rapidapi.com").with_base_url(server.url());
        let jobs = client.fetch("Rust Developer", "Berlin").await.unwrap();

        mock.assert_async().await;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0]["job_title"], "Rust Dev");
        assert_eq!(jobs[1]["job_id"], "b");
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_request() {
        let config = SearchConfig {
            base_url: Some("http://127.0.0.1:1".to_string()),
            ..Default::default()
        };
        let mut client = JSearchClient::from_config(&config);
        client.api_key = None;

        let err = client.fetch("a", "b").await.unwrap_err();
        assert!(err.to_string().contains("No job search API key"));
    }

    #[tokio::test]
    async fn missing_data_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"OK"}"#)
            .create_async()
            .await;

        let client = JSearchClient::new("k", "h").with_base_url(server.url());
        assert!(client.fetch("a", "b").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn http_failure_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("Too many requests")
            .create_async()
            .await;

        let client = JSearchClient::new("k", "h").with_base_url(server.url());
        let err = client.fetch("a", "b").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn malformed_json_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = JSearchClient::new("k", "h").with_base_url(server.url());
        let err = client.fetch("a", "b").await.unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }
}
