//! Inference client — the single point of entry for Databricks Model Serving calls.
//!
//! No other module talks to the inference endpoint directly. One call per
//! request, bounded by the configured timeout, never retried.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

pub mod prompts;
pub mod reply;

pub use reply::InferenceReply;

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Databricks API token not configured")]
    NotConfigured,

    #[error("Request timeout to Databricks API")]
    Timeout,

    #[error("Databricks API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LlmError {
    /// Separates timeouts from every other transport failure.
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(e)
        }
    }
}

#[derive(Debug, Serialize)]
struct InvocationRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Client for the configured serving endpoint.
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint_url: String,
    api_token: Option<String>,
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(config.inference_timeout).build()?,
            endpoint_url: config.databricks_endpoint_url.clone(),
            api_token: config.databricks_api_token.clone(),
        })
    }

    /// Sends `prompt` as a single user message and returns the sniffed reply.
    ///
    /// Fails with `NotConfigured` before any network I/O when no token is set.
    /// Any status other than 200 is an `Api` error carrying the raw body text.
    pub async fn call(&self, prompt: &str) -> Result<InferenceReply, LlmError> {
        let token = self.api_token.as_deref().ok_or(LlmError::NotConfigured)?;

        let request_body = InvocationRequest {
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.endpoint_url)
            .bearer_auth(token)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(LlmError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(LlmError::from_transport)?;

        info!("Databricks API response status: {}", status);
        debug!("Databricks API response: {}", body);

        if status != StatusCode::OK {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let raw: Value = serde_json::from_str(&body)?;
        Ok(InferenceReply::from_value(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn client_for(url: String, token: Option<&str>, timeout: Duration) -> InferenceClient {
        let config = Config {
            databricks_api_token: token.map(str::to_string),
            databricks_endpoint_url: url,
            inference_timeout: timeout,
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            public_dir: None,
            rust_log: "info".to_string(),
        };
        InferenceClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_fails_without_network() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let client = client_for(
            server.url("/invocations"),
            None,
            Duration::from_secs(5),
        );
        let err = client.call("hello").await.unwrap_err();

        assert!(matches!(err, LlmError::NotConfigured));
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn test_sends_bearer_token_and_generation_params() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/invocations")
                    .header("authorization", "Bearer dapi-test")
                    .header("content-type", "application/json")
                    .json_body(json!({
                        "messages": [{"role": "user", "content": "write it"}],
                        "max_tokens": 500,
                        "temperature": 0.7
                    }));
                then.status(200)
                    .json_body(json!({"predictions": ["Subject\nBody"]}));
            })
            .await;

        let client = client_for(
            server.url("/invocations"),
            Some("dapi-test"),
            Duration::from_secs(5),
        );
        let reply = client.call("write it").await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply.content(), "Subject\nBody");
    }

    #[tokio::test]
    async fn test_non_200_carries_status_and_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/invocations");
                then.status(429).body("rate limited");
            })
            .await;

        let client = client_for(
            server.url("/invocations"),
            Some("dapi-test"),
            Duration::from_secs(5),
        );
        let err = client.call("hi").await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_upstream_is_a_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/invocations");
                then.status(200)
                    .delay(Duration::from_secs(2))
                    .json_body(json!({"predictions": ["late"]}));
            })
            .await;

        let client = client_for(
            server.url("/invocations"),
            Some("dapi-test"),
            Duration::from_millis(200),
        );
        let err = client.call("hi").await.unwrap_err();

        assert!(matches!(err, LlmError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        // Port 9 (discard) is not listening in the test environment.
        let client = client_for(
            "http://127.0.0.1:9/invocations".to_string(),
            Some("dapi-test"),
            Duration::from_secs(5),
        );
        let err = client.call("hi").await.unwrap_err();

        assert!(matches!(err, LlmError::Http(_)));
        assert!(err.to_string().starts_with("Request error:"));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_unexpected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/invocations");
                then.status(200).body("<html>gateway</html>");
            })
            .await;

        let client = client_for(
            server.url("/invocations"),
            Some("dapi-test"),
            Duration::from_secs(5),
        );
        let err = client.call("hi").await.unwrap_err();

        assert!(matches!(err, LlmError::Decode(_)));
    }
}
