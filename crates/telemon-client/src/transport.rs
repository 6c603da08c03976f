//! Transport gateway: HTTP GET/POST returning parsed JSON

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Result, TelemetryError};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Moves JSON documents to and from the backend
///
/// Any connection failure or non-2xx status is reported as
/// [`TelemetryError::Network`]; a 2xx body that is not JSON is
/// [`TelemetryError::MalformedResponse`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value>;

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value>;
}

/// [`Transport`] over reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self { client })
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            serde_json::from_slice(&body)
                .map_err(|e| TelemetryError::malformed(format!("body is not JSON: {}", e)))
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    async fn extract_error(&self, response: reqwest::Response, status: StatusCode) -> TelemetryError {
        // Try to pick a message out of the error body
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.or(body.message),
            Err(_) => None,
        };

        match detail {
            Some(detail) => TelemetryError::network(format!("HTTP {}: {}", status, detail)),
            None => TelemetryError::network(format!("HTTP {}", status)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        self.handle_response(response).await
    }

    async fn post_json(&self, url: &Url, body: &Value) -> Result<Value> {
        debug!("POST {}", url);
        let response = self.client.post(url.clone()).json(body).send().await?;
        self.handle_response(response).await
    }
}
