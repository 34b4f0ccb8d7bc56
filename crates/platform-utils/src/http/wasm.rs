//! WASM HTTP client using reqwest.

use std::collections::HashMap;
use std::time::Duration;

use crate::HttpError;

use super::{HttpClient, HttpResponse, REQUEST_TIMEOUT};

/// HTTP client implementation using reqwest for WASM platforms.
///
/// In the browser reqwest delegates to `fetch`, so the page's cookies travel
/// with every request.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new `ReqwestHttpClient` with an optional user agent.
    pub fn new(user_agent: Option<String>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua);
        }
        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Failed to create reqwest client: {e}");
                panic!("Failed to create reqwest client: {e}");
            }
        };
        Self { client }
    }

    async fn send(
        &self,
        mut req: reqwest::RequestBuilder,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        req = req.timeout(Duration::from_secs(REQUEST_TIMEOUT));
        for (key, value) in headers.unwrap_or_default() {
            req = req.header(key, value);
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_ascii_lowercase(), value.to_string()))
            })
            .collect();
        let body = response.text().await?;
        tracing::debug!("Received response, status: {status}");
        tracing::trace!("raw response body: {body}");

        Ok(HttpResponse {
            status,
            body,
            headers,
        })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[macros::async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: String,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!("Making GET request to: {url}");
        self.send(self.client.get(&url), headers, None).await
    }

    async fn post(
        &self,
        url: String,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!("Making POST request to: {url}");
        self.send(self.client.post(&url), headers, body).await
    }
}
