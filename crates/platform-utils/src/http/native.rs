//! Native HTTP client using bitreq.

use std::collections::HashMap;

use crate::HttpError;

use super::{HttpClient, HttpResponse, REQUEST_TIMEOUT};

/// Default connection pool capacity for the HTTP client.
const DEFAULT_POOL_CAPACITY: usize = 10;

/// HTTP client implementation using bitreq for native platforms.
///
/// Connections are pooled so the session, validation and save calls of one
/// form submission reuse the same TLS session.
pub struct BitreqHttpClient {
    client: bitreq::Client,
    user_agent: Option<String>,
}

impl BitreqHttpClient {
    /// Create a new `BitreqHttpClient` with an optional user agent.
    pub fn new(user_agent: Option<String>) -> Self {
        Self {
            client: bitreq::Client::new(DEFAULT_POOL_CAPACITY),
            user_agent,
        }
    }

    fn prepare(
        &self,
        req: bitreq::Request,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> bitreq::Request {
        let mut req = req.with_timeout(REQUEST_TIMEOUT);
        if let Some(ua) = &self.user_agent {
            req = req.with_header("User-Agent", ua);
        }
        for (key, value) in headers.unwrap_or_default() {
            req = req.with_header(key, value);
        }
        if let Some(body) = body {
            req = req.with_body(body);
        }
        req
    }

    async fn send(&self, req: bitreq::Request) -> Result<HttpResponse, HttpError> {
        let response = self.client.send_async(req).await?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let status = response.status_code as u16;
        let body = response.as_str()?.to_string();
        let headers = response
            .headers
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
            .collect();
        tracing::debug!("Received response, status: {status}");
        tracing::trace!("raw response body: {body}");

        Ok(HttpResponse {
            status,
            body,
            headers,
        })
    }
}

impl Default for BitreqHttpClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[macros::async_trait]
impl HttpClient for BitreqHttpClient {
    async fn get(
        &self,
        url: String,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!("Making GET request to: {url}");
        let req = self.prepare(bitreq::get(&url), headers, None);
        self.send(req).await
    }

    async fn post(
        &self,
        url: String,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        tracing::debug!("Making POST request to: {url}");
        let req = self.prepare(bitreq::post(&url), headers, body);
        self.send(req).await
    }
}
