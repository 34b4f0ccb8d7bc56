use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
};

use platform_utils::{HttpClient, HttpError, HttpResponse};
use tracing::debug;

#[derive(Debug)]
pub struct MockResponse {
    pub(crate) status_code: u16,
    pub(crate) text: String,
    pub(crate) headers: Vec<(String, String)>,
}

impl MockResponse {
    pub fn new(status_code: u16, text: String) -> Self {
        MockResponse {
            status_code,
            text,
            headers: Vec::new(),
        }
    }

    /// A 200 response with a JSON content type.
    pub fn json(text: String) -> Self {
        MockResponse::new(200, text).with_header("Content-Type", "application/json")
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn into_response(self) -> HttpResponse {
        let MockResponse {
            status_code,
            text,
            headers,
        } = self;
        headers
            .iter()
            .fold(HttpResponse::new(status_code, text), |response, (name, value)| {
                response.with_header(name, value)
            })
    }
}

/// A request as seen by [`MockRestClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

#[derive(Debug)]
enum Queued {
    Response(MockResponse),
    Error(HttpError),
}

/// Answers requests from a FIFO queue and records every request.
#[derive(Default)]
pub struct MockRestClient {
    responses: Mutex<VecDeque<Queued>>,
    requests: Mutex<Vec<MockRequest>>,
}

impl MockRestClient {
    pub fn new() -> Self {
        MockRestClient::default()
    }

    pub fn add_response(&self, response: MockResponse) -> &Self {
        debug!("Push response: {response:?}");
        let mut responses = self.responses.lock().unwrap();
        responses.push_back(Queued::Response(response));
        self
    }

    /// Makes the next request fail with `error`.
    pub fn add_error(&self, error: HttpError) -> &Self {
        debug!("Push error: {error:?}");
        let mut responses = self.responses.lock().unwrap();
        responses.push_back(Queued::Error(error));
        self
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs of all requests received so far, oldest first.
    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    fn respond(&self, request: MockRequest) -> Result<HttpResponse, HttpError> {
        let method = request.method;
        self.requests.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        let queued = responses.pop_front().ok_or_else(|| {
            HttpError::Other(format!("No response available for {method} request"))
        })?;
        debug!("Pop {method} response: {queued:?}");
        match queued {
            Queued::Response(response) => Ok(response.into_response()),
            Queued::Error(error) => Err(error),
        }
    }
}

#[macros::async_trait]
impl HttpClient for MockRestClient {
    async fn get(
        &self,
        url: String,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.respond(MockRequest {
            method: "GET",
            url,
            headers: headers.unwrap_or_default(),
            body: None,
        })
    }

    async fn post(
        &self,
        url: String,
        headers: Option<HashMap<String, String>>,
        body: Option<String>,
    ) -> Result<HttpResponse, HttpError> {
        self.respond(MockRequest {
            method: "POST",
            url,
            headers: headers.unwrap_or_default(),
            body,
        })
    }
}
