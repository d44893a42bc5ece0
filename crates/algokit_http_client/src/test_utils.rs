//! An in-memory [`HttpClient`] for exercising the algod and kmd clients without a node.

use crate::{HttpClient, HttpError, HttpMethod, HttpResponse};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum MockResponse {
    Body(Vec<u8>),
    Status { status: u16, message: String },
}

/// A request as received by [`MockHttpClient`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub headers: HashMap<String, String>,
}

/// Replays queued responses per `(method, path)`.
///
/// Responses are consumed in order; the last one queued for a route keeps being returned.
/// Unknown routes answer with a 404 status error.
#[derive(Debug, Default)]
pub struct MockHttpClient {
    routes: Mutex<HashMap<(HttpMethod, String), VecDeque<MockResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, method: HttpMethod, path: &str, body: impl Into<Vec<u8>>) -> Self {
        self.push(method, path, MockResponse::Body(body.into()));
        self
    }

    pub fn with_status(self, method: HttpMethod, path: &str, status: u16, message: &str) -> Self {
        self.push(
            method,
            path,
            MockResponse::Status {
                status,
                message: message.to_string(),
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests received for `path`, in arrival order.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn push(&self, method: HttpMethod, path: &str, response: MockResponse) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    fn next_response(&self, method: HttpMethod, path: &str) -> Option<MockResponse> {
        let mut routes = self.routes.lock().unwrap();
        let queue = routes.get_mut(&(method, path.to_string()))?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: String,
        _query: Option<HashMap<String, String>>,
        body: Option<Vec<u8>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.clone(),
            body,
            headers: headers.unwrap_or_default(),
        });

        match self.next_response(method, &path) {
            Some(MockResponse::Body(body)) => Ok(HttpResponse {
                body,
                headers: HashMap::new(),
            }),
            Some(MockResponse::Status { status, message }) => {
                Err(HttpError::StatusError { status, message })
            }
            None => Err(HttpError::StatusError {
                status: 404,
                message: format!("no mock response for {} {}", method.as_str(), path),
            }),
        }
    }
}
