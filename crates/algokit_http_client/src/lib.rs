use async_trait::async_trait;
use snafu::Snafu;
use std::collections::HashMap;

#[derive(Debug, Snafu)]
pub enum HttpError {
    #[snafu(display("HttpError: {message}"))]
    RequestError { message: String },

    #[snafu(display("Request failed with status {status}: {message}"))]
    StatusError { status: u16, message: String },
}

impl HttpError {
    /// The HTTP status code returned by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::StatusError { status, .. } => Some(*status),
            HttpError::RequestError { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub body: Vec<u8>,
    pub headers: HashMap<String, String>,
}

/// Transport used by the algod and kmd clients.
///
/// Implementations own the base URL and any authentication headers; callers only
/// supply the path, query, body and per-request headers. Tests swap in an in-memory
/// implementation to exercise the clients without a running node.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn request(
        &self,
        method: HttpMethod,
        path: String,
        query: Option<HashMap<String, String>>,
        body: Option<Vec<u8>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError>;
}

#[cfg(feature = "default_client")]
pub struct DefaultHttpClient {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "default_client")]
impl DefaultHttpClient {
    pub fn new(base_url: &str) -> Self {
        DefaultHttpClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client that sends `header_name: header_value` on every request,
    /// which is how algod and kmd receive their API tokens.
    pub fn with_header(
        base_url: &str,
        header_name: &str,
        header_value: &str,
    ) -> Result<Self, HttpError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::HeaderName::from_bytes(header_name.as_bytes()).map_err(|e| {
                HttpError::RequestError {
                    message: format!("Invalid header name '{}': {}", header_name, e),
                }
            })?,
            reqwest::header::HeaderValue::from_str(header_value).map_err(|e| {
                HttpError::RequestError {
                    message: format!("Invalid header value for '{}': {}", header_name, e),
                }
            })?,
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| HttpError::RequestError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(DefaultHttpClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(feature = "default_client")]
#[async_trait]
impl HttpClient for DefaultHttpClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: String,
        query: Option<HashMap<String, String>>,
        body: Option<Vec<u8>>,
        headers: Option<HashMap<String, String>>,
    ) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        let method = reqwest::Method::from_bytes(method.as_str().as_bytes()).map_err(|e| {
            HttpError::RequestError {
                message: e.to_string(),
            }
        })?;

        let mut request_builder = self.client.request(method, &url);

        if let Some(query_params) = query {
            request_builder = request_builder.query(&query_params);
        }

        if let Some(header_params) = headers {
            for (key, value) in header_params {
                request_builder = request_builder.header(key, value);
            }
        }

        if let Some(body_data) = body {
            request_builder = request_builder.body(body_data);
        }

        let response = request_builder
            .send()
            .await
            .map_err(|e| HttpError::RequestError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response text".to_string());
            return Err(HttpError::StatusError {
                status: status.as_u16(),
                message: text,
            });
        }

        let response_headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::RequestError {
                message: e.to_string(),
            })?
            .to_vec();

        Ok(HttpResponse {
            body,
            headers: response_headers,
        })
    }
}

#[cfg(feature = "test_utils")]
pub mod test_utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_exposes_code() {
        let err = HttpError::StatusError {
            status: 404,
            message: "txn does not exist".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Request failed with status 404: txn does not exist"
        );
    }

    #[test]
    fn test_request_error_has_no_status() {
        let err = HttpError::RequestError {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[cfg(feature = "default_client")]
    #[test]
    fn test_rejects_invalid_header_name() {
        let result = DefaultHttpClient::with_header("http://localhost:4001", "bad header", "x");
        assert!(result.is_err());
    }

    #[cfg(feature = "default_client")]
    #[test]
    fn test_trims_trailing_slash() {
        let client = DefaultHttpClient::new("http://localhost:4001/");
        assert_eq!(client.base_url(), "http://localhost:4001");
    }

    #[tokio::test]
    async fn test_mock_client_replays_responses_in_order() {
        use crate::test_utils::MockHttpClient;

        let client = MockHttpClient::new()
            .with_status(HttpMethod::Get, "/v2/transactions/pending/ABC", 404, "not found")
            .with_response(HttpMethod::Get, "/v2/transactions/pending/ABC", "{}");

        let first = client
            .request(HttpMethod::Get, "/v2/transactions/pending/ABC".into(), None, None, None)
            .await;
        assert!(first.unwrap_err().is_not_found());

        for _ in 0..2 {
            let next = client
                .request(HttpMethod::Get, "/v2/transactions/pending/ABC".into(), None, None, None)
                .await
                .unwrap();
            assert_eq!(next.body, b"{}".to_vec());
        }

        let unknown = client
            .request(HttpMethod::Post, "/v1/wallets".into(), None, None, None)
            .await;
        assert!(unknown.unwrap_err().is_not_found());
        assert_eq!(client.requests().len(), 4);
    }
}
