//! The poll request itself.
//!
//! [`ApiClient`] knows the endpoint, the credential and the wire details
//! (header name, query parameter).  It performs exactly one request per
//! [`poll`](ApiClient::poll) and never retries; the poll loop's fixed
//! sleep-and-repeat cycle is the retry mechanism.

use std::time::Duration;

use serde_json::Value;

use super::{HttpFetch, HttpResponse};
use crate::error::{ApiError, TransportError};

/// HTTP 200.  Anything else, including other 2xx codes, is a failure.
const STATUS_OK: u16 = 200;

/// Client for the single homework-status endpoint.
pub struct ApiClient<F> {
    fetch: F,
    endpoint: String,
    token: String,
}

impl<F: HttpFetch> ApiClient<F> {
    /// # Arguments
    ///
    /// * `fetch` — transport used for the request.
    /// * `endpoint` — full URL of the homework-status endpoint.
    /// * `token` — API credential, sent as `Authorization: OAuth <token>`.
    pub fn new(fetch: F, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            fetch,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask for every status change since `window_start` and decode the body
    /// as JSON.  The shape of the JSON is not checked here.
    pub fn poll(&self, window_start: i64) -> Result<Value, ApiError> {
        log::info!("Requesting homework statuses from {} since {window_start}", self.endpoint);

        let headers = [("Authorization", format!("OAuth {}", self.token))];
        let query = [("from_date", window_start.to_string())];

        let HttpResponse { status, body } = self
            .fetch
            .get(&self.endpoint, &headers, &query)
            .map_err(|source| ApiError::Transport {
                endpoint: self.endpoint.clone(),
                source,
            })?;

        if status != STATUS_OK {
            return Err(ApiError::Status {
                endpoint: self.endpoint.clone(),
                status,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// reqwest transport
// ---------------------------------------------------------------------------

/// Production [`HttpFetch`] backed by a blocking `reqwest` client.
pub struct ReqwestFetch {
    client: reqwest::blocking::Client,
}

impl ReqwestFetch {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetch {
    fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError> {
        let request = headers
            .iter()
            .fold(self.client.get(url).query(query), |req, (name, value)| {
                req.header(*name, value)
            });
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
