//! Revalidation payload and outbound request building.

use std::time::Duration;

use http::Method;
use serde::{Deserialize, Serialize};

use crate::config::{Secret, DEFAULT_TIMEOUT};

/// Body of a revalidation call.
///
/// Built fresh for every dispatch and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationRequest {
    /// Path the rendering tier should regenerate.
    pub path: String,
    /// Shared secret checked by the endpoint.
    pub secret: String,
}

impl RevalidationRequest {
    /// Create a request for a path.
    pub fn new(path: impl Into<String>, secret: &Secret) -> Self {
        Self {
            path: path.into(),
            secret: secret.expose().to_string(),
        }
    }
}

/// A fully built HTTP request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method.
    pub method: Method,
    /// Target URL.
    pub url: String,
    /// Request headers, in insertion order.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Vec<u8>,
    /// Total timeout.
    pub timeout: Duration,
}

impl OutboundRequest {
    /// Create a POST request with no body.
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            headers: Vec::new(),
            body: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a header, replacing any existing value with the same name.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&key));
        self.headers.push((key, value.into()));
        self
    }

    /// Set the body as JSON.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        let mut request = self.header("Content-Type", "application/json");
        request.body = body;
        Ok(request)
    }

    /// Set the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get a header value (case-insensitive).
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as JSON.
    pub fn json_body<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
