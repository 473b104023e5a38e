//! The injectable HTTP executor.
//!
//! # Design
//! `Transport` is the only place a request meets the network. The facade is
//! constructed with an `Arc<dyn Transport>` and every channel it builds shares
//! that handle, so tests can swap in an in-process stub. `UreqTransport` is the
//! stock blocking implementation.

use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// Failure of the HTTP exchange itself: connection refused, timeout, broken
/// body. A server answering with an error status is not a transport failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("transport error: {message}")]
pub struct TransportError {
    /// Status seen before the failure, if any.
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

/// Executes one HTTP exchange.
///
/// Implementations must return non-2xx responses as `Ok`; status
/// interpretation belongs to the caller.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use super::{Transport, TransportError};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq` agent.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new(timeout: Duration) -> Self {
            // 4xx/5xx come back as data so the channel can classify them.
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new(Duration::from_secs(30))
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let result = match (request.method, request.body) {
                (HttpMethod::Get, _) => {
                    with_headers(self.agent.get(&request.url), &request.headers).call()
                }
                (HttpMethod::Put, Some(body)) => {
                    with_headers(self.agent.put(&request.url), &request.headers).send(body.as_bytes())
                }
                (HttpMethod::Put, None) => {
                    with_headers(self.agent.put(&request.url), &request.headers).send_empty()
                }
            };
            let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| TransportError::with_status(status, e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn with_headers<B>(
        mut builder: ureq::RequestBuilder<B>,
        headers: &[(String, String)],
    ) -> ureq::RequestBuilder<B> {
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}
