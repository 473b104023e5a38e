//! Authenticated request channel.
//!
//! # Design
//! A `Channel` binds a base endpoint, the Basic auth and version headers, and
//! the injected `Transport`. The facade builds one per call and hands a clone
//! to every entity it returns, which is how `save()` reuses the authenticated
//! channel without global state. Cloning only bumps an `Arc`.
//!
//! Each operation names a `StatusPolicy`. Most fetches accept any 2xx, while
//! address fetches and entity saves insist on exactly 200.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{Credentials, API_VERSION};
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";
const ACCEPT_VERSION: &str = "Accept-Version";
const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// Which response statuses count as success for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Any 2xx.
    Success,
    /// Exactly 200.
    ExactOk,
}

impl StatusPolicy {
    pub fn accepts(self, status: u16) -> bool {
        match self {
            Self::Success => (200..300).contains(&status),
            Self::ExactOk => status == 200,
        }
    }
}

#[derive(Clone)]
pub struct Channel {
    inner: Arc<ChannelInner>,
}

struct ChannelInner {
    base_url: String,
    default_headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
}

impl Channel {
    pub fn new(base_url: &str, credentials: &Credentials, transport: Arc<dyn Transport>) -> Self {
        let token = STANDARD.encode(format!(
            "{}:{}",
            credentials.company_id(),
            credentials.api_key()
        ));
        let default_headers = vec![
            ("Authorization".to_string(), format!("Basic {token}")),
            (ACCEPT_VERSION.to_string(), API_VERSION.to_string()),
            ("Accept".to_string(), JSON.to_string()),
        ];
        Self {
            inner: Arc::new(ChannelInner {
                base_url: base_url.trim_end_matches('/').to_string(),
                default_headers,
                transport,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Headers attached to every request: auth, version, accept.
    pub fn default_headers(&self) -> &[(String, String)] {
        &self.inner.default_headers
    }

    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.inner
            .default_headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Build a request for `resource` with the default headers attached.
    /// `body` is a `(content type, encoded body)` pair.
    pub fn build_request(
        &self,
        method: HttpMethod,
        resource: &str,
        body: Option<(&str, String)>,
    ) -> HttpRequest {
        let mut headers = self.inner.default_headers.clone();
        headers.push((X_REQUEST_ID.to_string(), Uuid::new_v4().to_string()));
        let body = body.map(|(content_type, encoded)| {
            headers.push(("Content-Type".to_string(), content_type.to_string()));
            encoded
        });
        HttpRequest {
            method,
            url: format!("{}/{}", self.inner.base_url, resource),
            resource: resource.to_string(),
            headers,
            body,
        }
    }

    /// GET `resource` and deserialize the body.
    pub fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        policy: StatusPolicy,
        context: &str,
    ) -> ApiResult<T> {
        let request = self.build_request(HttpMethod::Get, resource, None);
        let response = self.dispatch(request, policy, context)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// PUT `{ key: payload }` as JSON to `resource`.
    pub fn mutate<P: Serialize + ?Sized>(
        &self,
        resource: &str,
        key: &str,
        payload: &P,
        policy: StatusPolicy,
        context: &str,
    ) -> ApiResult<()> {
        let body = encode_envelope(key, payload)?;
        let request = self.build_request(HttpMethod::Put, resource, Some((JSON, body)));
        self.dispatch(request, policy, context).map(|_| ())
    }

    /// PUT form-encoded parameters to `resource`.
    pub fn put_form(
        &self,
        resource: &str,
        params: &[(&str, &str)],
        policy: StatusPolicy,
        context: &str,
    ) -> ApiResult<()> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        let request = self.build_request(HttpMethod::Put, resource, Some((FORM, body)));
        self.dispatch(request, policy, context).map(|_| ())
    }

    fn dispatch(
        &self,
        request: HttpRequest,
        policy: StatusPolicy,
        context: &str,
    ) -> ApiResult<HttpResponse> {
        let request_id = request.header(X_REQUEST_ID).unwrap_or_default().to_string();
        let method = request.method;
        let resource = request.resource.clone();
        debug!(request_id = %request_id, %method, resource = %resource, "Dispatching request");

        let response = match self.inner.transport.execute(request) {
            Ok(response) => response,
            Err(e) => {
                warn!(request_id = %request_id, %method, resource = %resource, error = %e, "Transport failed");
                return Err(ApiError::transport(context, e));
            }
        };

        if !policy.accepts(response.status) {
            warn!(
                request_id = %request_id,
                %method,
                resource = %resource,
                status = response.status,
                "Request rejected"
            );
            return Err(ApiError::http(response.status, context));
        }

        debug!(request_id = %request_id, status = response.status, "Request succeeded");
        Ok(response)
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Serialize `{ key: payload }` with every null-valued object entry removed,
/// including entries nested inside pass-through attributes.
pub(crate) fn encode_envelope<P: Serialize + ?Sized>(key: &str, payload: &P) -> ApiResult<String> {
    let mut value =
        serde_json::to_value(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    strip_nulls(&mut value);
    let mut envelope = serde_json::Map::new();
    envelope.insert(key.to_string(), value);
    serde_json::to_string(&envelope).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Removes null object entries; array elements are left in place.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
