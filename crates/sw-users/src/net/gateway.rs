use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::result::ApiResult;

/// A single request handed to a [`Gateway`].
///
/// `url` is either absolute or a path relative to the gateway's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

impl GatewayRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, url).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Request/response access to one backend.
///
/// Implementations own timeouts, retries and auth headers. Every non-2xx
/// response, 404 included, comes back as `Failure` carrying its status; an
/// empty success body decodes to `Value::Null`. `NotFound` is reserved for
/// callers reporting a zero-match query.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn request(&self, request: GatewayRequest) -> ApiResult<Value>;
}
