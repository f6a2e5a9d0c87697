//! reqwest-backed gateway
//!
//! Mirrors the SDK client request loop:
//! - bearer token attached from configuration (never refreshed here)
//! - request timeout from configuration
//! - retry with exponential backoff, idempotent methods only
//! - backend error bodies decoded into `ApiError`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use sw_config::{ApiConfig, AppConfig};
use tracing::{debug, warn};

use super::gateway::{Gateway, GatewayRequest};
use crate::error::ApiError;
use crate::result::ApiResult;

/// How a backend encodes error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFlavor {
    /// `{"code": 20003, "description": "..."}`
    CloudController,
    /// `{"error": "scim_resource_not_found", "error_description": "..."}`
    Uaa,
}

#[derive(Debug, Deserialize)]
struct CloudControllerErrorBody {
    code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UaaErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

impl ErrorFlavor {
    /// Extract `(error_code, message)` from a failed response body.
    pub fn parse_error(&self, status: StatusCode, body: &str) -> (Option<String>, String) {
        let fallback = || {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        };

        match self {
            ErrorFlavor::CloudController => match serde_json::from_str::<CloudControllerErrorBody>(body) {
                Ok(parsed) => (
                    parsed.code.map(|c| c.to_string()),
                    parsed.description.unwrap_or_else(fallback),
                ),
                Err(_) => (None, fallback()),
            },
            ErrorFlavor::Uaa => match serde_json::from_str::<UaaErrorBody>(body) {
                Ok(parsed) => {
                    let message = parsed
                        .error_description
                        .or_else(|| parsed.error.clone())
                        .unwrap_or_else(fallback);
                    (parsed.error, message)
                }
                Err(_) => (None, fallback()),
            },
        }
    }
}

/// Gateway for one backend over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: reqwest::Client,
    base_url: Arc<str>,
    access_token: Arc<str>,
    flavor: ErrorFlavor,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl HttpGateway {
    pub fn new(
        api: &ApiConfig,
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        flavor: ErrorFlavor,
    ) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .timeout(api.timeout())
            .user_agent(&api.user_agent)
            .build()?;

        let base_url: String = base_url.into();
        let access_token: String = access_token.into();

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').into(),
            access_token: access_token.into(),
            flavor,
            retry_attempts: api.retry_attempts.max(1),
            retry_delay: api.retry_delay(),
        })
    }

    /// Gateway for the resource-hierarchy backend; paths resolve against `api.url`.
    pub fn cloud_controller(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api,
            config.api.url.clone(),
            config.api.access_token.clone(),
            ErrorFlavor::CloudController,
        )
    }

    /// Gateway for the identity backend; callers pass absolute URLs built from
    /// the resolved endpoint.
    pub fn uaa(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api,
            String::new(),
            config.uaa_access_token().to_string(),
            ErrorFlavor::Uaa,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else {
            format!("{}{}", self.base_url, target)
        }
    }

    fn authorization(&self) -> Option<String> {
        let token = self.access_token.trim();
        if token.is_empty() {
            None
        } else if token
            .get(..7)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer "))
        {
            Some(token.to_string())
        } else {
            Some(format!("Bearer {}", token))
        }
    }
}

/// Methods safe to repeat after a retryable failure
fn is_idempotent(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::PUT | Method::DELETE | Method::HEAD
    )
}

fn decode_body(body: &str) -> ApiResult<Value> {
    if body.trim().is_empty() {
        return ApiResult::success(Value::Null);
    }
    serde_json::from_str(body)
        .map_err(ApiError::from)
        .into()
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn request(&self, request: GatewayRequest) -> ApiResult<Value> {
        let url = self.resolve_url(&request.url);
        let attempts = if is_idempotent(&request.method) {
            self.retry_attempts
        } else {
            1
        };
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.retry_delay * (1 << (attempt - 1));
                tokio::time::sleep(delay).await;
            }

            debug!(method = %request.method, url = %url, attempt, "Sending request");

            let mut builder = self.http_client.request(request.method.clone(), &url);
            if let Some(auth) = self.authorization() {
                builder = builder.header(AUTHORIZATION, auth);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(e) => {
                    last_error = Some(ApiError::from(e));
                    continue;
                }
            };

            let status = response.status();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    last_error = Some(ApiError::from(e));
                    continue;
                }
            };

            if status.is_success() {
                return decode_body(&body);
            }

            let (error_code, message) = self.flavor.parse_error(status, &body);

            let error = ApiError::from_status(status.as_u16(), error_code, message);
            if !error.is_retryable() {
                return ApiResult::failure(error);
            }
            last_error = Some(error);
        }

        let error = last_error.unwrap_or_else(|| ApiError::Transport {
            message: "Request failed".into(),
        });
        warn!(method = %request.method, url = %url, attempts, error = %error, "Request failed");
        ApiResult::failure(error)
    }
}
