use async_trait::async_trait;
use sw_config::AppConfig;

use crate::error::ApiError;
use crate::result::ApiResult;

/// Locates the identity backend.
///
/// Failures propagate as the calling operation's own failure; no request is
/// attempted against an unresolved endpoint.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn identity_endpoint(&self) -> ApiResult<String>;
}

/// Resolver backed by the `[uaa] url` configuration value
#[derive(Debug, Clone)]
pub struct ConfiguredEndpointResolver {
    url: String,
}

impl ConfiguredEndpointResolver {
    pub fn new(url: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.uaa.url.clone())
    }
}

#[async_trait]
impl EndpointResolver for ConfiguredEndpointResolver {
    async fn identity_endpoint(&self) -> ApiResult<String> {
        if self.url.trim().is_empty() {
            return ApiResult::failure(ApiError::endpoint(
                "UAA endpoint is not configured",
            ));
        }
        ApiResult::success(self.url.clone())
    }
}
