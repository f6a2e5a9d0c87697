//! In-process gateway and resolver fakes for unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ApiError;
use crate::net::{EndpointResolver, Gateway, GatewayRequest};
use crate::result::ApiResult;

/// Replays queued outcomes and records every request it receives.
///
/// Running out of queued outcomes yields a 500 failure so a test that sends
/// more requests than expected fails loudly.
#[derive(Default)]
pub struct RecordingGateway {
    responses: Mutex<VecDeque<ApiResult<Value>>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: ApiResult<Value>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_ok(&self, body: Value) {
        self.push(ApiResult::success(body));
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn request(&self, request: GatewayRequest) -> ApiResult<Value> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                ApiResult::failure(ApiError::from_status(500, None, "unexpected request"))
            })
    }
}

/// Resolver returning a fixed outcome
pub struct FixedEndpoint(pub ApiResult<String>);

impl FixedEndpoint {
    pub fn at(url: &str) -> Self {
        Self(ApiResult::success(url.to_string()))
    }

    pub fn unavailable() -> Self {
        Self(ApiResult::failure(ApiError::endpoint("Failed to get endpoint!")))
    }
}

#[async_trait]
impl EndpointResolver for FixedEndpoint {
    async fn identity_endpoint(&self) -> ApiResult<String> {
        self.0.clone()
    }
}
