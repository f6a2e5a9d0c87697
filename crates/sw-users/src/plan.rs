//! Ordered mutating steps with short-circuit execution
//!
//! A plan never compensates: when step N fails, steps before it stay applied
//! and steps after it are never sent.

use tracing::debug;

use crate::net::{Gateway, GatewayRequest};
use crate::result::ApiResult;

struct MutationStep<'a> {
    gateway: &'a dyn Gateway,
    request: GatewayRequest,
    tolerate_not_found: bool,
}

/// Sequence of requests, possibly spanning both backends.
#[derive(Default)]
pub struct MutationPlan<'a> {
    steps: Vec<MutationStep<'a>>,
}

impl<'a> MutationPlan<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step whose non-success outcome aborts the plan.
    pub fn then(mut self, gateway: &'a dyn Gateway, request: GatewayRequest) -> Self {
        self.steps.push(MutationStep {
            gateway,
            request,
            tolerate_not_found: false,
        });
        self
    }

    /// Append a step where a 404 counts as done (idempotent delete).
    pub fn then_ignoring_not_found(mut self, gateway: &'a dyn Gateway, request: GatewayRequest) -> Self {
        self.steps.push(MutationStep {
            gateway,
            request,
            tolerate_not_found: true,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn requests(&self) -> impl Iterator<Item = &GatewayRequest> {
        self.steps.iter().map(|step| &step.request)
    }

    /// Run steps in order, awaiting each before sending the next.
    ///
    /// Returns the first non-success outcome verbatim, or `Success(())`.
    pub async fn execute(self) -> ApiResult<()> {
        for (index, step) in self.steps.into_iter().enumerate() {
            let method = step.request.method.clone();
            let url = step.request.url.clone();

            match step.gateway.request(step.request).await {
                ApiResult::Success(_) => {}
                ApiResult::NotFound(message) if step.tolerate_not_found => {
                    debug!(step = index, %method, %url, %message, "Already absent, continuing");
                }
                ApiResult::Failure(error) if step.tolerate_not_found && error.status_code() == 404 => {
                    debug!(step = index, %method, %url, error = %error, "Already absent, continuing");
                }
                ApiResult::NotFound(message) => return ApiResult::NotFound(message),
                ApiResult::Failure(error) => {
                    debug!(step = index, %method, %url, error = %error, "Step failed, aborting plan");
                    return ApiResult::Failure(error);
                }
            }
        }
        ApiResult::success(())
    }
}
