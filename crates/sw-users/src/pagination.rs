//! Pagination Walker
//!
//! Follows `next_url` cursors on a cloud controller listing until the last
//! page and returns every resource guid in listing order.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dto::{IgnoredEntity, PaginatedResources, Resource};
use crate::error::ApiError;
use crate::net::{Gateway, GatewayRequest};
use crate::result::ApiResult;
use crate::try_api;

pub struct PaginationWalker {
    gateway: Arc<dyn Gateway>,
}

impl PaginationWalker {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Collect the guids of every resource reachable from `first_page`.
    ///
    /// All or nothing: any non-success page outcome is returned as-is and
    /// the guids gathered so far are dropped.
    pub async fn walk(&self, first_page: &str) -> ApiResult<Vec<String>> {
        let resources: Vec<Resource<IgnoredEntity>> = try_api!(self.walk_resources(first_page).await);
        ApiResult::success(resources.into_iter().map(|r| r.metadata.guid).collect())
    }

    /// Same traversal, keeping each resource's decoded entity.
    pub async fn walk_resources<E>(&self, first_page: &str) -> ApiResult<Vec<Resource<E>>>
    where
        E: DeserializeOwned + Default,
    {
        let mut accumulated = Vec::new();
        let mut next = Some(first_page.to_string());
        let mut pages = 0usize;

        while let Some(url) = next {
            let body = try_api!(self.gateway.request(GatewayRequest::get(url)).await);
            let page: PaginatedResources<E> = match serde_json::from_value(body) {
                Ok(page) => page,
                Err(e) => {
                    return ApiResult::failure(ApiError::decode(format!(
                        "Malformed listing page: {}",
                        e
                    )))
                }
            };

            pages += 1;
            accumulated.extend(page.resources);
            next = page.next_url.filter(|u| !u.is_empty());
        }

        debug!(first_page, pages, resources = accumulated.len(), "Listing exhausted");
        ApiResult::success(accumulated)
    }
}
