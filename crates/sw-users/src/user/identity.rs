//! Identity backend queries
//!
//! The correlator turns an ordered guid list from the cloud controller into
//! `UserFields` with one batched UAA search. The order of the output always
//! follows the input, never the identity backend's response order.

use std::collections::HashMap;
use std::sync::Arc;

use sw_common::UserFields;
use tracing::debug;

use crate::dto::IdentitySearch;
use crate::error::ApiError;
use crate::net::{EndpointResolver, Gateway, GatewayRequest};
use crate::result::ApiResult;
use crate::try_api;

pub struct IdentityCorrelator {
    gateway: Arc<dyn Gateway>,
    endpoints: Arc<dyn EndpointResolver>,
}

/// Escape a value for use inside a double-quoted SCIM filter string
fn filter_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `Id eq "a" or Id eq "b" ...`
pub fn id_filter<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| format!("Id eq \"{}\"", filter_literal(id.as_ref())))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// `userName Eq "name"`
pub fn username_filter(username: &str) -> String {
    format!("userName Eq \"{}\"", filter_literal(username))
}

/// Search URL requesting only the id and userName attributes
pub fn users_search_url(endpoint: &str, filter: &str) -> String {
    format!(
        "{}/Users?attributes=id,userName&filter={}",
        endpoint,
        urlencoding::encode(filter)
    )
}

impl IdentityCorrelator {
    pub fn new(gateway: Arc<dyn Gateway>, endpoints: Arc<dyn EndpointResolver>) -> Self {
        Self { gateway, endpoints }
    }

    async fn search(&self, filter: &str) -> ApiResult<IdentitySearch> {
        let endpoint = try_api!(self.endpoints.identity_endpoint().await);
        let url = users_search_url(&endpoint, filter);
        let body = try_api!(self.gateway.request(GatewayRequest::get(url)).await);

        serde_json::from_value::<IdentitySearch>(body)
            .map_err(|e| ApiError::decode(format!("Malformed user search response: {}", e)))
            .into()
    }

    /// Enrich `ids` with usernames using a single search request.
    ///
    /// Ids the identity backend does not return keep an empty username. An
    /// empty input issues no request at all.
    pub async fn correlate(&self, ids: &[String]) -> ApiResult<Vec<UserFields>> {
        if ids.is_empty() {
            return ApiResult::success(Vec::new());
        }

        let found = try_api!(self.search(&id_filter(ids)).await);
        debug!(requested = ids.len(), found = found.resources.len(), "Correlated user ids");

        let usernames: HashMap<String, String> = found
            .resources
            .into_iter()
            .map(|record| (record.id, record.user_name))
            .collect();

        let users = ids
            .iter()
            .map(|id| {
                let username = usernames.get(id).cloned().unwrap_or_default();
                UserFields::new(id.clone(), username)
            })
            .collect();

        ApiResult::success(users)
    }

    /// Point query by exact username.
    ///
    /// Zero matches is `NotFound` naming the username, not a failure.
    pub async fn find_by_username(&self, username: &str) -> ApiResult<UserFields> {
        let found = try_api!(self.search(&username_filter(username)).await);

        match found.resources.into_iter().next() {
            Some(record) => ApiResult::success(UserFields::new(record.id, record.user_name)),
            None => ApiResult::not_found(format!("User {} not found", username)),
        }
    }
}
