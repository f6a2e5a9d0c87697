//! User Lifecycle Orchestrator
//!
//! Create: UAA identity first, then the cloud controller user referencing
//! the id UAA assigned. Delete: cloud controller first (a 404 there counts
//! as already deleted), then UAA.
//!
//! Neither direction compensates. When the cloud controller rejects a create
//! after UAA accepted it, the identity record stays behind as an orphan and
//! the failure is returned.

use std::sync::Arc;

use sw_common::UserFields;
use tracing::{info, warn};

use crate::dto::{CreateIdentity, CreateUserResource, CreatedIdentity};
use crate::error::ApiError;
use crate::net::{EndpointResolver, Gateway, GatewayRequest};
use crate::plan::MutationPlan;
use crate::result::ApiResult;
use crate::try_api;

pub struct UserLifecycle {
    cc: Arc<dyn Gateway>,
    uaa: Arc<dyn Gateway>,
    endpoints: Arc<dyn EndpointResolver>,
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(ApiError::from).into()
}

impl UserLifecycle {
    pub fn new(
        cc: Arc<dyn Gateway>,
        uaa: Arc<dyn Gateway>,
        endpoints: Arc<dyn EndpointResolver>,
    ) -> Self {
        Self { cc, uaa, endpoints }
    }

    pub async fn create(&self, username: &str, password: &str) -> ApiResult<UserFields> {
        let endpoint = try_api!(self.endpoints.identity_endpoint().await);

        let identity_body = try_api!(to_json(&CreateIdentity::new(username, password)));
        let response = try_api!(
            self.uaa
                .request(GatewayRequest::post(format!("{}/Users", endpoint), identity_body))
                .await
        );
        let created: CreatedIdentity = match serde_json::from_value(response) {
            Ok(created) => created,
            Err(e) => {
                return ApiResult::failure(ApiError::decode(format!(
                    "UAA did not return the new user id: {}",
                    e
                )))
            }
        };

        let resource_body = try_api!(to_json(&CreateUserResource { guid: &created.id }));
        let result = self
            .cc
            .request(GatewayRequest::post("/v2/users", resource_body))
            .await;

        match result {
            ApiResult::Success(_) => {
                info!(username, guid = %created.id, "Created user");
                ApiResult::success(UserFields::new(created.id, username))
            }
            ApiResult::NotFound(message) => {
                warn!(username, guid = %created.id, "UAA user created but cloud controller user was not; identity record left in place");
                ApiResult::NotFound(message)
            }
            ApiResult::Failure(error) => {
                warn!(username, guid = %created.id, error = %error, "UAA user created but cloud controller user was not; identity record left in place");
                ApiResult::Failure(error)
            }
        }
    }

    /// The UAA endpoint is deliberately resolved ahead of the cloud controller
    /// DELETE, not between the two deletes, so an unresolvable endpoint leaves
    /// both records untouched.
    pub async fn delete(&self, user_guid: &str) -> ApiResult<()> {
        let endpoint = try_api!(self.endpoints.identity_endpoint().await);

        let result = self.delete_plan(&endpoint, user_guid).execute().await;
        if result.is_success() {
            info!(user_guid, "Deleted user");
        }
        result
    }

    pub fn delete_plan(&self, identity_endpoint: &str, user_guid: &str) -> MutationPlan<'_> {
        MutationPlan::new()
            .then_ignoring_not_found(
                self.cc.as_ref(),
                GatewayRequest::delete(format!("/v2/users/{}", user_guid)),
            )
            .then(
                self.uaa.as_ref(),
                GatewayRequest::delete(format!("{}/Users/{}", identity_endpoint, user_guid)),
            )
    }
}
