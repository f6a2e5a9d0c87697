//! User Repository
//!
//! Public operation set over both backends. Listing is an explicit two-phase
//! pipeline: walk the cloud controller listing for guids, then correlate the
//! guids against UAA.

use std::sync::Arc;

use async_trait::async_trait;
use sw_common::UserFields;
use sw_config::AppConfig;

use super::identity::IdentityCorrelator;
use super::lifecycle::UserLifecycle;
use super::roles::RoleOrchestrator;
use crate::error::ApiError;
use crate::lookup::NamedLookup;
use crate::net::{ConfiguredEndpointResolver, EndpointResolver, Gateway, HttpGateway};
use crate::pagination::PaginationWalker;
use crate::result::ApiResult;
use crate::role::{Role, RoleScope};
use crate::try_api;

pub struct UserRepository {
    walker: PaginationWalker,
    correlator: IdentityCorrelator,
    roles: RoleOrchestrator,
    lifecycle: UserLifecycle,
}

impl UserRepository {
    pub fn new(
        cc: Arc<dyn Gateway>,
        uaa: Arc<dyn Gateway>,
        endpoints: Arc<dyn EndpointResolver>,
    ) -> Self {
        Self {
            walker: PaginationWalker::new(cc.clone()),
            correlator: IdentityCorrelator::new(uaa.clone(), endpoints.clone()),
            roles: RoleOrchestrator::new(cc.clone()),
            lifecycle: UserLifecycle::new(cc, uaa, endpoints),
        }
    }

    /// HTTP gateways for both backends plus the configured UAA endpoint
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let cc = Arc::new(HttpGateway::cloud_controller(config)?);
        let uaa = Arc::new(HttpGateway::uaa(config)?);
        let endpoints = Arc::new(ConfiguredEndpointResolver::from_config(config));
        Ok(Self::new(cc, uaa, endpoints))
    }

    pub async fn list_users_in_org_for_role(
        &self,
        org_guid: &str,
        role: impl AsRef<str>,
    ) -> ApiResult<Vec<UserFields>> {
        self.list_users_for_role(org_guid, role.as_ref(), RoleScope::Org)
            .await
    }

    pub async fn list_users_in_space_for_role(
        &self,
        space_guid: &str,
        role: impl AsRef<str>,
    ) -> ApiResult<Vec<UserFields>> {
        self.list_users_for_role(space_guid, role.as_ref(), RoleScope::Space)
            .await
    }

    async fn list_users_for_role(
        &self,
        owner_guid: &str,
        role: &str,
        scope: RoleScope,
    ) -> ApiResult<Vec<UserFields>> {
        let role = match Role::parse_for_scope(role, scope) {
            Ok(role) => role,
            Err(e) => return ApiResult::failure(e),
        };

        let ids = try_api!(self.walker.walk(&role.listing_path(owner_guid)).await);
        self.correlator.correlate(&ids).await
    }

    pub async fn find_by_username(&self, username: &str) -> ApiResult<UserFields> {
        self.correlator.find_by_username(username).await
    }

    pub async fn create(&self, username: &str, password: &str) -> ApiResult<UserFields> {
        self.lifecycle.create(username, password).await
    }

    pub async fn delete(&self, user_guid: &str) -> ApiResult<()> {
        self.lifecycle.delete(user_guid).await
    }

    pub async fn set_org_role(
        &self,
        user_guid: &str,
        org_guid: &str,
        role: impl AsRef<str>,
    ) -> ApiResult<()> {
        self.roles
            .set_org_role(user_guid, org_guid, role.as_ref())
            .await
    }

    pub async fn unset_org_role(
        &self,
        user_guid: &str,
        org_guid: &str,
        role: impl AsRef<str>,
    ) -> ApiResult<()> {
        self.roles
            .unset_org_role(user_guid, org_guid, role.as_ref())
            .await
    }

    pub async fn set_space_role(
        &self,
        user_guid: &str,
        space_guid: &str,
        org_guid: &str,
        role: impl AsRef<str>,
    ) -> ApiResult<()> {
        self.roles
            .set_space_role(user_guid, space_guid, org_guid, role.as_ref())
            .await
    }

    pub async fn unset_space_role(
        &self,
        user_guid: &str,
        space_guid: &str,
        role: impl AsRef<str>,
    ) -> ApiResult<()> {
        self.roles
            .unset_space_role(user_guid, space_guid, role.as_ref())
            .await
    }
}

#[async_trait]
impl NamedLookup<UserFields> for UserRepository {
    async fn find_by_name(&self, name: &str) -> ApiResult<UserFields> {
        self.find_by_username(name).await
    }
}
