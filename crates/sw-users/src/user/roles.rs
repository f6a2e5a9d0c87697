//! Role Orchestrator
//!
//! Validates role names against the role table and turns grants and revokes
//! into mutation plans:
//! - grant org role: PUT role path
//! - grant space role: PUT org membership, then PUT role path
//! - revoke any role: DELETE role path
//!
//! An invalid role name fails before any request is built.

use std::sync::Arc;

use tracing::info;

use crate::net::{Gateway, GatewayRequest};
use crate::plan::MutationPlan;
use crate::result::ApiResult;
use crate::role::{org_membership_path, Role, RoleScope};

pub struct RoleOrchestrator {
    gateway: Arc<dyn Gateway>,
}

impl RoleOrchestrator {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    pub fn grant_org_plan(&self, user_guid: &str, org_guid: &str, role: Role) -> MutationPlan<'_> {
        MutationPlan::new().then(
            self.gateway.as_ref(),
            GatewayRequest::put(role.assignment_path(org_guid, user_guid)),
        )
    }

    pub fn grant_space_plan(
        &self,
        user_guid: &str,
        space_guid: &str,
        org_guid: &str,
        role: Role,
    ) -> MutationPlan<'_> {
        MutationPlan::new()
            .then(
                self.gateway.as_ref(),
                GatewayRequest::put(org_membership_path(org_guid, user_guid)),
            )
            .then(
                self.gateway.as_ref(),
                GatewayRequest::put(role.assignment_path(space_guid, user_guid)),
            )
    }

    /// `owner_guid` is the org for org roles and the space for space roles.
    pub fn revoke_plan(&self, user_guid: &str, owner_guid: &str, role: Role) -> MutationPlan<'_> {
        MutationPlan::new().then(
            self.gateway.as_ref(),
            GatewayRequest::delete(role.assignment_path(owner_guid, user_guid)),
        )
    }

    pub async fn set_org_role(&self, user_guid: &str, org_guid: &str, role: &str) -> ApiResult<()> {
        let role = match Role::parse_for_scope(role, RoleScope::Org) {
            Ok(role) => role,
            Err(e) => return ApiResult::failure(e),
        };
        info!(user_guid, org_guid, %role, "Granting org role");
        self.grant_org_plan(user_guid, org_guid, role).execute().await
    }

    pub async fn unset_org_role(&self, user_guid: &str, org_guid: &str, role: &str) -> ApiResult<()> {
        let role = match Role::parse_for_scope(role, RoleScope::Org) {
            Ok(role) => role,
            Err(e) => return ApiResult::failure(e),
        };
        info!(user_guid, org_guid, %role, "Revoking org role");
        self.revoke_plan(user_guid, org_guid, role).execute().await
    }

    /// Makes the user an org member first; when that fails the role PUT is never sent.
    pub async fn set_space_role(
        &self,
        user_guid: &str,
        space_guid: &str,
        org_guid: &str,
        role: &str,
    ) -> ApiResult<()> {
        let role = match Role::parse_for_scope(role, RoleScope::Space) {
            Ok(role) => role,
            Err(e) => return ApiResult::failure(e),
        };
        info!(user_guid, space_guid, org_guid, %role, "Granting space role");
        self.grant_space_plan(user_guid, space_guid, org_guid, role)
            .execute()
            .await
    }

    pub async fn unset_space_role(&self, user_guid: &str, space_guid: &str, role: &str) -> ApiResult<()> {
        let role = match Role::parse_for_scope(role, RoleScope::Space) {
            Ok(role) => role,
            Err(e) => return ApiResult::failure(e),
        };
        info!(user_guid, space_guid, %role, "Revoking space role");
        self.revoke_plan(user_guid, space_guid, role).execute().await
    }
}
