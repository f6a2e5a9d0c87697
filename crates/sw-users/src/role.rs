//! Role Table
//!
//! The closed set of assignable roles and the resource paths they map to.
//! Every path used to list, grant or revoke a role comes from here.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Granularity a role applies at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleScope {
    Org,
    Space,
}

impl RoleScope {
    /// Top-level cloud controller collection owning roles of this scope
    pub fn collection(&self) -> &'static str {
        match self {
            RoleScope::Org => "organizations",
            RoleScope::Space => "spaces",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    OrgManager,
    BillingManager,
    OrgAuditor,
    OrgUser,
    SpaceManager,
    SpaceDeveloper,
    SpaceAuditor,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::OrgManager,
        Role::BillingManager,
        Role::OrgAuditor,
        Role::OrgUser,
        Role::SpaceManager,
        Role::SpaceDeveloper,
        Role::SpaceAuditor,
    ];

    /// Wire name, as accepted from callers
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::OrgManager => "OrgManager",
            Role::BillingManager => "BillingManager",
            Role::OrgAuditor => "OrgAuditor",
            Role::OrgUser => "OrgUser",
            Role::SpaceManager => "SpaceManager",
            Role::SpaceDeveloper => "SpaceDeveloper",
            Role::SpaceAuditor => "SpaceAuditor",
        }
    }

    pub fn scope(&self) -> RoleScope {
        match self {
            Role::OrgManager | Role::BillingManager | Role::OrgAuditor | Role::OrgUser => {
                RoleScope::Org
            }
            Role::SpaceManager | Role::SpaceDeveloper | Role::SpaceAuditor => RoleScope::Space,
        }
    }

    /// Sub-collection holding the users that have this role
    pub fn user_collection(&self) -> &'static str {
        match self {
            Role::OrgManager => "managers",
            Role::BillingManager => "billing_managers",
            Role::OrgAuditor => "auditors",
            Role::OrgUser => "users",
            Role::SpaceManager => "managers",
            Role::SpaceDeveloper => "developers",
            Role::SpaceAuditor => "auditors",
        }
    }

    /// Parse a role name and require it to belong to `scope`.
    pub fn parse_for_scope(name: &str, scope: RoleScope) -> Result<Role, ApiError> {
        let role: Role = name.parse()?;
        if role.scope() != scope {
            return Err(invalid_role(name));
        }
        Ok(role)
    }

    /// `/v2/{organizations|spaces}/{owner}/{collection}`
    ///
    /// `owner_guid` is the organization for org roles and the space for space roles.
    pub fn listing_path(&self, owner_guid: &str) -> String {
        format!(
            "/v2/{}/{}/{}",
            self.scope().collection(),
            owner_guid,
            self.user_collection()
        )
    }

    /// `/v2/{organizations|spaces}/{owner}/{collection}/{user}`
    pub fn assignment_path(&self, owner_guid: &str, user_guid: &str) -> String {
        format!("{}/{}", self.listing_path(owner_guid), user_guid)
    }
}

/// Path making `user_guid` a member of `org_guid`; prerequisite for any space role.
pub fn org_membership_path(org_guid: &str, user_guid: &str) -> String {
    Role::OrgUser.assignment_path(org_guid, user_guid)
}

fn invalid_role(name: &str) -> ApiError {
    ApiError::invalid_input(format!("Invalid Role {}", name))
}

impl FromStr for Role {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| invalid_role(s))
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
