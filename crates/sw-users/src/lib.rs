//! # Steward users
//!
//! User and role orchestration for a cloud-platform CLI. Every user-facing
//! operation composes calls against two backends: the cloud controller, which
//! owns org/space role assignments by user guid, and the UAA identity service,
//! which owns usernames and credentials.
//!
//! ## Features
//!
//! - **Listing**: walk every page of a role listing, then correlate the guids
//!   with usernames in one batched identity query
//! - **Roles**: grant and revoke the seven org/space roles
//! - **Lifecycle**: create a user in both backends, delete from both
//! - **Lookups**: point queries for users, stacks, buildpacks and service
//!   instances by name
//! - **Requirements**: command preconditions that resolve a named resource
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sw_config::AppConfig;
//! use sw_users::{ApiResult, Role, UserRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let users = UserRepository::from_config(&config)?;
//!
//!     match users.list_users_in_org_for_role("my-org-guid", Role::OrgManager).await {
//!         ApiResult::Success(managers) => println!("{} managers", managers.len()),
//!         other => eprintln!("{}", other.message()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod lookup;
pub mod net;
pub mod pagination;
pub mod plan;
pub mod requirements;
pub mod result;
pub mod role;
pub mod user;

#[cfg(test)]
mod testing;

// Re-export main types
pub use error::ApiError;
pub use lookup::{BuildpackRepository, NamedLookup, ServiceRepository, StackRepository};
pub use net::{
    ConfiguredEndpointResolver, EndpointResolver, ErrorFlavor, Gateway, GatewayRequest,
    HttpGateway,
};
pub use pagination::PaginationWalker;
pub use plan::MutationPlan;
pub use requirements::{
    buildpack_requirement, service_instance_requirement, stack_requirement, user_requirement,
    NamedResourceRequirement, Requirement, TracingUi, Ui,
};
pub use result::ApiResult;
pub use role::{Role, RoleScope};
pub use user::UserRepository;

pub use sw_common::{Buildpack, ServiceInstance, Stack, UserFields};
