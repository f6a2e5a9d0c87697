//! User orchestration
//!
//! - `IdentityCorrelator` - batch lookup of usernames by guid, and point lookup by username
//! - `RoleOrchestrator` - grant/revoke org and space roles
//! - `UserLifecycle` - create and delete users across both backends
//! - `UserRepository` - facade composing the above

pub mod identity;
pub mod lifecycle;
pub mod repository;
pub mod roles;

pub use identity::IdentityCorrelator;
pub use lifecycle::UserLifecycle;
pub use repository::UserRepository;
pub use roles::RoleOrchestrator;
