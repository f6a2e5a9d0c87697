//! Command preconditions
//!
//! A requirement resolves a named resource before a command runs. Failures
//! are reported through the `Ui` sink; the requirement itself only answers
//! whether the command may proceed.

use std::sync::Arc;

use async_trait::async_trait;
use sw_common::{Buildpack, ServiceInstance, Stack, UserFields};
use tracing::{debug, error};

use crate::lookup::NamedLookup;
use crate::result::ApiResult;

/// User-facing failure sink
pub trait Ui: Send + Sync {
    fn failed(&self, message: &str);
}

/// `Ui` that routes failures to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUi;

impl Ui for TracingUi {
    fn failed(&self, message: &str) {
        error!("FAILED: {}", message);
    }
}

#[async_trait]
pub trait Requirement: Send {
    async fn execute(&mut self) -> bool;
}

pub struct NamedResourceRequirement<T> {
    name: String,
    ui: Arc<dyn Ui>,
    lookup: Arc<dyn NamedLookup<T>>,
    resource: Option<T>,
}

impl<T> NamedResourceRequirement<T> {
    pub fn new(name: impl Into<String>, ui: Arc<dyn Ui>, lookup: Arc<dyn NamedLookup<T>>) -> Self {
        Self {
            name: name.into(),
            ui,
            lookup,
            resource: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved resource, once `execute` has succeeded
    pub fn resource(&self) -> Option<&T> {
        self.resource.as_ref()
    }

    pub fn into_resource(self) -> Option<T> {
        self.resource
    }
}

#[async_trait]
impl<T: Send + Sync> Requirement for NamedResourceRequirement<T> {
    async fn execute(&mut self) -> bool {
        match self.lookup.find_by_name(&self.name).await {
            ApiResult::Success(resource) => {
                debug!(name = %self.name, "Requirement satisfied");
                self.resource = Some(resource);
                true
            }
            outcome => {
                self.ui.failed(outcome.message());
                false
            }
        }
    }
}

pub fn user_requirement(
    username: impl Into<String>,
    ui: Arc<dyn Ui>,
    users: Arc<dyn NamedLookup<UserFields>>,
) -> NamedResourceRequirement<UserFields> {
    NamedResourceRequirement::new(username, ui, users)
}

pub fn stack_requirement(
    name: impl Into<String>,
    ui: Arc<dyn Ui>,
    stacks: Arc<dyn NamedLookup<Stack>>,
) -> NamedResourceRequirement<Stack> {
    NamedResourceRequirement::new(name, ui, stacks)
}

pub fn buildpack_requirement(
    name: impl Into<String>,
    ui: Arc<dyn Ui>,
    buildpacks: Arc<dyn NamedLookup<Buildpack>>,
) -> NamedResourceRequirement<Buildpack> {
    NamedResourceRequirement::new(name, ui, buildpacks)
}

pub fn service_instance_requirement(
    name: impl Into<String>,
    ui: Arc<dyn Ui>,
    services: Arc<dyn NamedLookup<ServiceInstance>>,
) -> NamedResourceRequirement<ServiceInstance> {
    NamedResourceRequirement::new(name, ui, services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::lookup::{ServiceRepository, StackRepository};
    use crate::testing::RecordingGateway;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingUi {
        failures: Mutex<Vec<String>>,
    }

    impl RecordingUi {
        fn failures(&self) -> Vec<String> {
            self.failures.lock().unwrap().clone()
        }
    }

    impl Ui for RecordingUi {
        fn failed(&self, message: &str) {
            self.failures.lock().unwrap().push(message.to_string());
        }
    }

    struct FakeUserLookup(ApiResult<UserFields>);

    #[async_trait]
    impl NamedLookup<UserFields> for FakeUserLookup {
        async fn find_by_name(&self, _name: &str) -> ApiResult<UserFields> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_user_requirement_stores_found_user() {
        let ui = Arc::new(RecordingUi::default());
        let user = UserFields::new("my-user-guid", "foo");
        let mut requirement = user_requirement(
            "foo",
            ui.clone(),
            Arc::new(FakeUserLookup(ApiResult::success(user.clone()))),
        );

        assert!(requirement.resource().is_none());
        assert!(requirement.execute().await);
        assert_eq!(requirement.resource(), Some(&user));
        assert!(ui.failures().is_empty());
    }

    #[tokio::test]
    async fn test_user_requirement_reports_not_found() {
        let ui = Arc::new(RecordingUi::default());
        let mut requirement = user_requirement(
            "foo",
            ui.clone(),
            Arc::new(FakeUserLookup(ApiResult::not_found("User foo not found"))),
        );

        assert!(!requirement.execute().await);
        assert!(requirement.resource().is_none());
        assert_eq!(ui.failures(), vec!["User foo not found"]);
    }

    #[tokio::test]
    async fn test_user_requirement_reports_failure() {
        let ui = Arc::new(RecordingUi::default());
        let mut requirement = user_requirement(
            "foo",
            ui.clone(),
            Arc::new(FakeUserLookup(ApiResult::failure(ApiError::from_status(
                500,
                None,
                "Server error",
            )))),
        );

        assert!(!requirement.execute().await);
        assert_eq!(ui.failures(), vec!["Server error"]);
    }

    #[tokio::test]
    async fn test_stack_requirement_resolves_through_repository() {
        let ui = Arc::new(RecordingUi::default());
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({
            "resources": [{
                "metadata": {"guid": "my-stack-guid"},
                "entity": {"name": "linux", "description": "Linux"}
            }]
        }));

        let mut requirement =
            stack_requirement("linux", ui.clone(), Arc::new(StackRepository::new(gateway)));

        assert!(requirement.execute().await);
        let stack = requirement.into_resource().unwrap();
        assert_eq!(stack.guid, "my-stack-guid");
        assert_eq!(stack.description, "Linux");
    }

    #[tokio::test]
    async fn test_buildpack_requirement_not_found() {
        let ui = Arc::new(RecordingUi::default());
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({"resources": []}));

        let mut requirement = buildpack_requirement(
            "missing-buildpack",
            ui.clone(),
            Arc::new(crate::lookup::BuildpackRepository::new(gateway)),
        );

        assert!(!requirement.execute().await);
        assert_eq!(ui.failures(), vec!["Buildpack missing-buildpack not found"]);
    }

    #[tokio::test]
    async fn test_service_instance_requirement_stores_instance() {
        let ui = Arc::new(RecordingUi::default());
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({
            "resources": [{
                "metadata": {"guid": "my-instance-guid"},
                "entity": {"name": "my-db"}
            }]
        }));

        let mut requirement = service_instance_requirement(
            "my-db",
            ui.clone(),
            Arc::new(ServiceRepository::new(gateway, "my-space-guid")),
        );

        assert!(requirement.execute().await);
        assert_eq!(
            requirement.resource().map(|instance| instance.guid.as_str()),
            Some("my-instance-guid")
        );
        assert!(ui.failures().is_empty());
    }

    #[tokio::test]
    async fn test_service_instance_requirement_not_found() {
        let ui = Arc::new(RecordingUi::default());
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({"resources": []}));

        let mut requirement = service_instance_requirement(
            "missing-db",
            ui.clone(),
            Arc::new(ServiceRepository::new(gateway, "my-space-guid")),
        );

        assert!(!requirement.execute().await);
        assert!(requirement.resource().is_none());
        assert_eq!(ui.failures(), vec!["Service instance missing-db not found"]);
    }
}
