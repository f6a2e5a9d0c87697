//! Named-resource point queries
//!
//! `GET /v2/{collection}?q=name%3A{name}`; zero results is a typed
//! not-found, otherwise the first match is returned (names are unique on
//! the backend).

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sw_common::{Buildpack, ServiceInstance, Stack};

use crate::dto::{BuildpackEntity, PaginatedResources, Resource, ServiceInstanceEntity, StackEntity};
use crate::error::ApiError;
use crate::net::{Gateway, GatewayRequest};
use crate::result::ApiResult;
use crate::try_api;

/// Anything that can be resolved from a caller-supplied name
#[async_trait]
pub trait NamedLookup<T>: Send + Sync {
    async fn find_by_name(&self, name: &str) -> ApiResult<T>;
}

pub fn name_query_path(collection: &str, name: &str) -> String {
    format!(
        "/v2/{}?q={}",
        collection,
        urlencoding::encode(&format!("name:{}", name))
    )
}

async fn find_first_by_name<E>(
    gateway: &dyn Gateway,
    collection: &str,
    label: &str,
    name: &str,
) -> ApiResult<Resource<E>>
where
    E: DeserializeOwned + Default,
{
    let body = try_api!(
        gateway
            .request(GatewayRequest::get(name_query_path(collection, name)))
            .await
    );
    let page: PaginatedResources<E> = match serde_json::from_value(body) {
        Ok(page) => page,
        Err(e) => {
            return ApiResult::failure(ApiError::decode(format!(
                "Malformed {} listing: {}",
                collection, e
            )))
        }
    };

    match page.resources.into_iter().next() {
        Some(resource) => ApiResult::success(resource),
        None => ApiResult::not_found(format!("{} {} not found", label, name)),
    }
}

pub struct StackRepository {
    gateway: Arc<dyn Gateway>,
}

impl StackRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl NamedLookup<Stack> for StackRepository {
    async fn find_by_name(&self, name: &str) -> ApiResult<Stack> {
        find_first_by_name::<StackEntity>(self.gateway.as_ref(), "stacks", "Stack", name)
            .await
            .map(|resource| Stack {
                guid: resource.metadata.guid,
                name: resource.entity.name,
                description: resource.entity.description.unwrap_or_default(),
            })
    }
}

pub struct BuildpackRepository {
    gateway: Arc<dyn Gateway>,
}

impl BuildpackRepository {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl NamedLookup<Buildpack> for BuildpackRepository {
    async fn find_by_name(&self, name: &str) -> ApiResult<Buildpack> {
        find_first_by_name::<BuildpackEntity>(self.gateway.as_ref(), "buildpacks", "Buildpack", name)
            .await
            .map(|resource| Buildpack {
                guid: resource.metadata.guid,
                name: resource.entity.name,
                position: resource.entity.position,
                enabled: resource.entity.enabled,
            })
    }
}

/// Service instances are named uniquely per space, so lookups are scoped to one.
pub struct ServiceRepository {
    gateway: Arc<dyn Gateway>,
    space_guid: String,
}

impl ServiceRepository {
    pub fn new(gateway: Arc<dyn Gateway>, space_guid: impl Into<String>) -> Self {
        Self {
            gateway,
            space_guid: space_guid.into(),
        }
    }

    pub fn space_guid(&self) -> &str {
        &self.space_guid
    }
}

#[async_trait]
impl NamedLookup<ServiceInstance> for ServiceRepository {
    async fn find_by_name(&self, name: &str) -> ApiResult<ServiceInstance> {
        let collection = format!("spaces/{}/service_instances", self.space_guid);
        find_first_by_name::<ServiceInstanceEntity>(
            self.gateway.as_ref(),
            &collection,
            "Service instance",
            name,
        )
        .await
        .map(|resource| ServiceInstance {
            guid: resource.metadata.guid,
            name: resource.entity.name,
            service_plan_guid: resource.entity.service_plan_guid.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingGateway;
    use serde_json::json;

    #[test]
    fn test_name_query_path() {
        assert_eq!(name_query_path("stacks", "linux"), "/v2/stacks?q=name%3Alinux");
        assert_eq!(
            name_query_path("buildpacks", "my buildpack"),
            "/v2/buildpacks?q=name%3Amy%20buildpack"
        );
    }

    #[tokio::test]
    async fn test_stack_found() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({
            "resources": [{
                "metadata": {"guid": "custom-linux-guid"},
                "entity": {"name": "custom-linux"}
            }]
        }));

        let stack = StackRepository::new(gateway.clone())
            .find_by_name("linux")
            .await
            .unwrap();

        assert_eq!(stack.guid, "custom-linux-guid");
        assert_eq!(stack.name, "custom-linux");
        assert_eq!(gateway.urls(), vec!["/v2/stacks?q=name%3Alinux"]);
    }

    #[tokio::test]
    async fn test_stack_not_found() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({"resources": []}));

        let result = StackRepository::new(gateway)
            .find_by_name("stack that does not exist")
            .await;

        assert!(result.is_not_found());
        assert!(result.message().contains("stack that does not exist"));
    }

    #[tokio::test]
    async fn test_buildpack_found() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({
            "resources": [{
                "metadata": {"guid": "my-buildpack-guid"},
                "entity": {"name": "my-buildpack", "position": 3, "enabled": true}
            }]
        }));

        let buildpack = BuildpackRepository::new(gateway)
            .find_by_name("my-buildpack")
            .await
            .unwrap();

        assert_eq!(buildpack.guid, "my-buildpack-guid");
        assert_eq!(buildpack.position, Some(3));
        assert_eq!(buildpack.enabled, Some(true));
    }

    #[tokio::test]
    async fn test_service_instance_found_in_space() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({
            "resources": [{
                "metadata": {"guid": "my-instance-guid"},
                "entity": {"name": "my-db", "service_plan_guid": "small-plan-guid"}
            }]
        }));

        let instance = ServiceRepository::new(gateway.clone(), "my-space-guid")
            .find_by_name("my-db")
            .await
            .unwrap();

        assert_eq!(instance.guid, "my-instance-guid");
        assert_eq!(instance.service_plan_guid, "small-plan-guid");
        assert_eq!(
            gateway.urls(),
            vec!["/v2/spaces/my-space-guid/service_instances?q=name%3Amy-db"]
        );
    }

    #[tokio::test]
    async fn test_user_provided_instance_has_no_plan() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({
            "resources": [{
                "metadata": {"guid": "ups-guid"},
                "entity": {"name": "my-ups", "service_plan_guid": null}
            }]
        }));

        let instance = ServiceRepository::new(gateway, "my-space-guid")
            .find_by_name("my-ups")
            .await
            .unwrap();

        assert!(instance.service_plan_guid.is_empty());
    }

    #[tokio::test]
    async fn test_service_instance_not_found() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push_ok(json!({"resources": []}));

        let result = ServiceRepository::new(gateway, "my-space-guid")
            .find_by_name("missing-db")
            .await;

        assert_eq!(
            result,
            ApiResult::NotFound("Service instance missing-db not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_is_propagated() {
        let gateway = Arc::new(RecordingGateway::new());
        gateway.push(ApiResult::failure(ApiError::from_status(500, None, "boom")));

        let result = BuildpackRepository::new(gateway).find_by_name("ruby").await;
        assert_eq!(result.status_code(), 500);
    }
}
