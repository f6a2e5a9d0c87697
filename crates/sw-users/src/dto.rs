//! Wire shapes for both backends

use serde::{Deserialize, Serialize};

/// One page of a cloud controller listing
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Default"))]
pub struct PaginatedResources<E> {
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    #[serde(default)]
    pub entity: E,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub guid: String,
}

/// Listings whose entity body is irrelevant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IgnoredEntity {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StackEntity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildpackEntity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInstanceEntity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub service_plan_guid: Option<String>,
}

/// UAA `/Users` search response
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySearch {
    #[serde(default)]
    pub resources: Vec<IdentityRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdentityRecord {
    pub id: String,
    #[serde(rename = "userName", default)]
    pub user_name: String,
}

/// UAA `POST /Users` body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdentity<'a> {
    pub user_name: &'a str,
    pub emails: [IdentityEmail<'a>; 1],
    pub password: &'a str,
    pub name: IdentityName<'a>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentityEmail<'a> {
    pub value: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityName<'a> {
    pub given_name: &'a str,
    pub family_name: &'a str,
}

impl<'a> CreateIdentity<'a> {
    /// Username doubles as email and both name parts.
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self {
            user_name: username,
            emails: [IdentityEmail { value: username }],
            password,
            name: IdentityName {
                given_name: username,
                family_name: username,
            },
        }
    }
}

/// UAA `POST /Users` response; only the assigned id matters
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIdentity {
    pub id: String,
}

/// Cloud controller `POST /v2/users` body
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserResource<'a> {
    pub guid: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_page_without_next_url() {
        let page: PaginatedResources<IgnoredEntity> = serde_json::from_value(json!({
            "resources": [
                {"metadata": {"guid": "user-2-guid"}, "entity": {}},
                {"metadata": {"guid": "user-3-guid"}, "entity": {}}
            ]
        }))
        .unwrap();
        assert!(page.next_url.is_none());
        assert_eq!(page.resources.len(), 2);
        assert_eq!(page.resources[1].metadata.guid, "user-3-guid");
    }

    #[test]
    fn test_null_next_url() {
        let page: PaginatedResources<IgnoredEntity> =
            serde_json::from_value(json!({"next_url": null, "resources": []})).unwrap();
        assert!(page.next_url.is_none());
    }

    #[test]
    fn test_missing_entity_falls_back_to_default() {
        let page: PaginatedResources<StackEntity> = serde_json::from_value(json!({
            "resources": [{"metadata": {"guid": "stack-guid"}}]
        }))
        .unwrap();
        assert_eq!(page.resources[0].metadata.guid, "stack-guid");
        assert!(page.resources[0].entity.name.is_empty());
        assert!(page.resources[0].entity.description.is_none());
    }

    #[test]
    fn test_create_identity_body() {
        let body = serde_json::to_value(CreateIdentity::new("my-user", "my-password")).unwrap();
        assert_eq!(
            body,
            json!({
                "userName": "my-user",
                "emails": [{"value": "my-user"}],
                "password": "my-password",
                "name": {"givenName": "my-user", "familyName": "my-user"}
            })
        );
    }
}
