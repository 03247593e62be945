//! Resource-grant endpoints.
//!
//! Every governed resource kind (bucket, catalog, database, engine,
//! metastore) exposes the same four grant operations under
//! `/{kind}s/{id}/grants`. One private helper per verb does the work;
//! the public methods pin the resource kind.
//!
//! ## Endpoints (per kind)
//!
//! - `create_{kind}_grants` - POST /api/v1/{kind}s/{id}/grants
//! - `get_{kind}_grants` - GET /api/v1/{kind}s/{id}/grants
//! - `update_{kind}_grants` - PATCH /api/v1/{kind}s/{id}/grants
//! - `delete_{kind}_grants` - DELETE /api/v1/{kind}s/{id}/grants

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessEnvelope};

/// The resource kinds that carry grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum GrantResource {
    /// An object-storage bucket registration.
    Bucket,
    /// A catalog.
    Catalog,
    /// An external database registration.
    Database,
    /// A query engine.
    Engine,
    /// A metastore.
    Metastore,
}

impl GrantResource {
    /// The path segment the resource kind's endpoints live under.
    fn path_segment(&self) -> &'static str {
        match self {
            Self::Bucket => "buckets",
            Self::Catalog => "catalogs",
            Self::Database => "databases",
            Self::Engine => "engines",
            Self::Metastore => "metastores",
        }
    }
}

/// One permission grant on a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// User or group the grant applies to.
    pub grantee: String,
    /// Principal kind (`user_identity` or `group`).
    #[serde(rename = "type")]
    pub grantee_type: String,
    /// Permission level (`admin`, `can_use`, `can_read`, ...).
    pub permission: String,
}

impl Grant {
    /// A grant for a single user.
    pub fn user(grantee: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            grantee: grantee.into(),
            grantee_type: "user_identity".to_string(),
            permission: permission.into(),
        }
    }

    /// A grant for a group.
    pub fn group(grantee: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            grantee: grantee.into(),
            grantee_type: "group".to_string(),
            permission: permission.into(),
        }
    }
}

/// Options for the `create_{kind}_grants` and `update_{kind}_grants`
/// methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WriteGrantsOptions {
    /// The resource to grant on. Required; part of the path.
    #[serde(skip_serializing)]
    pub resource_id: String,
    /// The grants to store. At least one is required.
    pub grants: Vec<Grant>,
}

impl WriteGrantsOptions {
    /// Creates options with the required fields.
    pub fn new(resource_id: impl Into<String>, grants: Vec<Grant>) -> Self {
        Self {
            resource_id: resource_id.into(),
            grants,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("resource_id", &self.resource_id)?;
        if self.grants.is_empty() {
            return Err(ConfigError::missing_field("grants"));
        }
        Ok(())
    }
}

/// Options for the `get_{kind}_grants` methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetGrantsOptions {
    /// The resource to read grants from. Required.
    pub resource_id: String,
}

impl GetGrantsOptions {
    /// Creates options for the given resource.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("resource_id", &self.resource_id)
    }
}

/// Options for the `delete_{kind}_grants` methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeleteGrantsOptions {
    /// The resource to remove grants from. Required; part of the path.
    #[serde(skip_serializing)]
    pub resource_id: String,
    /// Grantees whose grants are removed; empty removes all grants.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grantees: Vec<String>,
}

impl DeleteGrantsOptions {
    /// Creates options that remove every grant on the resource.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            grantees: Vec::new(),
        }
    }

    /// Restricts the removal to one grantee.
    pub fn grantee(mut self, grantee: impl Into<String>) -> Self {
        self.grantees.push(grantee.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("resource_id", &self.resource_id)
    }
}

/// Response for the `get_{kind}_grants` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetGrantsResponse {
    /// The stored grants.
    #[serde(default)]
    pub grants: Vec<Grant>,
}

impl LakehouseDataClient {
    async fn create_grants(
        &self,
        resource: GrantResource,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&[
            "api",
            "v1",
            resource.path_segment(),
            &options.resource_id,
            "grants",
        ])
        .json_body(options)?;
        self.core().execute_json(&request).await
    }

    async fn get_grants(
        &self,
        resource: GrantResource,
        options: &GetGrantsOptions,
    ) -> Result<DetailedResponse<GetGrantsResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&[
            "api",
            "v1",
            resource.path_segment(),
            &options.resource_id,
            "grants",
        ]);
        self.core().execute_json(&request).await
    }

    async fn update_grants(
        &self,
        resource: GrantResource,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::patch(&[
            "api",
            "v1",
            resource.path_segment(),
            &options.resource_id,
            "grants",
        ])
        .json_body(options)?;
        self.core().execute_json(&request).await
    }

    async fn delete_grants(
        &self,
        resource: GrantResource,
        options: &DeleteGrantsOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let mut request = ApiRequest::delete(&[
            "api",
            "v1",
            resource.path_segment(),
            &options.resource_id,
            "grants",
        ]);
        for grantee in &options.grantees {
            request = request.query("grantee", grantee);
        }
        self.core().execute_empty(&request).await
    }

    /// Adds grants to a bucket.
    pub async fn create_bucket_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.create_grants(GrantResource::Bucket, options).await
    }

    /// Reads the grants on a bucket.
    pub async fn get_bucket_grants(
        &self,
        options: &GetGrantsOptions,
    ) -> Result<DetailedResponse<GetGrantsResponse>, ApiError> {
        self.get_grants(GrantResource::Bucket, options).await
    }

    /// Replaces the grants on a bucket.
    pub async fn update_bucket_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.update_grants(GrantResource::Bucket, options).await
    }

    /// Removes grants from a bucket.
    pub async fn delete_bucket_grants(
        &self,
        options: &DeleteGrantsOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        self.delete_grants(GrantResource::Bucket, options).await
    }

    /// Adds grants to a catalog.
    pub async fn create_catalog_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.create_grants(GrantResource::Catalog, options).await
    }

    /// Reads the grants on a catalog.
    pub async fn get_catalog_grants(
        &self,
        options: &GetGrantsOptions,
    ) -> Result<DetailedResponse<GetGrantsResponse>, ApiError> {
        self.get_grants(GrantResource::Catalog, options).await
    }

    /// Replaces the grants on a catalog.
    pub async fn update_catalog_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.update_grants(GrantResource::Catalog, options).await
    }

    /// Removes grants from a catalog.
    pub async fn delete_catalog_grants(
        &self,
        options: &DeleteGrantsOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        self.delete_grants(GrantResource::Catalog, options).await
    }

    /// Adds grants to a database.
    pub async fn create_database_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.create_grants(GrantResource::Database, options).await
    }

    /// Reads the grants on a database.
    pub async fn get_database_grants(
        &self,
        options: &GetGrantsOptions,
    ) -> Result<DetailedResponse<GetGrantsResponse>, ApiError> {
        self.get_grants(GrantResource::Database, options).await
    }

    /// Replaces the grants on a database.
    pub async fn update_database_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.update_grants(GrantResource::Database, options).await
    }

    /// Removes grants from a database.
    pub async fn delete_database_grants(
        &self,
        options: &DeleteGrantsOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        self.delete_grants(GrantResource::Database, options).await
    }

    /// Adds grants to an engine.
    pub async fn create_engine_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.create_grants(GrantResource::Engine, options).await
    }

    /// Reads the grants on an engine.
    pub async fn get_engine_grants(
        &self,
        options: &GetGrantsOptions,
    ) -> Result<DetailedResponse<GetGrantsResponse>, ApiError> {
        self.get_grants(GrantResource::Engine, options).await
    }

    /// Replaces the grants on an engine.
    pub async fn update_engine_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.update_grants(GrantResource::Engine, options).await
    }

    /// Removes grants from an engine.
    pub async fn delete_engine_grants(
        &self,
        options: &DeleteGrantsOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        self.delete_grants(GrantResource::Engine, options).await
    }

    /// Adds grants to a metastore.
    pub async fn create_metastore_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.create_grants(GrantResource::Metastore, options).await
    }

    /// Reads the grants on a metastore.
    pub async fn get_metastore_grants(
        &self,
        options: &GetGrantsOptions,
    ) -> Result<DetailedResponse<GetGrantsResponse>, ApiError> {
        self.get_grants(GrantResource::Metastore, options).await
    }

    /// Replaces the grants on a metastore.
    pub async fn update_metastore_grants(
        &self,
        options: &WriteGrantsOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        self.update_grants(GrantResource::Metastore, options).await
    }

    /// Removes grants from a metastore.
    pub async fn delete_metastore_grants(
        &self,
        options: &DeleteGrantsOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        self.delete_grants(GrantResource::Metastore, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_path_segments_are_plural() {
        for resource in GrantResource::iter() {
            let segment = resource.path_segment();
            assert!(segment.ends_with('s'));
            assert!(segment.starts_with(&resource.to_string()[..3]));
        }
    }

    #[test]
    fn test_write_options_validation() {
        let options = WriteGrantsOptions::new("bucket-1", vec![Grant::user("alice", "can_read")]);
        assert!(options.validate().is_ok());

        let options = WriteGrantsOptions::new("bucket-1", vec![]);
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingField { field: "grants" })
        ));
    }

    #[test]
    fn test_write_body_shape() {
        let options = WriteGrantsOptions::new(
            "eng-1",
            vec![
                Grant::user("alice@example.test", "admin"),
                Grant::group("analysts", "can_use"),
            ],
        );
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("resource_id").is_none());
        assert_eq!(body["grants"][0]["type"], "user_identity");
        assert_eq!(body["grants"][1]["type"], "group");
        assert_eq!(body["grants"][1]["permission"], "can_use");
    }

    #[test]
    fn test_delete_options_default_to_all() {
        let options = DeleteGrantsOptions::new("db-1");
        assert!(options.validate().is_ok());
        assert!(options.grantees.is_empty());

        let options = DeleteGrantsOptions::new("db-1").grantee("alice");
        assert_eq!(options.grantees, vec!["alice"]);
    }
}
