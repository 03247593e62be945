//! Bucket registration endpoints.
//!
//! Buckets are object-storage locations registered with the lakehouse so
//! engines can query the data they hold.
//!
//! ## Endpoints
//!
//! - `list_buckets` - GET /api/v1/buckets
//! - `get_bucket` - GET /api/v1/buckets/{bucket_id}
//! - `register_bucket` - POST /api/v1/buckets
//! - `unregister_bucket` - DELETE /api/v1/buckets/{bucket_id}
//! - `update_bucket` - PATCH /api/v1/buckets/{bucket_id}
//! - `activate_bucket` - POST /api/v1/buckets/{bucket_id}/activate
//! - `deactivate_bucket` - POST /api/v1/buckets/{bucket_id}/deactivate
//! - `list_bucket_objects` - GET /api/v1/buckets/{bucket_id}/objects

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessEnvelope, SuccessResponse};

/// A registered bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    /// Server-assigned bucket identifier.
    pub bucket_id: String,
    /// Display name chosen at registration.
    pub bucket_display_name: String,
    /// Storage flavor (`ibm_cos`, `aws_s3`, `minio`, ...).
    pub bucket_type: String,
    /// Object-storage endpoint the bucket lives behind.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Storage region, when the flavor is regional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Activation state (`active` or `inactive`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Catalog the bucket is associated with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Options for [`LakehouseDataClient::list_buckets`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBucketsOptions {
    /// Restrict the listing to one storage flavor.
    pub bucket_type: Option<String>,
}

impl ListBucketsOptions {
    /// Sets the storage flavor filter.
    pub fn bucket_type(mut self, bucket_type: impl Into<String>) -> Self {
        self.bucket_type = Some(bucket_type.into());
        self
    }
}

/// Response for [`LakehouseDataClient::list_buckets`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBucketsResponse {
    /// The registered buckets.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

/// Options for [`LakehouseDataClient::get_bucket`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetBucketOptions {
    /// The bucket to fetch. Required.
    pub bucket_id: String,
}

impl GetBucketOptions {
    /// Creates options for the given bucket.
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("bucket_id", &self.bucket_id)
    }
}

/// Response for [`LakehouseDataClient::get_bucket`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetBucketResponse {
    /// The requested bucket.
    pub bucket: Bucket,
}

/// Options for [`LakehouseDataClient::register_bucket`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterBucketOptions {
    /// Display name for the bucket. Required.
    pub bucket_display_name: String,
    /// Storage flavor (`ibm_cos`, `aws_s3`, `minio`, ...). Required.
    pub bucket_type: String,
    /// Catalog to associate the bucket with. Required.
    pub catalog_name: String,
    /// Object-storage endpoint. Required.
    pub endpoint: String,
    /// Access key for the storage credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    /// Secret key for the storage credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Storage region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl RegisterBucketOptions {
    /// Creates options with the required fields.
    pub fn new(
        bucket_display_name: impl Into<String>,
        bucket_type: impl Into<String>,
        catalog_name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            bucket_display_name: bucket_display_name.into(),
            bucket_type: bucket_type.into(),
            catalog_name: catalog_name.into(),
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Sets the storage credentials.
    pub fn credentials(mut self, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Sets the storage region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a user tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("bucket_display_name", &self.bucket_display_name)?;
        require("bucket_type", &self.bucket_type)?;
        require("catalog_name", &self.catalog_name)?;
        require("endpoint", &self.endpoint)
    }
}

/// Response for [`LakehouseDataClient::register_bucket`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterBucketResponse {
    /// The newly registered bucket.
    pub bucket: Bucket,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::unregister_bucket`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnregisterBucketOptions {
    /// The bucket to unregister. Required.
    pub bucket_id: String,
}

impl UnregisterBucketOptions {
    /// Creates options for the given bucket.
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("bucket_id", &self.bucket_id)
    }
}

/// Options for [`LakehouseDataClient::update_bucket`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateBucketOptions {
    /// The bucket to update. Required; not part of the body.
    #[serde(skip_serializing)]
    pub bucket_id: String,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement access key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    /// Replacement secret key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    /// Replacement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateBucketOptions {
    /// Creates options for the given bucket.
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            ..Self::default()
        }
    }

    /// Sets the new description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the storage credentials.
    pub fn credentials(mut self, access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Replaces the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("bucket_id", &self.bucket_id)
    }
}

/// Response for [`LakehouseDataClient::update_bucket`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBucketResponse {
    /// The bucket after the update.
    pub bucket: Bucket,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::activate_bucket`] and
/// [`LakehouseDataClient::deactivate_bucket`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketActivationOptions {
    /// The bucket to (de)activate. Required.
    pub bucket_id: String,
}

impl BucketActivationOptions {
    /// Creates options for the given bucket.
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("bucket_id", &self.bucket_id)
    }
}

/// Options for [`LakehouseDataClient::list_bucket_objects`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListBucketObjectsOptions {
    /// The bucket to list. Required.
    pub bucket_id: String,
    /// Key prefix to list under.
    pub path: Option<String>,
}

impl ListBucketObjectsOptions {
    /// Creates options for the given bucket.
    pub fn new(bucket_id: impl Into<String>) -> Self {
        Self {
            bucket_id: bucket_id.into(),
            path: None,
        }
    }

    /// Restricts the listing to a key prefix.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("bucket_id", &self.bucket_id)
    }
}

/// Response for [`LakehouseDataClient::list_bucket_objects`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBucketObjectsResponse {
    /// Object keys in the bucket.
    #[serde(default)]
    pub objects: Vec<String>,
}

impl LakehouseDataClient {
    /// Lists registered buckets.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] on transport, server, or decode failure.
    pub async fn list_buckets(
        &self,
        options: &ListBucketsOptions,
    ) -> Result<DetailedResponse<ListBucketsResponse>, ApiError> {
        let request = ApiRequest::get(&["api", "v1", "buckets"])
            .query_opt("bucket_type", options.bucket_type.as_deref());
        self.core().execute_json(&request).await
    }

    /// Fetches a single bucket.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `bucket_id` is unset or the call fails.
    pub async fn get_bucket(
        &self,
        options: &GetBucketOptions,
    ) -> Result<DetailedResponse<GetBucketResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&["api", "v1", "buckets", &options.bucket_id]);
        self.core().execute_json(&request).await
    }

    /// Registers a bucket with the lakehouse.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn register_bucket(
        &self,
        options: &RegisterBucketOptions,
    ) -> Result<DetailedResponse<RegisterBucketResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "buckets"]).json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Unregisters a bucket.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `bucket_id` is unset or the call fails.
    pub async fn unregister_bucket(
        &self,
        options: &UnregisterBucketOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let request = ApiRequest::delete(&["api", "v1", "buckets", &options.bucket_id]);
        self.core().execute_empty(&request).await
    }

    /// Updates a bucket's mutable attributes.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `bucket_id` is unset or the call fails.
    pub async fn update_bucket(
        &self,
        options: &UpdateBucketOptions,
    ) -> Result<DetailedResponse<UpdateBucketResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::patch(&["api", "v1", "buckets", &options.bucket_id])
            .json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Activates a bucket so engines can query it.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `bucket_id` is unset or the call fails.
    pub async fn activate_bucket(
        &self,
        options: &BucketActivationOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::post(&["api", "v1", "buckets", &options.bucket_id, "activate"]);
        self.core().execute_json(&request).await
    }

    /// Deactivates a bucket.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `bucket_id` is unset or the call fails.
    pub async fn deactivate_bucket(
        &self,
        options: &BucketActivationOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::post(&["api", "v1", "buckets", &options.bucket_id, "deactivate"]);
        self.core().execute_empty(&request).await
    }

    /// Lists object keys stored in a bucket.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `bucket_id` is unset or the call fails.
    pub async fn list_bucket_objects(
        &self,
        options: &ListBucketObjectsOptions,
    ) -> Result<DetailedResponse<ListBucketObjectsResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&["api", "v1", "buckets", &options.bucket_id, "objects"])
            .query_opt("path", options.path.as_deref());
        self.core().execute_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_options_round_trip() {
        let options = RegisterBucketOptions::new("sales", "ibm_cos", "iceberg_data", "s3.example.test")
            .credentials("AKIA123", "shhh")
            .region("us-south")
            .description("sales data")
            .tag("team:finance");

        assert_eq!(options.bucket_display_name, "sales");
        assert_eq!(options.bucket_type, "ibm_cos");
        assert_eq!(options.catalog_name, "iceberg_data");
        assert_eq!(options.endpoint, "s3.example.test");
        assert_eq!(options.access_key.as_deref(), Some("AKIA123"));
        assert_eq!(options.secret_key.as_deref(), Some("shhh"));
        assert_eq!(options.region.as_deref(), Some("us-south"));
        assert_eq!(options.description.as_deref(), Some("sales data"));
        assert_eq!(options.tags, vec!["team:finance"]);
    }

    #[test]
    fn test_register_options_validation() {
        let options = RegisterBucketOptions::new("sales", "", "iceberg_data", "s3.example.test");
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingField {
                field: "bucket_type"
            })
        ));
    }

    #[test]
    fn test_register_body_omits_unset_fields() {
        let options = RegisterBucketOptions::new("sales", "ibm_cos", "iceberg_data", "s3.example.test");
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("access_key").is_none());
        assert!(body.get("tags").is_none());
        assert_eq!(body["bucket_display_name"], "sales");
    }

    #[test]
    fn test_update_body_excludes_bucket_id() {
        let options = UpdateBucketOptions::new("bucket-1").description("updated");
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("bucket_id").is_none());
        assert_eq!(body["description"], "updated");
    }

    #[test]
    fn test_path_options_validation() {
        assert!(GetBucketOptions::new("").validate().is_err());
        assert!(UnregisterBucketOptions::new(" ").validate().is_err());
        assert!(BucketActivationOptions::new("b-1").validate().is_ok());
        assert!(ListBucketObjectsOptions::new("").validate().is_err());
    }
}
