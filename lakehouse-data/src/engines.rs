//! Query-engine lifecycle endpoints.
//!
//! Engines are the compute clusters that run queries against the
//! catalogs attached to them.
//!
//! ## Endpoints
//!
//! - `list_engines` - GET /api/v1/engines
//! - `create_engine` - POST /api/v1/engines
//! - `update_engine` - PATCH /api/v1/engines/{engine_id}
//! - `delete_engine` - DELETE /api/v1/engines/{engine_id}
//! - `pause_engine` - POST /api/v1/engines/{engine_id}/pause
//! - `resume_engine` - POST /api/v1/engines/{engine_id}/resume
//! - `scale_engine` - POST /api/v1/engines/{engine_id}/scale

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessEnvelope, SuccessResponse};

/// Worker-node sizing for an engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDetails {
    /// Number of coordinator nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator_count: Option<u32>,
    /// Number of worker nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_count: Option<u32>,
    /// Node profile (`starter`, `cache_optimized`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// A provisioned query engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    /// Server-assigned engine identifier.
    pub engine_id: String,
    /// Display name chosen at creation.
    pub engine_display_name: String,
    /// Engine flavor (`presto`, `spark`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,
    /// Lifecycle state (`running`, `paused`, `scaling`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Node sizing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_details: Option<EngineDetails>,
    /// Catalogs attached to the engine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_catalogs: Vec<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Options for [`LakehouseDataClient::list_engines`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListEnginesOptions {}

/// Response for [`LakehouseDataClient::list_engines`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListEnginesResponse {
    /// The provisioned engines.
    #[serde(default)]
    pub engines: Vec<Engine>,
}

/// Options for [`LakehouseDataClient::create_engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateEngineOptions {
    /// Display name for the engine. Required.
    pub engine_display_name: String,
    /// Node profile and counts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_details: Option<EngineDetails>,
    /// Catalogs to attach at creation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub associated_catalogs: Vec<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CreateEngineOptions {
    /// Creates options with the required display name.
    pub fn new(engine_display_name: impl Into<String>) -> Self {
        Self {
            engine_display_name: engine_display_name.into(),
            ..Self::default()
        }
    }

    /// Sets the node sizing.
    pub fn engine_details(mut self, details: EngineDetails) -> Self {
        self.engine_details = Some(details);
        self
    }

    /// Attaches a catalog at creation.
    pub fn associated_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.associated_catalogs.push(catalog.into());
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
        require("engine_display_name", &self.engine_display_name)
    }
}

/// Response for [`LakehouseDataClient::create_engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateEngineResponse {
    /// The newly provisioned engine.
    pub engine: Engine,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::update_engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateEngineOptions {
    /// The engine to update. Required; not part of the body.
    #[serde(skip_serializing)]
    pub engine_id: String,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_display_name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateEngineOptions {
    /// Creates options for the given engine.
    pub fn new(engine_id: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            ..Self::default()
        }
    }

    /// Sets the new display name.
    pub fn engine_display_name(mut self, name: impl Into<String>) -> Self {
        self.engine_display_name = Some(name.into());
        self
    }

    /// Sets the new description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)
    }
}

/// Response for [`LakehouseDataClient::update_engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateEngineResponse {
    /// The engine after the update.
    pub engine: Engine,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::delete_engine`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteEngineOptions {
    /// The engine to delete. Required.
    pub engine_id: String,
}

impl DeleteEngineOptions {
    /// Creates options for the given engine.
    pub fn new(engine_id: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)
    }
}

/// Options for [`LakehouseDataClient::pause_engine`] and
/// [`LakehouseDataClient::resume_engine`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineActionOptions {
    /// The engine to act on. Required.
    pub engine_id: String,
}

impl EngineActionOptions {
    /// Creates options for the given engine.
    pub fn new(engine_id: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)
    }
}

/// Options for [`LakehouseDataClient::scale_engine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaleEngineOptions {
    /// The engine to scale. Required; not part of the body.
    #[serde(skip_serializing)]
    pub engine_id: String,
    /// New coordinator-node count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator_count: Option<u32>,
    /// New worker-node count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_count: Option<u32>,
}

impl ScaleEngineOptions {
    /// Creates options for the given engine.
    pub fn new(engine_id: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            ..Self::default()
        }
    }

    /// Sets the coordinator-node count.
    pub fn coordinator_count(mut self, count: u32) -> Self {
        self.coordinator_count = Some(count);
        self
    }

    /// Sets the worker-node count.
    pub fn worker_count(mut self, count: u32) -> Self {
        self.worker_count = Some(count);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)
    }
}

impl LakehouseDataClient {
    /// Lists provisioned engines.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] on transport, server, or decode failure.
    pub async fn list_engines(
        &self,
        _options: &ListEnginesOptions,
    ) -> Result<DetailedResponse<ListEnginesResponse>, ApiError> {
        let request = ApiRequest::get(&["api", "v1", "engines"]);
        self.core().execute_json(&request).await
    }

    /// Provisions a new engine.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `engine_display_name` is unset or the
    /// call fails.
    pub async fn create_engine(
        &self,
        options: &CreateEngineOptions,
    ) -> Result<DetailedResponse<CreateEngineResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "engines"]).json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Updates an engine's mutable attributes.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `engine_id` is unset or the call fails.
    pub async fn update_engine(
        &self,
        options: &UpdateEngineOptions,
    ) -> Result<DetailedResponse<UpdateEngineResponse>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::patch(&["api", "v1", "engines", &options.engine_id]).json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Deletes an engine.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `engine_id` is unset or the call fails.
    pub async fn delete_engine(
        &self,
        options: &DeleteEngineOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let request = ApiRequest::delete(&["api", "v1", "engines", &options.engine_id]);
        self.core().execute_empty(&request).await
    }

    /// Pauses a running engine.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `engine_id` is unset or the call fails.
    pub async fn pause_engine(
        &self,
        options: &EngineActionOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "engines", &options.engine_id, "pause"]);
        self.core().execute_json(&request).await
    }

    /// Resumes a paused engine.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `engine_id` is unset or the call fails.
    pub async fn resume_engine(
        &self,
        options: &EngineActionOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "engines", &options.engine_id, "resume"]);
        self.core().execute_json(&request).await
    }

    /// Changes an engine's node counts.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `engine_id` is unset or the call fails.
    pub async fn scale_engine(
        &self,
        options: &ScaleEngineOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "engines", &options.engine_id, "scale"])
            .json_body(options)?;
        self.core().execute_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_options_validation() {
        assert!(CreateEngineOptions::new("presto-prod").validate().is_ok());
        assert!(CreateEngineOptions::new("").validate().is_err());
    }

    #[test]
    fn test_create_body_shape() {
        let options = CreateEngineOptions::new("presto-prod")
            .engine_details(EngineDetails {
                worker_count: Some(4),
                size: Some("starter".into()),
                ..Default::default()
            })
            .associated_catalog("iceberg_data");
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body["engine_details"]["worker_count"], 4);
        assert_eq!(body["associated_catalogs"][0], "iceberg_data");
        assert!(body.get("description").is_none());
    }

    #[test]
    fn test_scale_body_excludes_engine_id() {
        let options = ScaleEngineOptions::new("eng-1")
            .coordinator_count(1)
            .worker_count(8);
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("engine_id").is_none());
        assert_eq!(body["worker_count"], 8);
    }

    #[test]
    fn test_action_options_validation() {
        assert!(EngineActionOptions::new("eng-1").validate().is_ok());
        assert!(EngineActionOptions::new("  ").validate().is_err());
        assert!(DeleteEngineOptions::new("").validate().is_err());
    }
}
