//! Metastore endpoints.
//!
//! ## Endpoints
//!
//! - `list_metastores` - GET /api/v1/metastores
//! - `get_metastore` - GET /api/v1/metastores/{metastore_id}
//! - `sync_metastore` - POST /api/v1/metastores/{metastore_id}/sync

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessEnvelope};

/// A metastore tracked by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metastore {
    /// Metastore identifier, also used as its name.
    pub metastore_name: String,
    /// Metastore flavor (`hms`, `glue`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metastore_type: Option<String>,
    /// Catalogs managed by this metastore.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalogs: Vec<String>,
    /// Thrift or REST endpoint of the metastore.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Options for [`LakehouseDataClient::list_metastores`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListMetastoresOptions {}

/// Response for [`LakehouseDataClient::list_metastores`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMetastoresResponse {
    /// The tracked metastores.
    #[serde(default)]
    pub metastores: Vec<Metastore>,
}

/// Options for [`LakehouseDataClient::get_metastore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetMetastoreOptions {
    /// The metastore to fetch. Required.
    pub metastore_id: String,
}

impl GetMetastoreOptions {
    /// Creates options for the given metastore.
    pub fn new(metastore_id: impl Into<String>) -> Self {
        Self {
            metastore_id: metastore_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("metastore_id", &self.metastore_id)
    }
}

/// Response for [`LakehouseDataClient::get_metastore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetMetastoreResponse {
    /// The requested metastore.
    pub metastore: Metastore,
}

/// Options for [`LakehouseDataClient::sync_metastore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncMetastoreOptions {
    /// The metastore to synchronize. Required; not part of the body.
    #[serde(skip_serializing)]
    pub metastore_id: String,
    /// When `true`, remove catalog entries whose backing objects are gone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_remove: Option<bool>,
}

impl SyncMetastoreOptions {
    /// Creates options for the given metastore.
    pub fn new(metastore_id: impl Into<String>) -> Self {
        Self {
            metastore_id: metastore_id.into(),
            auto_remove: None,
        }
    }

    /// Removes stale catalog entries during the sync.
    pub fn auto_remove(mut self, auto_remove: bool) -> Self {
        self.auto_remove = Some(auto_remove);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("metastore_id", &self.metastore_id)
    }
}

impl LakehouseDataClient {
    /// Lists tracked metastores.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] on transport, server, or decode failure.
    pub async fn list_metastores(
        &self,
        _options: &ListMetastoresOptions,
    ) -> Result<DetailedResponse<ListMetastoresResponse>, ApiError> {
        let request = ApiRequest::get(&["api", "v1", "metastores"]);
        self.core().execute_json(&request).await
    }

    /// Fetches a single metastore.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `metastore_id` is unset or the call
    /// fails.
    pub async fn get_metastore(
        &self,
        options: &GetMetastoreOptions,
    ) -> Result<DetailedResponse<GetMetastoreResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&["api", "v1", "metastores", &options.metastore_id]);
        self.core().execute_json(&request).await
    }

    /// Synchronizes a metastore with its backing storage.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `metastore_id` is unset or the call
    /// fails.
    pub async fn sync_metastore(
        &self,
        options: &SyncMetastoreOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::post(&["api", "v1", "metastores", &options.metastore_id, "sync"])
                .json_body(options)?;
        self.core().execute_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_body_excludes_metastore_id() {
        let options = SyncMetastoreOptions::new("hms-1").auto_remove(true);
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("metastore_id").is_none());
        assert_eq!(body["auto_remove"], true);
    }

    #[test]
    fn test_options_validation() {
        assert!(GetMetastoreOptions::new("hms-1").validate().is_ok());
        assert!(GetMetastoreOptions::new("").validate().is_err());
        assert!(SyncMetastoreOptions::new(" ").validate().is_err());
    }
}
