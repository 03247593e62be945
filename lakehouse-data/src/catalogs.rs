//! Catalog endpoints.
//!
//! Catalogs group schemas and tables; they are created by the service
//! when buckets and databases are registered, so the bindings here are
//! read-only.
//!
//! ## Endpoints
//!
//! - `list_catalogs` - GET /api/v1/catalogs
//! - `get_catalog` - GET /api/v1/catalogs/{catalog_id}

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::require;

/// A catalog known to the metastore.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog identifier, also used as its name.
    pub catalog_name: String,
    /// Table format (`iceberg`, `hive`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_type: Option<String>,
    /// Engines the catalog is attached to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_engines: Vec<String>,
    /// Buckets backing the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_buckets: Vec<String>,
    /// Databases backing the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associated_databases: Vec<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Options for [`LakehouseDataClient::list_catalogs`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCatalogsOptions {}

/// Response for [`LakehouseDataClient::list_catalogs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListCatalogsResponse {
    /// The known catalogs.
    #[serde(default)]
    pub catalogs: Vec<Catalog>,
}

/// Options for [`LakehouseDataClient::get_catalog`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetCatalogOptions {
    /// The catalog to fetch. Required.
    pub catalog_id: String,
}

impl GetCatalogOptions {
    /// Creates options for the given catalog.
    pub fn new(catalog_id: impl Into<String>) -> Self {
        Self {
            catalog_id: catalog_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("catalog_id", &self.catalog_id)
    }
}

/// Response for [`LakehouseDataClient::get_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetCatalogResponse {
    /// The requested catalog.
    pub catalog: Catalog,
}

impl LakehouseDataClient {
    /// Lists catalogs known to the metastore.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] on transport, server, or decode failure.
    pub async fn list_catalogs(
        &self,
        _options: &ListCatalogsOptions,
    ) -> Result<DetailedResponse<ListCatalogsResponse>, ApiError> {
        let request = ApiRequest::get(&["api", "v1", "catalogs"]);
        self.core().execute_json(&request).await
    }

    /// Fetches a single catalog.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `catalog_id` is unset or the call fails.
    pub async fn get_catalog(
        &self,
        options: &GetCatalogOptions,
    ) -> Result<DetailedResponse<GetCatalogResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&["api", "v1", "catalogs", &options.catalog_id]);
        self.core().execute_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_options_validation() {
        assert!(GetCatalogOptions::new("iceberg_data").validate().is_ok());
        assert!(GetCatalogOptions::new("").validate().is_err());
    }

    #[test]
    fn test_catalog_decodes_with_sparse_fields() {
        let body = r#"{"catalog_name": "iceberg_data"}"#;
        let decoded: Catalog = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.catalog_name, "iceberg_data");
        assert!(decoded.associated_engines.is_empty());
        assert!(decoded.catalog_type.is_none());
    }
}
