//! Schema endpoints.
//!
//! Schemas live inside catalogs; all three operations run through a
//! specific engine, named by the required `engine_id` query parameter.
//!
//! ## Endpoints
//!
//! - `list_schemas` - GET /api/v1/catalogs/{catalog_id}/schemas
//! - `create_schema` - POST /api/v1/catalogs/{catalog_id}/schemas
//! - `delete_schema` - DELETE /api/v1/catalogs/{catalog_id}/schemas/{schema_id}

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessResponse};

/// Options for [`LakehouseDataClient::list_schemas`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSchemasOptions {
    /// Engine to list through. Required.
    pub engine_id: String,
    /// Catalog to list. Required.
    pub catalog_id: String,
}

impl ListSchemasOptions {
    /// Creates options with the required fields.
    pub fn new(engine_id: impl Into<String>, catalog_id: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            catalog_id: catalog_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)?;
        require("catalog_id", &self.catalog_id)
    }
}

/// Response for [`LakehouseDataClient::list_schemas`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSchemasResponse {
    /// Schema names in the catalog.
    #[serde(default)]
    pub schemas: Vec<String>,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::create_schema`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSchemaOptions {
    /// Engine to create through. Required; sent as a query parameter.
    #[serde(skip_serializing)]
    pub engine_id: String,
    /// Catalog to create in. Required; part of the path.
    #[serde(skip_serializing)]
    pub catalog_id: String,
    /// Name for the new schema. Required.
    pub schema_name: String,
    /// Storage location for the schema's data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
}

impl CreateSchemaOptions {
    /// Creates options with the required fields.
    pub fn new(
        engine_id: impl Into<String>,
        catalog_id: impl Into<String>,
        schema_name: impl Into<String>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            catalog_id: catalog_id.into(),
            schema_name: schema_name.into(),
            bucket_name: None,
        }
    }

    /// Sets the backing bucket.
    pub fn bucket_name(mut self, bucket_name: impl Into<String>) -> Self {
        self.bucket_name = Some(bucket_name.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)?;
        require("catalog_id", &self.catalog_id)?;
        require("schema_name", &self.schema_name)
    }
}

/// Response for [`LakehouseDataClient::create_schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSchemaResponse {
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::delete_schema`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteSchemaOptions {
    /// Engine to delete through. Required.
    pub engine_id: String,
    /// Catalog holding the schema. Required.
    pub catalog_id: String,
    /// The schema to delete. Required.
    pub schema_id: String,
}

impl DeleteSchemaOptions {
    /// Creates options with the required fields.
    pub fn new(
        engine_id: impl Into<String>,
        catalog_id: impl Into<String>,
        schema_id: impl Into<String>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            catalog_id: catalog_id.into(),
            schema_id: schema_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)?;
        require("catalog_id", &self.catalog_id)?;
        require("schema_id", &self.schema_id)
    }
}

impl LakehouseDataClient {
    /// Lists schemas in a catalog.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn list_schemas(
        &self,
        options: &ListSchemasOptions,
    ) -> Result<DetailedResponse<ListSchemasResponse>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::get(&["api", "v1", "catalogs", &options.catalog_id, "schemas"])
                .query("engine_id", &options.engine_id);
        self.core().execute_json(&request).await
    }

    /// Creates a schema in a catalog.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn create_schema(
        &self,
        options: &CreateSchemaOptions,
    ) -> Result<DetailedResponse<CreateSchemaResponse>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::post(&["api", "v1", "catalogs", &options.catalog_id, "schemas"])
                .query("engine_id", &options.engine_id)
                .json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Deletes a schema.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn delete_schema(
        &self,
        options: &DeleteSchemaOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let request = ApiRequest::delete(&[
            "api",
            "v1",
            "catalogs",
            &options.catalog_id,
            "schemas",
            &options.schema_id,
        ])
        .query("engine_id", &options.engine_id);
        self.core().execute_empty(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_options_validation() {
        let options = CreateSchemaOptions::new("eng-1", "iceberg_data", "sales");
        assert!(options.validate().is_ok());

        let options = CreateSchemaOptions::new("eng-1", "iceberg_data", "");
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingField {
                field: "schema_name"
            })
        ));
    }

    #[test]
    fn test_create_body_excludes_path_and_query_fields() {
        let options =
            CreateSchemaOptions::new("eng-1", "iceberg_data", "sales").bucket_name("sales-bucket");
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("engine_id").is_none());
        assert!(body.get("catalog_id").is_none());
        assert_eq!(body["schema_name"], "sales");
        assert_eq!(body["bucket_name"], "sales-bucket");
    }

    #[test]
    fn test_delete_options_validation() {
        assert!(DeleteSchemaOptions::new("eng-1", "iceberg_data", "sales")
            .validate()
            .is_ok());
        assert!(DeleteSchemaOptions::new("", "iceberg_data", "sales")
            .validate()
            .is_err());
    }
}
