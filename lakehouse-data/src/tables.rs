//! Table endpoints.
//!
//! Tables are addressed through their catalog and schema, and every
//! operation runs through a specific engine named by the required
//! `engine_id` query parameter.
//!
//! ## Endpoints
//!
//! - `list_tables` - GET /api/v1/catalogs/{catalog_id}/schemas/{schema_id}/tables
//! - `get_table` - GET .../tables/{table_id}
//! - `rename_table` - PATCH .../tables/{table_id}
//! - `delete_table` - DELETE .../tables/{table_id}
//! - `list_table_snapshots` - GET .../tables/{table_id}/snapshots
//! - `rollback_table` - POST .../tables/{table_id}/rollback
//! - `export_table` - GET .../tables/{table_id}/export (binary)

use bytes::Bytes;
use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessEnvelope, SuccessResponse};

/// A column of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub column_name: String,
    /// SQL type of the column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Free-form comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A point-in-time snapshot of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Snapshot identifier.
    pub snapshot_id: String,
    /// Operation that produced the snapshot (`append`, `overwrite`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Commit timestamp, milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<i64>,
}

/// Table coordinates shared by every operation in this module.
#[derive(Debug, Clone)]
struct TablePath<'a> {
    engine_id: &'a str,
    catalog_id: &'a str,
    schema_id: &'a str,
    table_id: &'a str,
}

impl<'a> TablePath<'a> {
    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", self.engine_id)?;
        require("catalog_id", self.catalog_id)?;
        require("schema_id", self.schema_id)?;
        require("table_id", self.table_id)
    }

    fn segments(&self, tail: Option<&'a str>) -> Vec<&'a str> {
        let mut segments = vec![
            "api",
            "v1",
            "catalogs",
            self.catalog_id,
            "schemas",
            self.schema_id,
            "tables",
            self.table_id,
        ];
        if let Some(tail) = tail {
            segments.push(tail);
        }
        segments
    }
}

/// Options for [`LakehouseDataClient::list_tables`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListTablesOptions {
    /// Engine to list through. Required.
    pub engine_id: String,
    /// Catalog holding the schema. Required.
    pub catalog_id: String,
    /// Schema to list. Required.
    pub schema_id: String,
}

impl ListTablesOptions {
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

/// Response for [`LakehouseDataClient::list_tables`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTablesResponse {
    /// Table names in the schema.
    #[serde(default)]
    pub tables: Vec<String>,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options naming a single table.
///
/// Used by get, delete, snapshot listing, and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableOptions {
    /// Engine to operate through. Required.
    pub engine_id: String,
    /// Catalog holding the schema. Required.
    pub catalog_id: String,
    /// Schema holding the table. Required.
    pub schema_id: String,
    /// The table itself. Required.
    pub table_id: String,
}

impl TableOptions {
    /// Creates options with the required fields.
    pub fn new(
        engine_id: impl Into<String>,
        catalog_id: impl Into<String>,
        schema_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            catalog_id: catalog_id.into(),
            schema_id: schema_id.into(),
            table_id: table_id.into(),
        }
    }

    fn path(&self) -> TablePath<'_> {
        TablePath {
            engine_id: &self.engine_id,
            catalog_id: &self.catalog_id,
            schema_id: &self.schema_id,
            table_id: &self.table_id,
        }
    }
}

/// Response for [`LakehouseDataClient::get_table`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTableResponse {
    /// Columns of the table.
    #[serde(default)]
    pub columns: Vec<Column>,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::rename_table`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenameTableOptions {
    /// Engine to operate through. Required; sent as a query parameter.
    #[serde(skip_serializing)]
    pub engine_id: String,
    /// Catalog holding the schema. Required; part of the path.
    #[serde(skip_serializing)]
    pub catalog_id: String,
    /// Schema holding the table. Required; part of the path.
    #[serde(skip_serializing)]
    pub schema_id: String,
    /// The table to rename. Required; part of the path.
    #[serde(skip_serializing)]
    pub table_id: String,
    /// The new table name. Required.
    pub table_name: String,
}

impl RenameTableOptions {
    /// Creates options with the required fields.
    pub fn new(
        engine_id: impl Into<String>,
        catalog_id: impl Into<String>,
        schema_id: impl Into<String>,
        table_id: impl Into<String>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            catalog_id: catalog_id.into(),
            schema_id: schema_id.into(),
            table_id: table_id.into(),
            table_name: table_name.into(),
        }
    }

    fn path(&self) -> TablePath<'_> {
        TablePath {
            engine_id: &self.engine_id,
            catalog_id: &self.catalog_id,
            schema_id: &self.schema_id,
            table_id: &self.table_id,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.path().validate()?;
        require("table_name", &self.table_name)
    }
}

/// Response for [`LakehouseDataClient::list_table_snapshots`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTableSnapshotsResponse {
    /// The table's snapshots, newest first.
    #[serde(default)]
    pub snapshots: Vec<TableSnapshot>,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::rollback_table`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RollbackTableOptions {
    /// Engine to operate through. Required; sent as a query parameter.
    #[serde(skip_serializing)]
    pub engine_id: String,
    /// Catalog holding the schema. Required; part of the path.
    #[serde(skip_serializing)]
    pub catalog_id: String,
    /// Schema holding the table. Required; part of the path.
    #[serde(skip_serializing)]
    pub schema_id: String,
    /// The table to roll back. Required; part of the path.
    #[serde(skip_serializing)]
    pub table_id: String,
    /// The snapshot to roll back to. Required.
    pub snapshot_id: String,
}

impl RollbackTableOptions {
    /// Creates options with the required fields.
    pub fn new(
        engine_id: impl Into<String>,
        catalog_id: impl Into<String>,
        schema_id: impl Into<String>,
        table_id: impl Into<String>,
        snapshot_id: impl Into<String>,
    ) -> Self {
        Self {
            engine_id: engine_id.into(),
            catalog_id: catalog_id.into(),
            schema_id: schema_id.into(),
            table_id: table_id.into(),
            snapshot_id: snapshot_id.into(),
        }
    }

    fn path(&self) -> TablePath<'_> {
        TablePath {
            engine_id: &self.engine_id,
            catalog_id: &self.catalog_id,
            schema_id: &self.schema_id,
            table_id: &self.table_id,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.path().validate()?;
        require("snapshot_id", &self.snapshot_id)
    }
}

impl LakehouseDataClient {
    /// Lists tables in a schema.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn list_tables(
        &self,
        options: &ListTablesOptions,
    ) -> Result<DetailedResponse<ListTablesResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&[
            "api",
            "v1",
            "catalogs",
            &options.catalog_id,
            "schemas",
            &options.schema_id,
            "tables",
        ])
        .query("engine_id", &options.engine_id);
        self.core().execute_json(&request).await
    }

    /// Fetches a table's column metadata.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn get_table(
        &self,
        options: &TableOptions,
    ) -> Result<DetailedResponse<GetTableResponse>, ApiError> {
        let path = options.path();
        path.validate()?;
        let request =
            ApiRequest::get(&path.segments(None)).query("engine_id", &options.engine_id);
        self.core().execute_json(&request).await
    }

    /// Renames a table.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn rename_table(
        &self,
        options: &RenameTableOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::patch(&options.path().segments(None))
            .query("engine_id", &options.engine_id)
            .json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Drops a table.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn delete_table(
        &self,
        options: &TableOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        let path = options.path();
        path.validate()?;
        let request =
            ApiRequest::delete(&path.segments(None)).query("engine_id", &options.engine_id);
        self.core().execute_empty(&request).await
    }

    /// Lists a table's snapshots.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn list_table_snapshots(
        &self,
        options: &TableOptions,
    ) -> Result<DetailedResponse<ListTableSnapshotsResponse>, ApiError> {
        let path = options.path();
        path.validate()?;
        let request = ApiRequest::get(&path.segments(Some("snapshots")))
            .query("engine_id", &options.engine_id);
        self.core().execute_json(&request).await
    }

    /// Rolls a table back to a previous snapshot.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn rollback_table(
        &self,
        options: &RollbackTableOptions,
    ) -> Result<DetailedResponse<SuccessEnvelope>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&options.path().segments(Some("rollback")))
            .query("engine_id", &options.engine_id)
            .json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Exports a table's data verbatim, without decoding the body.
    ///
    /// The result carries the raw bytes; the export format is whatever
    /// the service produced (Parquet by default).
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn export_table(
        &self,
        options: &TableOptions,
    ) -> Result<DetailedResponse<Bytes>, ApiError> {
        let path = options.path();
        path.validate()?;
        let request = ApiRequest::get(&path.segments(Some("export")))
            .query("engine_id", &options.engine_id);
        self.core().execute_binary(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_path_segments() {
        let options = TableOptions::new("eng-1", "iceberg_data", "sales", "orders");
        let path = options.path();
        assert_eq!(
            path.segments(None),
            vec!["api", "v1", "catalogs", "iceberg_data", "schemas", "sales", "tables", "orders"]
        );
        assert_eq!(path.segments(Some("export")).last(), Some(&"export"));
    }

    #[test]
    fn test_table_path_validation() {
        assert!(TableOptions::new("eng-1", "iceberg_data", "sales", "orders")
            .path()
            .validate()
            .is_ok());
        assert!(matches!(
            TableOptions::new("eng-1", "iceberg_data", "", "orders")
                .path()
                .validate(),
            Err(ConfigError::MissingField { field: "schema_id" })
        ));
    }

    #[test]
    fn test_rename_body_carries_only_new_name() {
        let options =
            RenameTableOptions::new("eng-1", "iceberg_data", "sales", "orders", "orders_v2");
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body, serde_json::json!({"table_name": "orders_v2"}));
    }

    #[test]
    fn test_rollback_validation_requires_snapshot() {
        let options = RollbackTableOptions::new("eng-1", "iceberg_data", "sales", "orders", "");
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingField {
                field: "snapshot_id"
            })
        ));
    }

    #[test]
    fn test_snapshot_decodes() {
        let body = r#"{"snapshots": [{"snapshot_id": "123", "operation": "append"}]}"#;
        let decoded: ListTableSnapshotsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.snapshots[0].snapshot_id, "123");
        assert!(decoded.snapshots[0].committed_at.is_none());
    }
}
