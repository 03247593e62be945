//! Database registration endpoints.
//!
//! Databases are external data sources (Postgres, MySQL, Kafka, ...)
//! registered with the lakehouse alongside object-storage buckets.
//!
//! ## Endpoints
//!
//! - `list_databases` - GET /api/v1/databases
//! - `create_database` - POST /api/v1/databases
//! - `update_database` - PATCH /api/v1/databases/{database_id}
//! - `delete_database` - DELETE /api/v1/databases/{database_id}
//! - `test_database_connection` - POST /api/v1/databases/test_connection

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessResponse};

/// Connection details for an external database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDetails {
    /// Hostname of the database server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Port the server listens on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Database name on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    /// Username for the connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password for the connection. Never echoed back by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether to connect over TLS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
}

/// A registered database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Database {
    /// Server-assigned database identifier.
    pub database_id: String,
    /// Display name chosen at registration.
    pub database_display_name: String,
    /// Source flavor (`postgresql`, `mysql`, `kafka`, ...).
    pub database_type: String,
    /// Catalog the database is associated with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    /// Connection details, with secrets redacted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_details: Option<DatabaseDetails>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Options for [`LakehouseDataClient::list_databases`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDatabasesOptions {}

/// Response for [`LakehouseDataClient::list_databases`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDatabasesResponse {
    /// The registered databases.
    #[serde(default)]
    pub databases: Vec<Database>,
}

/// Options for [`LakehouseDataClient::create_database`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDatabaseOptions {
    /// Display name for the database. Required.
    pub database_display_name: String,
    /// Source flavor (`postgresql`, `mysql`, `kafka`, ...). Required.
    pub database_type: String,
    /// Catalog to associate the database with. Required.
    pub catalog_name: String,
    /// Connection details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_details: Option<DatabaseDetails>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CreateDatabaseOptions {
    /// Creates options with the required fields.
    pub fn new(
        database_display_name: impl Into<String>,
        database_type: impl Into<String>,
        catalog_name: impl Into<String>,
    ) -> Self {
        Self {
            database_display_name: database_display_name.into(),
            database_type: database_type.into(),
            catalog_name: catalog_name.into(),
            ..Self::default()
        }
    }

    /// Sets the connection details.
    pub fn database_details(mut self, details: DatabaseDetails) -> Self {
        self.database_details = Some(details);
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
        require("database_display_name", &self.database_display_name)?;
        require("database_type", &self.database_type)?;
        require("catalog_name", &self.catalog_name)
    }
}

/// Response for [`LakehouseDataClient::create_database`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateDatabaseResponse {
    /// The newly registered database.
    pub database: Database,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::update_database`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateDatabaseOptions {
    /// The database to update. Required; not part of the body.
    #[serde(skip_serializing)]
    pub database_id: String,
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_display_name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replacement connection details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_details: Option<DatabaseDetails>,
    /// Replacement tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl UpdateDatabaseOptions {
    /// Creates options for the given database.
    pub fn new(database_id: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
            ..Self::default()
        }
    }

    /// Sets the new display name.
    pub fn database_display_name(mut self, name: impl Into<String>) -> Self {
        self.database_display_name = Some(name.into());
        self
    }

    /// Sets the new description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the connection details.
    pub fn database_details(mut self, details: DatabaseDetails) -> Self {
        self.database_details = Some(details);
        self
    }

    /// Replaces the tags.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("database_id", &self.database_id)
    }
}

/// Response for [`LakehouseDataClient::update_database`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDatabaseResponse {
    /// The database after the update.
    pub database: Database,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::delete_database`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteDatabaseOptions {
    /// The database to delete. Required.
    pub database_id: String,
}

impl DeleteDatabaseOptions {
    /// Creates options for the given database.
    pub fn new(database_id: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("database_id", &self.database_id)
    }
}

/// Options for [`LakehouseDataClient::test_database_connection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestDatabaseConnectionOptions {
    /// Source flavor to probe. Required.
    pub database_type: String,
    /// Connection details to probe with. Required.
    pub database_details: DatabaseDetails,
}

impl TestDatabaseConnectionOptions {
    /// Creates options with the required fields.
    pub fn new(database_type: impl Into<String>, database_details: DatabaseDetails) -> Self {
        Self {
            database_type: database_type.into(),
            database_details,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("database_type", &self.database_type)
    }
}

/// Result of a connection probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProbe {
    /// Whether the service could reach the database.
    pub state: bool,
    /// Failure detail when `state` is `false`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_message: Option<String>,
}

/// Response for [`LakehouseDataClient::test_database_connection`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestDatabaseConnectionResponse {
    /// The probe outcome.
    pub connection_response: ConnectionProbe,
}

impl LakehouseDataClient {
    /// Lists registered databases.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] on transport, server, or decode failure.
    pub async fn list_databases(
        &self,
        _options: &ListDatabasesOptions,
    ) -> Result<DetailedResponse<ListDatabasesResponse>, ApiError> {
        let request = ApiRequest::get(&["api", "v1", "databases"]);
        self.core().execute_json(&request).await
    }

    /// Registers an external database.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn create_database(
        &self,
        options: &CreateDatabaseOptions,
    ) -> Result<DetailedResponse<CreateDatabaseResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "databases"]).json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Updates a database's mutable attributes.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `database_id` is unset or the call fails.
    pub async fn update_database(
        &self,
        options: &UpdateDatabaseOptions,
    ) -> Result<DetailedResponse<UpdateDatabaseResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::patch(&["api", "v1", "databases", &options.database_id])
            .json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Deletes a database registration.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `database_id` is unset or the call fails.
    pub async fn delete_database(
        &self,
        options: &DeleteDatabaseOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let request = ApiRequest::delete(&["api", "v1", "databases", &options.database_id]);
        self.core().execute_empty(&request).await
    }

    /// Probes connectivity to a database without registering it.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `database_type` is unset or the call
    /// fails. A reachable-but-refused database is reported in the body,
    /// not as an error.
    pub async fn test_database_connection(
        &self,
        options: &TestDatabaseConnectionOptions,
    ) -> Result<DetailedResponse<TestDatabaseConnectionResponse>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::post(&["api", "v1", "databases", "test_connection"]).json_body(options)?;
        self.core().execute_json(&request).await
    }
}
