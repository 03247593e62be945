//! Query-plan endpoints.
//!
//! ## Endpoints
//!
//! - `explain_statement` - POST /api/v1/queries/explain
//! - `explain_analyze_statement` - POST /api/v1/queries/explain_analyze

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::require;

/// Options for [`LakehouseDataClient::explain_statement`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplainStatementOptions {
    /// Engine to plan on. Required.
    pub engine_id: String,
    /// The SQL statement to explain. Required.
    pub statement: String,
    /// Plan output format (`text`, `json`, `graphviz`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Plan stage to show (`logical`, `distributed`, `io`, `validate`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,
}

impl ExplainStatementOptions {
    /// Creates options with the required fields.
    pub fn new(engine_id: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            statement: statement.into(),
            ..Self::default()
        }
    }

    /// Sets the plan output format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the plan stage to show.
    pub fn plan_type(mut self, plan_type: impl Into<String>) -> Self {
        self.plan_type = Some(plan_type.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)?;
        require("statement", &self.statement)
    }
}

/// Options for [`LakehouseDataClient::explain_analyze_statement`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExplainAnalyzeStatementOptions {
    /// Engine to run on. Required.
    pub engine_id: String,
    /// The SQL statement to execute and profile. Required.
    pub statement: String,
    /// When `true`, report costs without executing the statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl ExplainAnalyzeStatementOptions {
    /// Creates options with the required fields.
    pub fn new(engine_id: impl Into<String>, statement: impl Into<String>) -> Self {
        Self {
            engine_id: engine_id.into(),
            statement: statement.into(),
            verbose: None,
        }
    }

    /// Requests verbose cost output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("engine_id", &self.engine_id)?;
        require("statement", &self.statement)
    }
}

/// Response for both explain endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainResponse {
    /// The rendered query plan.
    pub result: String,
}

impl LakehouseDataClient {
    /// Renders the query plan for a statement without executing it.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn explain_statement(
        &self,
        options: &ExplainStatementOptions,
    ) -> Result<DetailedResponse<ExplainResponse>, ApiError> {
        options.validate()?;
        let request =
            ApiRequest::post(&["api", "v1", "queries", "explain"]).json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Executes a statement and reports the plan with runtime costs.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn explain_analyze_statement(
        &self,
        options: &ExplainAnalyzeStatementOptions,
    ) -> Result<DetailedResponse<ExplainResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "queries", "explain_analyze"])
            .json_body(options)?;
        self.core().execute_json(&request).await
    }
}
