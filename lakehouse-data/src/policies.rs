//! Data-policy endpoints.
//!
//! Data policies attach allow/deny rules to catalog artifacts
//! (`catalog.schema.table` patterns) for named principals.
//!
//! ## Endpoints
//!
//! - `list_data_policies` - GET /api/v1/data_policies
//! - `create_data_policy` - POST /api/v1/data_policies (201 on success)
//! - `get_data_policy` - GET /api/v1/data_policies/{policy_name}
//! - `replace_data_policy` - PUT /api/v1/data_policies/{policy_name}
//! - `delete_data_policy` - DELETE /api/v1/data_policies/{policy_name}
//! - `evaluate_access` - POST /api/v1/access/evaluate

use lakehouse_core::error::ConfigError;
use lakehouse_core::{ApiError, ApiRequest, DetailedResponse};
use serde::{Deserialize, Serialize};

use crate::client::LakehouseDataClient;
use crate::common::{require, SuccessResponse};

/// Principals a policy rule applies to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGrantee {
    /// User or group identifier.
    pub value: String,
    /// Principal kind (`user_identity` or `group`).
    #[serde(rename = "type")]
    pub grantee_type: String,
}

impl RuleGrantee {
    /// A rule grantee naming a single user.
    pub fn user(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            grantee_type: "user_identity".to_string(),
        }
    }

    /// A rule grantee naming a group.
    pub fn group(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            grantee_type: "group".to_string(),
        }
    }
}

/// One allow/deny rule of a data policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// `allow` or `deny`.
    pub effect: String,
    /// Actions the rule covers (`select`, `insert`, `drop`, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// Principals the rule applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grantee: Option<RuleGrantee>,
}

impl Rule {
    /// An `allow` rule for the given actions and grantee.
    pub fn allow(actions: Vec<String>, grantee: RuleGrantee) -> Self {
        Self {
            effect: "allow".to_string(),
            actions,
            grantee: Some(grantee),
        }
    }

    /// A `deny` rule for the given actions and grantee.
    pub fn deny(actions: Vec<String>, grantee: RuleGrantee) -> Self {
        Self {
            effect: "deny".to_string(),
            actions,
            grantee: Some(grantee),
        }
    }
}

/// A stored data policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPolicy {
    /// Unique policy name.
    pub policy_name: String,
    /// Catalog the policy applies to.
    pub catalog_name: String,
    /// Artifact pattern, e.g. `sales.orders` or `sales.*`.
    pub data_artifact: String,
    /// Whether the policy is enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The policy's rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Creation and modification stamps attached to a stored policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyMetadata {
    /// Who created the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    /// Creation timestamp, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Who last modified the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    /// Last-modification timestamp, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Options for [`LakehouseDataClient::list_data_policies`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListDataPoliciesOptions {
    /// Restrict the listing to one catalog.
    pub catalog_name: Option<String>,
    /// Restrict the listing to one enforcement status.
    pub status: Option<String>,
}

impl ListDataPoliciesOptions {
    /// Sets the catalog filter.
    pub fn catalog_name(mut self, catalog_name: impl Into<String>) -> Self {
        self.catalog_name = Some(catalog_name.into());
        self
    }

    /// Sets the status filter.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Response for [`LakehouseDataClient::list_data_policies`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDataPoliciesResponse {
    /// The stored policies.
    #[serde(default)]
    pub policies: Vec<DataPolicy>,
}

/// Options for [`LakehouseDataClient::create_data_policy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDataPolicyOptions {
    /// Unique policy name. Required.
    pub policy_name: String,
    /// Catalog the policy applies to. Required.
    pub catalog_name: String,
    /// Artifact pattern the policy covers. Required.
    pub data_artifact: String,
    /// The policy's rules. At least one is required.
    pub rules: Vec<Rule>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial enforcement status (`active` or `inactive`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CreateDataPolicyOptions {
    /// Creates options with the required fields.
    pub fn new(
        policy_name: impl Into<String>,
        catalog_name: impl Into<String>,
        data_artifact: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            policy_name: policy_name.into(),
            catalog_name: catalog_name.into(),
            data_artifact: data_artifact.into(),
            rules,
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial enforcement status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("policy_name", &self.policy_name)?;
        require("catalog_name", &self.catalog_name)?;
        require("data_artifact", &self.data_artifact)?;
        if self.rules.is_empty() {
            return Err(ConfigError::missing_field("rules"));
        }
        Ok(())
    }
}

/// Response for [`LakehouseDataClient::create_data_policy`] and
/// [`LakehouseDataClient::replace_data_policy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPolicyWriteResponse {
    /// The stored policy as the service recorded it.
    pub data_policy: DataPolicy,
    /// Creation and modification stamps.
    #[serde(default)]
    pub metadata: PolicyMetadata,
    /// Operation outcome.
    #[serde(default)]
    pub response: SuccessResponse,
}

/// Options for [`LakehouseDataClient::get_data_policy`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetDataPolicyOptions {
    /// The policy to fetch. Required.
    pub policy_name: String,
}

impl GetDataPolicyOptions {
    /// Creates options for the given policy.
    pub fn new(policy_name: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("policy_name", &self.policy_name)
    }
}

/// Response for [`LakehouseDataClient::get_data_policy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetDataPolicyResponse {
    /// The requested policy.
    pub data_policy: DataPolicy,
    /// Creation and modification stamps.
    #[serde(default)]
    pub metadata: PolicyMetadata,
}

/// Options for [`LakehouseDataClient::replace_data_policy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaceDataPolicyOptions {
    /// The policy to replace. Required; part of the path.
    #[serde(skip_serializing)]
    pub policy_name: String,
    /// Catalog the policy applies to. Required.
    pub catalog_name: String,
    /// Artifact pattern the policy covers. Required.
    pub data_artifact: String,
    /// The full replacement rule set. At least one rule is required.
    pub rules: Vec<Rule>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enforcement status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ReplaceDataPolicyOptions {
    /// Creates options with the required fields.
    pub fn new(
        policy_name: impl Into<String>,
        catalog_name: impl Into<String>,
        data_artifact: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Self {
        Self {
            policy_name: policy_name.into(),
            catalog_name: catalog_name.into(),
            data_artifact: data_artifact.into(),
            rules,
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the enforcement status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("policy_name", &self.policy_name)?;
        require("catalog_name", &self.catalog_name)?;
        require("data_artifact", &self.data_artifact)?;
        if self.rules.is_empty() {
            return Err(ConfigError::missing_field("rules"));
        }
        Ok(())
    }
}

/// Options for [`LakehouseDataClient::delete_data_policy`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteDataPolicyOptions {
    /// The policy to delete. Required.
    pub policy_name: String,
}

impl DeleteDataPolicyOptions {
    /// Creates options for the given policy.
    pub fn new(policy_name: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("policy_name", &self.policy_name)
    }
}

/// Options for [`LakehouseDataClient::evaluate_access`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluateAccessOptions {
    /// Catalog holding the artifact. Required.
    pub catalog_name: String,
    /// The artifact to check, e.g. `sales.orders`. Required.
    pub data_artifact: String,
    /// The action to check (`select`, `insert`, ...). Required.
    pub action: String,
    /// The principal to check for; defaults to the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl EvaluateAccessOptions {
    /// Creates options with the required fields.
    pub fn new(
        catalog_name: impl Into<String>,
        data_artifact: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            data_artifact: data_artifact.into(),
            action: action.into(),
            user_name: None,
        }
    }

    /// Checks access for a principal other than the caller.
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        require("catalog_name", &self.catalog_name)?;
        require("data_artifact", &self.data_artifact)?;
        require("action", &self.action)
    }
}

/// Response for [`LakehouseDataClient::evaluate_access`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateAccessResponse {
    /// Whether the action would be allowed.
    pub allowed: bool,
    /// The policy that decided the outcome, when one matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decisive_policy: Option<String>,
}

impl LakehouseDataClient {
    /// Lists stored data policies.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] on transport, server, or decode failure.
    pub async fn list_data_policies(
        &self,
        options: &ListDataPoliciesOptions,
    ) -> Result<DetailedResponse<ListDataPoliciesResponse>, ApiError> {
        let request = ApiRequest::get(&["api", "v1", "data_policies"])
            .query_opt("catalog_name", options.catalog_name.as_deref())
            .query_opt("status", options.status.as_deref());
        self.core().execute_json(&request).await
    }

    /// Creates a data policy. The service answers 201 with the stored
    /// policy, its metadata stamps, and an operation outcome.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset, `rules` is
    /// empty, or the call fails.
    pub async fn create_data_policy(
        &self,
        options: &CreateDataPolicyOptions,
    ) -> Result<DetailedResponse<DataPolicyWriteResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "data_policies"]).json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Fetches a single data policy.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `policy_name` is unset or the call fails.
    pub async fn get_data_policy(
        &self,
        options: &GetDataPolicyOptions,
    ) -> Result<DetailedResponse<GetDataPolicyResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::get(&["api", "v1", "data_policies", &options.policy_name]);
        self.core().execute_json(&request).await
    }

    /// Replaces a data policy wholesale.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset, `rules` is
    /// empty, or the call fails.
    pub async fn replace_data_policy(
        &self,
        options: &ReplaceDataPolicyOptions,
    ) -> Result<DetailedResponse<DataPolicyWriteResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::put(&["api", "v1", "data_policies", &options.policy_name])
            .json_body(options)?;
        self.core().execute_json(&request).await
    }

    /// Deletes a data policy.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if `policy_name` is unset or the call fails.
    pub async fn delete_data_policy(
        &self,
        options: &DeleteDataPolicyOptions,
    ) -> Result<DetailedResponse<()>, ApiError> {
        options.validate()?;
        let request = ApiRequest::delete(&["api", "v1", "data_policies", &options.policy_name]);
        self.core().execute_empty(&request).await
    }

    /// Asks whether an action on an artifact would be allowed under the
    /// stored policies, without performing it.
    ///
    /// ## Errors
    ///
    /// Returns an [`ApiError`] if a required field is unset or the call
    /// fails.
    pub async fn evaluate_access(
        &self,
        options: &EvaluateAccessOptions,
    ) -> Result<DetailedResponse<EvaluateAccessResponse>, ApiError> {
        options.validate()?;
        let request = ApiRequest::post(&["api", "v1", "access", "evaluate"]).json_body(options)?;
        self.core().execute_json(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rules() -> Vec<Rule> {
        vec![Rule::allow(
            vec!["select".into()],
            RuleGrantee::user("analyst@example.test"),
        )]
    }

    #[test]
    fn test_create_options_validation() {
        let options = CreateDataPolicyOptions::new(
            "orders_readers",
            "iceberg_data",
            "sales.orders",
            sample_rules(),
        );
        assert!(options.validate().is_ok());

        let options =
            CreateDataPolicyOptions::new("orders_readers", "iceberg_data", "sales.orders", vec![]);
        assert!(matches!(
            options.validate(),
            Err(ConfigError::MissingField { field: "rules" })
        ));
    }

    #[test]
    fn test_create_body_shape() {
        let options = CreateDataPolicyOptions::new(
            "orders_readers",
            "iceberg_data",
            "sales.orders",
            sample_rules(),
        )
        .description("readers of the orders table");
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body["policy_name"], "orders_readers");
        assert_eq!(body["rules"][0]["effect"], "allow");
        assert_eq!(body["rules"][0]["grantee"]["type"], "user_identity");
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_replace_body_excludes_policy_name() {
        let options = ReplaceDataPolicyOptions::new(
            "orders_readers",
            "iceberg_data",
            "sales.*",
            sample_rules(),
        );
        let body = serde_json::to_value(&options).unwrap();
        assert!(body.get("policy_name").is_none());
        assert_eq!(body["data_artifact"], "sales.*");
    }

    #[test]
    fn test_write_response_decodes() {
        let body = r#"{
            "data_policy": {
                "policy_name": "orders_readers",
                "catalog_name": "iceberg_data",
                "data_artifact": "sales.orders",
                "rules": [{"effect": "allow", "actions": ["select"]}]
            },
            "metadata": {"creator": "admin", "created_at": "2026-08-30T12:00:00Z"},
            "response": {"message": "created", "message_code": "success"}
        }"#;
        let decoded: DataPolicyWriteResponse = serde_json::from_str(body).unwrap();
        assert_eq!(decoded.data_policy.policy_name, "orders_readers");
        assert_eq!(decoded.data_policy.rules.len(), 1);
        assert_eq!(decoded.metadata.creator.as_deref(), Some("admin"));
        assert_eq!(decoded.response.message_code.as_deref(), Some("success"));
    }

    #[test]
    fn test_evaluate_options_validation() {
        assert!(EvaluateAccessOptions::new("iceberg_data", "sales.orders", "select")
            .validate()
            .is_ok());
        assert!(EvaluateAccessOptions::new("iceberg_data", "", "select")
            .validate()
            .is_err());
    }
}
