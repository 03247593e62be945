//! Query-plan endpoint tests against a mock server.

use lakehouse_data::queries::{ExplainAnalyzeStatementOptions, ExplainStatementOptions};
use lakehouse_data::LakehouseDataClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> LakehouseDataClient {
    LakehouseDataClient::builder()
        .service_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_explain_statement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/queries/explain"))
        .and(body_json(json!({
            "engine_id": "eng-1",
            "statement": "SELECT * FROM sales.orders",
            "format": "json",
            "type": "io"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "{\"ioDistribution\": {}}"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = ExplainStatementOptions::new("eng-1", "SELECT * FROM sales.orders")
        .format("json")
        .plan_type("io");
    let response = client.explain_statement(&options).await.unwrap();
    assert!(response.result().result.contains("ioDistribution"));
}

#[tokio::test]
async fn test_explain_analyze_statement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/queries/explain_analyze"))
        .and(body_json(json!({
            "engine_id": "eng-1",
            "statement": "SELECT count(*) FROM sales.orders",
            "verbose": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "Fragment 0 [SINGLE] CPU: 12ms"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options =
        ExplainAnalyzeStatementOptions::new("eng-1", "SELECT count(*) FROM sales.orders")
            .verbose(true);
    let response = client.explain_analyze_statement(&options).await.unwrap();
    assert!(response.result().result.starts_with("Fragment 0"));
}

#[tokio::test]
async fn test_explain_rejects_blank_statement_without_io() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;
    let options = ExplainStatementOptions::new("eng-1", "   ");
    assert!(client.explain_statement(&options).await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}
