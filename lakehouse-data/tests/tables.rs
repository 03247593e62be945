//! Schema and table endpoint tests against a mock server.

use lakehouse_data::schemas::{CreateSchemaOptions, DeleteSchemaOptions, ListSchemasOptions};
use lakehouse_data::tables::{
    ListTablesOptions, RenameTableOptions, RollbackTableOptions, TableOptions,
};
use lakehouse_data::LakehouseDataClient;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> LakehouseDataClient {
    LakehouseDataClient::builder()
        .service_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_schemas_carries_engine_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/catalogs/iceberg_data/schemas"))
        .and(query_param("engine_id", "eng-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "schemas": ["sales", "marketing"],
            "response": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .list_schemas(&ListSchemasOptions::new("eng-1", "iceberg_data"))
        .await
        .unwrap();
    assert_eq!(response.result().schemas, vec!["sales", "marketing"]);
}

#[tokio::test]
async fn test_create_schema() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/catalogs/iceberg_data/schemas"))
        .and(query_param("engine_id", "eng-1"))
        .and(body_json(json!({
            "schema_name": "sales",
            "bucket_name": "sales-bucket"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "response": {"message": "schema created", "message_code": "success"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options =
        CreateSchemaOptions::new("eng-1", "iceberg_data", "sales").bucket_name("sales-bucket");
    let response = client.create_schema(&options).await.unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_delete_schema() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/catalogs/iceberg_data/schemas/sales"))
        .and(query_param("engine_id", "eng-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .delete_schema(&DeleteSchemaOptions::new("eng-1", "iceberg_data", "sales"))
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
}

#[tokio::test]
async fn test_list_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/catalogs/iceberg_data/schemas/sales/tables"))
        .and(query_param("engine_id", "eng-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tables": ["orders", "customers"],
            "response": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client
        .list_tables(&ListTablesOptions::new("eng-1", "iceberg_data", "sales"))
        .await
        .unwrap();
    assert_eq!(response.result().tables.len(), 2);
}

#[tokio::test]
async fn test_get_table_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/catalogs/iceberg_data/schemas/sales/tables/orders"))
        .and(query_param("engine_id", "eng-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "columns": [
                {"column_name": "order_id", "data_type": "bigint"},
                {"column_name": "placed_at", "data_type": "timestamp"}
            ],
            "response": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = TableOptions::new("eng-1", "iceberg_data", "sales", "orders");
    let response = client.get_table(&options).await.unwrap();
    assert_eq!(response.result().columns[0].column_name, "order_id");
    assert_eq!(
        response.result().columns[1].data_type.as_deref(),
        Some("timestamp")
    );
}

#[tokio::test]
async fn test_rename_table() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/catalogs/iceberg_data/schemas/sales/tables/orders"))
        .and(query_param("engine_id", "eng-1"))
        .and(body_json(json!({"table_name": "orders_v2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"message": "table renamed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options =
        RenameTableOptions::new("eng-1", "iceberg_data", "sales", "orders", "orders_v2");
    let response = client.rename_table(&options).await.unwrap();
    assert_eq!(
        response.result().response.message.as_deref(),
        Some("table renamed")
    );
}

#[tokio::test]
async fn test_snapshots_and_rollback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/api/v1/catalogs/iceberg_data/schemas/sales/tables/orders/snapshots",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "snapshots": [
                {"snapshot_id": "200", "operation": "append", "committed_at": 1756500000000_i64},
                {"snapshot_id": "100", "operation": "overwrite"}
            ],
            "response": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(
            "/api/v1/catalogs/iceberg_data/schemas/sales/tables/orders/rollback",
        ))
        .and(body_json(json!({"snapshot_id": "100"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"message": "rolled back", "message_code": "success"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let table = TableOptions::new("eng-1", "iceberg_data", "sales", "orders");
    let snapshots = client.list_table_snapshots(&table).await.unwrap();
    assert_eq!(snapshots.result().snapshots.len(), 2);

    let rollback =
        RollbackTableOptions::new("eng-1", "iceberg_data", "sales", "orders", "100");
    let response = client.rollback_table(&rollback).await.unwrap();
    assert_eq!(
        response.result().response.message_code.as_deref(),
        Some("success")
    );
}

#[tokio::test]
async fn test_export_table_passes_bytes_through() {
    // Parquet magic followed by junk; the body must come back untouched.
    let payload: &[u8] = b"PAR1\x00\x01\x02\x03not-json";

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(
            "/api/v1/catalogs/iceberg_data/schemas/sales/tables/orders/export",
        ))
        .and(query_param("engine_id", "eng-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(payload, "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = TableOptions::new("eng-1", "iceberg_data", "sales", "orders");
    let response = client.export_table(&options).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.result().as_ref(), payload);
}

#[tokio::test]
async fn test_table_validation_happens_before_io() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;
    let options = TableOptions::new("eng-1", "iceberg_data", "sales", "");
    assert!(client.delete_table(&options).await.is_err());
    assert!(client.export_table(&options).await.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}
