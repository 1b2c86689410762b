use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use schema_crawler_api::schema_crawler::interfaces::rest::controllers::schema_rest_controller::{
    clear_schema_cache, get_table, get_table_columns, invalidate_table_cache, list_tables,
};

use schema_crawler_api::schema_crawler::infrastructure::persistence::repositories::schema_cache_repository::SchemaCacheRepository;

use crate::support::{create_harness, shop_catalog};

#[tokio::test]
async fn list_tables_returns_full_metadata_in_alphabetical_order() {
    let harness = create_harness(shop_catalog());

    let response = list_tables(State(harness.controller_state()))
        .await
        .expect("request should succeed");

    let tables = response.0;
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].name, "orders");
    assert_eq!(tables[1].name, "users");
    assert_eq!(tables[0].foreign_keys[0].source_column, "user_id");
    assert_eq!(tables[0].foreign_keys[0].target_table, "users");
    assert_eq!(tables[0].foreign_keys[0].target_column, "id");
    assert_eq!(tables[0].foreign_keys[0].update_rule, "CASCADE");
}

#[tokio::test]
async fn list_tables_returns_internal_error_without_driver_details() {
    let harness = create_harness(shop_catalog());
    harness.metadata_repository.fail_on("list_table_names", None);

    let (status, body) = list_tables(State(harness.controller_state()))
        .await
        .expect_err("request should fail");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.0.message.contains("simulated"));
}

#[tokio::test]
async fn get_table_returns_not_found_for_unknown_table() {
    let harness = create_harness(shop_catalog());

    let (status, _) = get_table(
        State(harness.controller_state()),
        Path("nonexistent".to_string()),
    )
    .await
    .expect_err("request should fail");

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_table_returns_internal_error_when_crawl_fails() {
    let harness = create_harness(shop_catalog());
    harness.metadata_repository.fail_on("get_row_count", Some("users"));

    let (status, _) = get_table(State(harness.controller_state()), Path("users".to_string()))
        .await
        .expect_err("request should fail");

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_table_rejects_invalid_table_name() {
    let harness = create_harness(shop_catalog());

    let (status, _) = get_table(State(harness.controller_state()), Path("x".repeat(65)))
        .await
        .expect_err("request should fail");

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(harness.metadata_repository.query_count(), 0);
}

#[tokio::test]
async fn get_table_serializes_camel_case_fields() {
    let harness = create_harness(shop_catalog());

    let response = get_table(State(harness.controller_state()), Path("users".to_string()))
        .await
        .expect("request should succeed");

    let json = serde_json::to_value(&response.0).expect("resource should serialize");
    assert_eq!(json["name"], "users");
    assert_eq!(json["rowCount"], 2);
    assert_eq!(json["primaryKeys"], serde_json::json!(["id"]));
    assert_eq!(json["columns"][0]["type"], "int");
    assert_eq!(json["columns"][0]["autoIncrement"], true);
    assert_eq!(json["columns"][1]["size"], 255);
    assert_eq!(json["indexes"][1]["columnNames"], serde_json::json!(["email"]));
    assert_eq!(json["indexes"][1]["unique"], true);
    assert_eq!(json["indexes"][1]["type"], "BTREE");
}

#[tokio::test]
async fn get_table_columns_returns_columns_and_not_found() {
    let harness = create_harness(shop_catalog());

    let response = get_table_columns(State(harness.controller_state()), Path("orders".to_string()))
        .await
        .expect("request should succeed");
    let names = response.0.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["id", "user_id"]);

    let (status, _) = get_table_columns(
        State(harness.controller_state()),
        Path("missing".to_string()),
    )
    .await
    .expect_err("request should fail");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cache_endpoints_invalidate_entries() {
    let harness = create_harness(shop_catalog());
    list_tables(State(harness.controller_state()))
        .await
        .expect("request should succeed");

    let status = invalidate_table_cache(State(harness.controller_state()), Path("users".to_string()))
        .await
        .expect("request should succeed");
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(harness.cache_repository.get_table("users").await.is_none());
    assert!(harness.cache_repository.get_table("orders").await.is_some());

    let status = clear_schema_cache(State(harness.controller_state())).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(harness.cache_repository.get_table("orders").await.is_none());
}
