use schema_crawler_api::schema_crawler::domain::{
    model::enums::{
        referential_action::ReferentialAction, schema_crawler_domain_error::SchemaCrawlerDomainError,
    },
    services::schema_crawler_query_service::SchemaCrawlerQueryService,
};

use schema_crawler_api::schema_crawler::infrastructure::persistence::repositories::schema_cache_repository::SchemaCacheRepository;

use crate::support::{
    create_harness, crawl_table_query,
    fixtures::{composite_catalog, int_column},
    shop_catalog,
};

#[tokio::test]
async fn handle_crawl_schema_returns_tables_in_alphabetical_order() {
    let harness = create_harness(shop_catalog());

    let tables = harness
        .query_service
        .handle_crawl_schema()
        .await
        .expect("schema crawl should succeed");

    let names = tables.iter().map(|t| t.name()).collect::<Vec<_>>();
    assert_eq!(names, vec!["orders", "users"]);

    let orders = &tables[0];
    assert_eq!(orders.foreign_keys().len(), 1);
    let foreign_key = &orders.foreign_keys()[0];
    assert_eq!(foreign_key.source_table, "orders");
    assert_eq!(foreign_key.source_column, "user_id");
    assert_eq!(foreign_key.target_table, "users");
    assert_eq!(foreign_key.target_column, "id");
    assert_eq!(foreign_key.update_rule, ReferentialAction::Cascade);
    assert_eq!(foreign_key.delete_rule, ReferentialAction::Restrict);

    assert_eq!(harness.metadata_repository.sessions(), (1, 1));
}

#[tokio::test]
async fn handle_crawl_schema_keeps_catalog_names_with_leading_space() {
    let mut catalog = shop_catalog();
    let users = catalog.get("users").expect("users fixture").clone();
    catalog.insert(" legacy".to_string(), users);
    let harness = create_harness(catalog);

    let tables = harness
        .query_service
        .handle_crawl_schema()
        .await
        .expect("schema crawl should succeed");

    let names = tables.iter().map(|t| t.name()).collect::<Vec<_>>();
    assert_eq!(names, vec![" legacy", "orders", "users"]);
    assert!(
        harness
            .metadata_repository
            .issued_queries()
            .contains(&"get_row_count: legacy".to_string())
    );

    let queries_after_crawl = harness.metadata_repository.query_count();
    let legacy = harness
        .query_service
        .handle_crawl_table(crawl_table_query(" legacy"))
        .await
        .expect("cached table should be returned");
    assert_eq!(legacy.name(), " legacy");
    assert_eq!(harness.metadata_repository.query_count(), queries_after_crawl);
}

#[tokio::test]
async fn handle_crawl_table_succeeds_for_every_listed_table() {
    let harness = create_harness(composite_catalog());

    for name in ["order_lines", "orders", "shipments", "users"] {
        let table = harness
            .query_service
            .handle_crawl_table(crawl_table_query(name))
            .await
            .expect("listed table should crawl");
        assert_eq!(table.name(), name);
    }
}

#[tokio::test]
async fn handle_crawl_table_issues_queries_in_fixed_order() {
    let harness = create_harness(shop_catalog());

    let table = harness
        .query_service
        .handle_crawl_table(crawl_table_query("users"))
        .await
        .expect("table crawl should succeed");

    assert_eq!(
        harness.metadata_repository.issued_queries(),
        vec![
            "get_table_comment:users".to_string(),
            "get_columns:users".to_string(),
            "get_primary_keys:users".to_string(),
            "get_foreign_keys:users".to_string(),
            "get_indexes:users".to_string(),
            "get_row_count:users".to_string(),
        ]
    );
    assert_eq!(table.comment(), Some("registered customers"));
    assert_eq!(table.row_count(), 2);
    assert_eq!(harness.metadata_repository.sessions(), (1, 1));
}

#[tokio::test]
async fn handle_crawl_table_returns_not_found_for_unknown_table() {
    let harness = create_harness(shop_catalog());

    let result = harness
        .query_service
        .handle_crawl_table(crawl_table_query("nonexistent"))
        .await;

    assert!(matches!(
        result,
        Err(SchemaCrawlerDomainError::TableNotFound(ref name)) if name == "nonexistent"
    ));
    // The existence check stops the crawl before the row count is attempted.
    assert_eq!(
        harness.metadata_repository.issued_queries(),
        vec!["get_table_comment:nonexistent".to_string()]
    );
    assert_eq!(harness.metadata_repository.sessions(), (1, 1));
    assert!(harness.cache_repository.get_table("nonexistent").await.is_none());
}

#[tokio::test]
async fn handle_crawl_table_wraps_query_failures() {
    let harness = create_harness(shop_catalog());
    harness
        .metadata_repository
        .fail_on("get_foreign_keys", Some("orders"));

    let result = harness
        .query_service
        .handle_crawl_table(crawl_table_query("orders"))
        .await;

    let error = result.expect_err("crawl should fail");
    assert!(matches!(error, SchemaCrawlerDomainError::CrawlFailed { .. }));
    assert!(matches!(
        error.root_cause(),
        SchemaCrawlerDomainError::InfrastructureError(_)
    ));
    assert_eq!(error.to_string(), "failed to crawl table orders");
    assert_eq!(harness.metadata_repository.sessions(), (1, 1));
}

#[tokio::test]
async fn handle_crawl_table_is_idempotent_and_cached() {
    let harness = create_harness(shop_catalog());

    let first = harness
        .query_service
        .handle_crawl_table(crawl_table_query("orders"))
        .await
        .expect("first crawl should succeed");
    let queries_after_first = harness.metadata_repository.query_count();

    let second = harness
        .query_service
        .handle_crawl_table(crawl_table_query("orders"))
        .await
        .expect("second crawl should succeed");

    assert_eq!(first, second);
    assert_eq!(harness.metadata_repository.query_count(), queries_after_first);
    assert_eq!(harness.metadata_repository.sessions(), (1, 1));
}

#[tokio::test]
async fn handle_crawl_schema_populates_per_table_cache() {
    let harness = create_harness(shop_catalog());

    harness
        .query_service
        .handle_crawl_schema()
        .await
        .expect("schema crawl should succeed");
    let queries_after_crawl = harness.metadata_repository.query_count();

    for name in ["orders", "users"] {
        harness
            .query_service
            .handle_crawl_table(crawl_table_query(name))
            .await
            .expect("cached table should be returned");
    }
    harness
        .query_service
        .handle_crawl_schema()
        .await
        .expect("cached schema should be returned");

    assert_eq!(harness.metadata_repository.query_count(), queries_after_crawl);
    assert_eq!(harness.metadata_repository.sessions(), (1, 1));
}

#[tokio::test]
async fn handle_crawl_schema_aborts_without_partial_result() {
    let harness = create_harness(shop_catalog());
    harness.metadata_repository.fail_on("get_indexes", Some("users"));

    let result = harness.query_service.handle_crawl_schema().await;

    let error = result.expect_err("crawl should fail");
    assert_eq!(error.to_string(), "failed to crawl schema");
    assert!(matches!(
        error.root_cause(),
        SchemaCrawlerDomainError::InfrastructureError(_)
    ));
    assert!(harness.cache_repository.get_all_tables().await.is_none());
    // `orders` crawled fine before `users` failed, yet nothing was stored.
    assert!(harness.cache_repository.get_table("orders").await.is_none());
    assert_eq!(harness.metadata_repository.sessions(), (1, 1));

    harness.metadata_repository.stop_failing();
    let tables = harness
        .query_service
        .handle_crawl_schema()
        .await
        .expect("retry after recovery should succeed");
    assert_eq!(tables.len(), 2);
}

#[tokio::test]
async fn handle_crawl_table_keeps_constraint_order_for_composite_primary_key() {
    let harness = create_harness(composite_catalog());

    let table = harness
        .query_service
        .handle_crawl_table(crawl_table_query("order_lines"))
        .await
        .expect("table crawl should succeed");

    assert_eq!(
        table.primary_keys(),
        &["order_id".to_string(), "line_no".to_string()]
    );
    let column_names = table.columns().iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(column_names, vec!["line_no", "order_id", "quantity"]);

    let primary_index = &table.indexes()[0];
    assert_eq!(primary_index.name, "PRIMARY");
    assert_eq!(primary_index.column_names, vec!["order_id", "line_no"]);
}

#[tokio::test]
async fn handle_crawl_table_returns_one_entry_per_composite_foreign_key_column() {
    let harness = create_harness(composite_catalog());

    let table = harness
        .query_service
        .handle_crawl_table(crawl_table_query("shipments"))
        .await
        .expect("table crawl should succeed");

    let foreign_keys = table.foreign_keys();
    assert_eq!(foreign_keys.len(), 2);
    assert!(foreign_keys.iter().all(|fk| fk.name == "fk_shipments_line"));
    assert_eq!(
        foreign_keys
            .iter()
            .map(|fk| (fk.source_column.as_str(), fk.target_column.as_str()))
            .collect::<Vec<_>>(),
        vec![("order_id", "order_id"), ("line_no", "line_no")]
    );

    let fk_index = table
        .indexes()
        .iter()
        .find(|index| index.name == "fk_shipments_line")
        .expect("foreign key index should exist");
    assert_eq!(fk_index.column_names, vec!["order_id", "line_no"]);
    assert!(!fk_index.unique);
}

#[tokio::test]
async fn handle_crawl_table_trusts_constraint_over_column_marker() {
    let mut catalog = shop_catalog();
    let users = catalog.get_mut("users").expect("users fixture");
    // Catalog quirk: the column marker claims `email` is primary too.
    users.columns[1] = int_column("email", "PRI", "");
    users.primary_keys.push("ghost".to_string());
    let harness = create_harness(catalog);

    let table = harness
        .query_service
        .handle_crawl_table(crawl_table_query("users"))
        .await
        .expect("table crawl should succeed");

    assert_eq!(table.primary_keys(), &["id".to_string()]);
    let flags = table
        .columns()
        .iter()
        .map(|c| (c.name.as_str(), c.primary_key))
        .collect::<Vec<_>>();
    assert_eq!(flags, vec![("id", true), ("email", false)]);
}

#[tokio::test]
async fn handle_get_columns_returns_columns_in_ordinal_order() {
    let harness = create_harness(shop_catalog());

    let columns = harness
        .query_service
        .handle_get_columns(crawl_table_query("users"))
        .await
        .expect("columns should be returned");

    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name, "id");
    assert!(columns[0].auto_increment);
    assert!(columns[0].primary_key);
    assert_eq!(columns[1].name, "email");
    assert_eq!(columns[1].type_name, "varchar");
    assert_eq!(columns[1].size, Some(255));
    assert!(!columns[1].nullable);
    assert_eq!(columns[1].comment, None);
}

#[tokio::test]
async fn handle_crawl_table_reports_unique_email_index() {
    let harness = create_harness(shop_catalog());

    let table = harness
        .query_service
        .handle_crawl_table(crawl_table_query("users"))
        .await
        .expect("table crawl should succeed");

    let index = table
        .indexes()
        .iter()
        .find(|index| index.name == "idx_email")
        .expect("idx_email should exist");
    assert_eq!(index.column_names, vec!["email"]);
    assert!(index.unique);
    assert_eq!(index.table_name, "users");
}
