use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use tracing::info;

use crate::schema_crawler::{
    domain::{
        model::{
            commands::invalidate_table_cache_command::InvalidateTableCacheCommand,
            enums::schema_crawler_domain_error::SchemaCrawlerDomainError,
            queries::crawl_table_query::CrawlTableQuery,
        },
        services::{
            schema_cache_command_service::SchemaCacheCommandService,
            schema_crawler_query_service::SchemaCrawlerQueryService,
        },
    },
    interfaces::rest::resources::{
        column_resource::ColumnResource, schema_error_response_resource::SchemaErrorResponseResource,
        table_resource::TableResource,
    },
};

#[derive(Clone)]
pub struct SchemaRestControllerState {
    pub query_service: Arc<dyn SchemaCrawlerQueryService>,
    pub cache_command_service: Arc<dyn SchemaCacheCommandService>,
}

pub fn router(state: SchemaRestControllerState) -> Router {
    Router::new()
        .route("/api/schema/tables", get(list_tables))
        .route("/api/schema/tables/:table_name", get(get_table))
        .route("/api/schema/tables/:table_name/columns", get(get_table_columns))
        .route("/api/schema/cache", delete(clear_schema_cache))
        .route("/api/schema/cache/:table_name", delete(invalidate_table_cache))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/schema/tables",
    tag = "schema",
    responses(
        (status = 200, description = "Complete schema, tables in alphabetical order", body = [TableResource]),
        (status = 500, description = "Schema crawl failed", body = SchemaErrorResponseResource)
    )
)]
pub async fn list_tables(
    State(state): State<SchemaRestControllerState>,
) -> Result<Json<Vec<TableResource>>, (StatusCode, Json<SchemaErrorResponseResource>)> {
    info!("request to list all tables");

    let tables = state
        .query_service
        .handle_crawl_schema()
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tables.iter().map(TableResource::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/schema/tables/{table_name}",
    tag = "schema",
    params(("table_name" = String, Path, description = "Name of the table")),
    responses(
        (status = 200, description = "Table metadata", body = TableResource),
        (status = 400, description = "Invalid table name", body = SchemaErrorResponseResource),
        (status = 404, description = "Table not found", body = SchemaErrorResponseResource),
        (status = 500, description = "Table crawl failed", body = SchemaErrorResponseResource)
    )
)]
pub async fn get_table(
    State(state): State<SchemaRestControllerState>,
    Path(table_name): Path<String>,
) -> Result<Json<TableResource>, (StatusCode, Json<SchemaErrorResponseResource>)> {
    info!(table = %table_name, "request to get table");

    let query = CrawlTableQuery::new(table_name).map_err(map_domain_error)?;

    let table = state
        .query_service
        .handle_crawl_table(query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(TableResource::from(&table)))
}

#[utoipa::path(
    get,
    path = "/api/schema/tables/{table_name}/columns",
    tag = "schema",
    params(("table_name" = String, Path, description = "Name of the table")),
    responses(
        (status = 200, description = "Columns in ordinal order", body = [ColumnResource]),
        (status = 400, description = "Invalid table name", body = SchemaErrorResponseResource),
        (status = 404, description = "Table not found", body = SchemaErrorResponseResource),
        (status = 500, description = "Table crawl failed", body = SchemaErrorResponseResource)
    )
)]
pub async fn get_table_columns(
    State(state): State<SchemaRestControllerState>,
    Path(table_name): Path<String>,
) -> Result<Json<Vec<ColumnResource>>, (StatusCode, Json<SchemaErrorResponseResource>)> {
    info!(table = %table_name, "request to get table columns");

    let query = CrawlTableQuery::new(table_name).map_err(map_domain_error)?;

    let columns = state
        .query_service
        .handle_get_columns(query)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(columns.iter().map(ColumnResource::from).collect()))
}

#[utoipa::path(
    delete,
    path = "/api/schema/cache",
    tag = "schema",
    responses((status = 204, description = "Schema cache cleared"))
)]
pub async fn clear_schema_cache(State(state): State<SchemaRestControllerState>) -> StatusCode {
    state.cache_command_service.handle_clear().await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    delete,
    path = "/api/schema/cache/{table_name}",
    tag = "schema",
    params(("table_name" = String, Path, description = "Name of the table")),
    responses(
        (status = 204, description = "Cache entry invalidated"),
        (status = 400, description = "Invalid table name", body = SchemaErrorResponseResource)
    )
)]
pub async fn invalidate_table_cache(
    State(state): State<SchemaRestControllerState>,
    Path(table_name): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<SchemaErrorResponseResource>)> {
    let command = InvalidateTableCacheCommand::new(table_name).map_err(map_domain_error)?;

    state
        .cache_command_service
        .handle_invalidate_table(command)
        .await;

    Ok(StatusCode::NO_CONTENT)
}

fn map_domain_error(
    error: SchemaCrawlerDomainError,
) -> (StatusCode, Json<SchemaErrorResponseResource>) {
    let status = match error {
        SchemaCrawlerDomainError::InvalidTableName => StatusCode::BAD_REQUEST,
        SchemaCrawlerDomainError::TableNotFound(_) => StatusCode::NOT_FOUND,
        SchemaCrawlerDomainError::CrawlFailed { .. }
        | SchemaCrawlerDomainError::MalformedCatalogRow(_)
        | SchemaCrawlerDomainError::InfrastructureError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    // Driver and catalog details stay in the logs.
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "failed to read database schema".to_string()
    } else {
        error.to_string()
    };

    (status, Json(SchemaErrorResponseResource { message }))
}
