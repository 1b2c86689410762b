use std::{sync::Arc, time::Duration};

use axum::Router;
use sqlx::mysql::MySqlPoolOptions;

use crate::{
    config::app_config::AppConfig,
    schema_crawler::{
        application::{
            command_services::schema_cache_command_service_impl::SchemaCacheCommandServiceImpl,
            query_services::schema_crawler_query_service_impl::SchemaCrawlerQueryServiceImpl,
        },
        infrastructure::persistence::repositories::{
            memory::in_memory_schema_cache_repository_impl::InMemorySchemaCacheRepositoryImpl,
            mysql::sqlx_schema_metadata_repository_impl::SqlxSchemaMetadataRepositoryImpl,
        },
        interfaces::rest::controllers::schema_rest_controller::{SchemaRestControllerState, router},
    },
};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub async fn build_schema_crawler_router(config: &AppConfig) -> Result<Router, String> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(config.database_acquire_timeout_secs))
        .connect(&config.database_url())
        .await
        .map_err(|e| e.to_string())?;

    let metadata_repository = Arc::new(SqlxSchemaMetadataRepositoryImpl::new(pool));
    let cache_repository = Arc::new(InMemorySchemaCacheRepositoryImpl::new());

    let query_service = Arc::new(SchemaCrawlerQueryServiceImpl::new(
        metadata_repository,
        cache_repository.clone(),
    ));
    let cache_command_service = Arc::new(SchemaCacheCommandServiceImpl::new(cache_repository));

    Ok(router(SchemaRestControllerState {
        query_service,
        cache_command_service,
    }))
}
