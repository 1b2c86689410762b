use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::schema_crawler::{
    domain::{
        model::{
            entities::{
                column::Column,
                table::{PrimaryKeyMismatch, Table, TableParts},
            },
            enums::schema_crawler_domain_error::SchemaCrawlerDomainError,
            queries::crawl_table_query::CrawlTableQuery,
            value_objects::table_name::TableName,
        },
        services::schema_crawler_query_service::SchemaCrawlerQueryService,
    },
    infrastructure::persistence::repositories::{
        schema_cache_repository::SchemaCacheRepository,
        schema_metadata_repository::{SchemaMetadataRepository, SchemaMetadataSession},
    },
};

pub struct SchemaCrawlerQueryServiceImpl {
    metadata_repository: Arc<dyn SchemaMetadataRepository>,
    cache_repository: Arc<dyn SchemaCacheRepository>,
}

impl SchemaCrawlerQueryServiceImpl {
    pub fn new(
        metadata_repository: Arc<dyn SchemaMetadataRepository>,
        cache_repository: Arc<dyn SchemaCacheRepository>,
    ) -> Self {
        Self {
            metadata_repository,
            cache_repository,
        }
    }

    async fn crawl_schema_uncached(&self) -> Result<Vec<Table>, SchemaCrawlerDomainError> {
        let mut session = self.metadata_repository.open_session().await?;
        let result = Self::crawl_all_tables(session.as_mut()).await;
        finish_session(session.as_mut(), result).await
    }

    async fn crawl_table_uncached(
        &self,
        table_name: &TableName,
    ) -> Result<Table, SchemaCrawlerDomainError> {
        let mut session = self.metadata_repository.open_session().await?;
        let result = Self::crawl_single_table(session.as_mut(), table_name).await;
        finish_session(session.as_mut(), result).await
    }

    async fn crawl_all_tables(
        session: &mut dyn SchemaMetadataSession,
    ) -> Result<Vec<Table>, SchemaCrawlerDomainError> {
        let table_names = session.list_table_names().await?;
        let mut tables = Vec::with_capacity(table_names.len());

        for raw_name in table_names {
            let table_name = TableName::new(raw_name.clone()).map_err(|_| {
                SchemaCrawlerDomainError::MalformedCatalogRow(format!(
                    "catalog returned unusable table name '{raw_name}'"
                ))
            })?;
            tables.push(Self::crawl_single_table(session, &table_name).await?);
        }

        Ok(tables)
    }

    /// Queries run in a fixed order. The comment lookup doubles as the
    /// existence check, so the row count never sees an unknown name.
    async fn crawl_single_table(
        session: &mut dyn SchemaMetadataSession,
        table_name: &TableName,
    ) -> Result<Table, SchemaCrawlerDomainError> {
        debug!(table = table_name.value(), "crawling table");

        let comment = session.get_table_comment(table_name).await?;
        let columns = session.get_columns(table_name).await?;
        let primary_keys = session.get_primary_keys(table_name).await?;
        let foreign_keys = session.get_foreign_keys(table_name).await?;
        let indexes = session.get_indexes(table_name).await?;
        let row_count = session.get_row_count(table_name).await?;

        let parts = TableParts {
            name: table_name.value().to_string(),
            comment,
            row_count,
            columns,
            primary_keys,
            foreign_keys,
            indexes,
        };

        for mismatch in parts.primary_key_mismatches() {
            match mismatch {
                PrimaryKeyMismatch::FlaggedOutsideConstraint(column) => warn!(
                    table = table_name.value(),
                    column = %column,
                    "column flagged as primary key is missing from the PRIMARY constraint; flag cleared"
                ),
                PrimaryKeyMismatch::UnflaggedInConstraint(column) => warn!(
                    table = table_name.value(),
                    column = %column,
                    "PRIMARY constraint column lacks the column-level key marker; flag set"
                ),
                PrimaryKeyMismatch::UnknownColumn(column) => warn!(
                    table = table_name.value(),
                    column = %column,
                    "PRIMARY constraint references an unknown column; entry dropped"
                ),
            }
        }

        Ok(Table::assemble(parts))
    }
}

async fn finish_session<T>(
    session: &mut dyn SchemaMetadataSession,
    result: Result<T, SchemaCrawlerDomainError>,
) -> Result<T, SchemaCrawlerDomainError> {
    match session.close().await {
        Ok(()) => result,
        // The crawl error is the one worth reporting.
        Err(close_error) if result.is_err() => {
            warn!(error = %close_error, "failed to close catalog session after crawl error");
            result
        }
        Err(close_error) => Err(close_error),
    }
}

#[async_trait]
impl SchemaCrawlerQueryService for SchemaCrawlerQueryServiceImpl {
    async fn handle_crawl_schema(&self) -> Result<Vec<Table>, SchemaCrawlerDomainError> {
        if let Some(tables) = self.cache_repository.get_all_tables().await {
            debug!(tables = tables.len(), "schema served from cache");
            return Ok(tables);
        }

        info!("starting schema crawl");

        match self.crawl_schema_uncached().await {
            Ok(tables) => {
                self.cache_repository.put_all_tables(tables.clone()).await;
                info!(tables = tables.len(), "schema crawl completed");
                Ok(tables)
            }
            Err(cause) => {
                error!(operation = "crawl_schema", error = ?cause, "schema crawl failed");
                Err(SchemaCrawlerDomainError::crawl_failed("schema", cause))
            }
        }
    }

    async fn handle_crawl_table(
        &self,
        query: CrawlTableQuery,
    ) -> Result<Table, SchemaCrawlerDomainError> {
        let table_name = query.table_name();

        if let Some(table) = self.cache_repository.get_table(table_name.value()).await {
            debug!(table = table_name.value(), "table served from cache");
            return Ok(table);
        }

        match self.crawl_table_uncached(table_name).await {
            Ok(table) => {
                self.cache_repository.put_table(table.clone()).await;
                Ok(table)
            }
            Err(SchemaCrawlerDomainError::TableNotFound(name)) => {
                info!(operation = "crawl_table", table = %name, "table not found");
                Err(SchemaCrawlerDomainError::TableNotFound(name))
            }
            Err(cause) => {
                error!(
                    operation = "crawl_table",
                    table = table_name.value(),
                    error = ?cause,
                    "table crawl failed"
                );
                Err(SchemaCrawlerDomainError::crawl_failed(
                    format!("table {}", table_name.value()),
                    cause,
                ))
            }
        }
    }

    async fn handle_get_columns(
        &self,
        query: CrawlTableQuery,
    ) -> Result<Vec<Column>, SchemaCrawlerDomainError> {
        let table = self.handle_crawl_table(query).await?;
        Ok(table.columns().to_vec())
    }
}
