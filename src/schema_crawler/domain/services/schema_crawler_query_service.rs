use async_trait::async_trait;

use crate::schema_crawler::domain::model::{
    entities::{column::Column, table::Table},
    enums::schema_crawler_domain_error::SchemaCrawlerDomainError,
    queries::crawl_table_query::CrawlTableQuery,
};

#[async_trait]
pub trait SchemaCrawlerQueryService: Send + Sync {
    async fn handle_crawl_schema(&self) -> Result<Vec<Table>, SchemaCrawlerDomainError>;
    async fn handle_crawl_table(
        &self,
        query: CrawlTableQuery,
    ) -> Result<Table, SchemaCrawlerDomainError>;
    async fn handle_get_columns(
        &self,
        query: CrawlTableQuery,
    ) -> Result<Vec<Column>, SchemaCrawlerDomainError>;
}
