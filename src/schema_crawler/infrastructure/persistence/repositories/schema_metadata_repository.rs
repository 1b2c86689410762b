use async_trait::async_trait;

use crate::schema_crawler::domain::model::{
    entities::{column::Column, foreign_key::ForeignKey, index::Index},
    enums::schema_crawler_domain_error::SchemaCrawlerDomainError,
    value_objects::table_name::TableName,
};

/// Entry point to the database catalog. Every crawl runs on its own session
/// so that the queries issued for it observe one consistent snapshot.
#[async_trait]
pub trait SchemaMetadataRepository: Send + Sync {
    async fn open_session(
        &self,
    ) -> Result<Box<dyn SchemaMetadataSession>, SchemaCrawlerDomainError>;
}

/// Read-only catalog queries scoped to the connected database.
#[async_trait]
pub trait SchemaMetadataSession: Send {
    /// Base tables only, alphabetical.
    async fn list_table_names(&mut self) -> Result<Vec<String>, SchemaCrawlerDomainError>;

    /// Fails with `TableNotFound` when the catalog has no such base table.
    async fn get_table_comment(
        &mut self,
        table_name: &TableName,
    ) -> Result<Option<String>, SchemaCrawlerDomainError>;

    async fn get_columns(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<Column>, SchemaCrawlerDomainError>;

    async fn get_primary_keys(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<String>, SchemaCrawlerDomainError>;

    async fn get_foreign_keys(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<ForeignKey>, SchemaCrawlerDomainError>;

    async fn get_indexes(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<Index>, SchemaCrawlerDomainError>;

    /// Full-table count. The name is interpolated into the statement, so only
    /// names already confirmed by the catalog may reach this call.
    async fn get_row_count(
        &mut self,
        table_name: &TableName,
    ) -> Result<u64, SchemaCrawlerDomainError>;

    async fn close(&mut self) -> Result<(), SchemaCrawlerDomainError>;
}
