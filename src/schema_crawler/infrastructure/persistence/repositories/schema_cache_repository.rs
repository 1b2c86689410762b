use async_trait::async_trait;

use crate::schema_crawler::domain::model::entities::table::Table;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum SchemaCacheKey {
    AllTables,
    Table(String),
}

#[async_trait]
pub trait SchemaCacheRepository: Send + Sync {
    async fn get_all_tables(&self) -> Option<Vec<Table>>;
    /// Stores the aggregate entry and one entry per contained table.
    async fn put_all_tables(&self, tables: Vec<Table>);
    async fn get_table(&self, table_name: &str) -> Option<Table>;
    async fn put_table(&self, table: Table);
    /// Drops the table entry and the aggregate entry that contains it.
    async fn invalidate_table(&self, table_name: &str);
    async fn clear(&self);
}
