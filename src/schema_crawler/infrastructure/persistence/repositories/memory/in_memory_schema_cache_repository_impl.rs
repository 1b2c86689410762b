use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::schema_crawler::{
    domain::model::entities::table::Table,
    infrastructure::persistence::repositories::schema_cache_repository::{
        SchemaCacheKey, SchemaCacheRepository,
    },
};

#[derive(Clone, Debug)]
enum CachedSchemaEntry {
    AllTables(Vec<Table>),
    Table(Table),
}

pub struct InMemorySchemaCacheRepositoryImpl {
    entries: Arc<RwLock<HashMap<SchemaCacheKey, CachedSchemaEntry>>>,
}

impl InMemorySchemaCacheRepositoryImpl {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySchemaCacheRepositoryImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaCacheRepository for InMemorySchemaCacheRepositoryImpl {
    async fn get_all_tables(&self) -> Option<Vec<Table>> {
        let read_guard = self.entries.read().await;
        match read_guard.get(&SchemaCacheKey::AllTables) {
            Some(CachedSchemaEntry::AllTables(tables)) => Some(tables.clone()),
            _ => None,
        }
    }

    async fn put_all_tables(&self, tables: Vec<Table>) {
        let mut write_guard = self.entries.write().await;
        for table in &tables {
            write_guard.insert(
                SchemaCacheKey::Table(table.name().to_string()),
                CachedSchemaEntry::Table(table.clone()),
            );
        }
        write_guard.insert(SchemaCacheKey::AllTables, CachedSchemaEntry::AllTables(tables));
    }

    async fn get_table(&self, table_name: &str) -> Option<Table> {
        let read_guard = self.entries.read().await;
        match read_guard.get(&SchemaCacheKey::Table(table_name.to_string())) {
            Some(CachedSchemaEntry::Table(table)) => Some(table.clone()),
            _ => None,
        }
    }

    async fn put_table(&self, table: Table) {
        self.entries.write().await.insert(
            SchemaCacheKey::Table(table.name().to_string()),
            CachedSchemaEntry::Table(table),
        );
    }

    async fn invalidate_table(&self, table_name: &str) {
        let mut write_guard = self.entries.write().await;
        write_guard.remove(&SchemaCacheKey::Table(table_name.to_string()));
        write_guard.remove(&SchemaCacheKey::AllTables);
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
