use async_trait::async_trait;

use crate::schema_crawler::domain::model::commands::invalidate_table_cache_command::InvalidateTableCacheCommand;

#[async_trait]
pub trait SchemaCacheCommandService: Send + Sync {
    async fn handle_invalidate_table(&self, command: InvalidateTableCacheCommand);
    async fn handle_clear(&self);
}
