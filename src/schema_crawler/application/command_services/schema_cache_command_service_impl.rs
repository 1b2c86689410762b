use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::schema_crawler::{
    domain::{
        model::commands::invalidate_table_cache_command::InvalidateTableCacheCommand,
        services::schema_cache_command_service::SchemaCacheCommandService,
    },
    infrastructure::persistence::repositories::schema_cache_repository::SchemaCacheRepository,
};

pub struct SchemaCacheCommandServiceImpl {
    cache_repository: Arc<dyn SchemaCacheRepository>,
}

impl SchemaCacheCommandServiceImpl {
    pub fn new(cache_repository: Arc<dyn SchemaCacheRepository>) -> Self {
        Self { cache_repository }
    }
}

#[async_trait]
impl SchemaCacheCommandService for SchemaCacheCommandServiceImpl {
    async fn handle_invalidate_table(&self, command: InvalidateTableCacheCommand) {
        self.cache_repository
            .invalidate_table(command.table_name().value())
            .await;
        info!(table = command.table_name().value(), "schema cache entry invalidated");
    }

    async fn handle_clear(&self) {
        self.cache_repository.clear().await;
        info!("schema cache cleared");
    }
}
