pub mod schema_cache_command_service;
pub mod schema_crawler_query_service;
