pub mod memory;
pub mod mysql;
pub mod schema_cache_repository;
pub mod schema_metadata_repository;
