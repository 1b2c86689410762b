pub mod in_memory_schema_cache_repository_impl;
