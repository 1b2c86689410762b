pub mod schema_cache_command_service_impl;
