pub mod invalidate_table_cache_command;
