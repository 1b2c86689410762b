pub mod crawl_table_query;
