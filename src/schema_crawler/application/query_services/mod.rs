pub mod schema_crawler_query_service_impl;
