pub mod referential_action;
pub mod schema_crawler_domain_error;
