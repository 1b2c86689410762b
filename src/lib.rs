pub mod config;
pub mod schema_crawler;
