
pub use fixtures::{crawl_table_query, shop_catalog};
pub use harness::{SchemaCrawlerHarness, create_harness};
