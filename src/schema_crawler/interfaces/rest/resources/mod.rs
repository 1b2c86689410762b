pub mod column_resource;
pub mod foreign_key_resource;
pub mod index_resource;
pub mod schema_error_response_resource;
pub mod table_resource;
