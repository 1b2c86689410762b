pub mod catalog_row_decoders;
pub mod sqlx_schema_metadata_repository_impl;
