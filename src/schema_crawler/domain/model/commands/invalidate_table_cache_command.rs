use crate::schema_crawler::domain::model::{
    enums::schema_crawler_domain_error::SchemaCrawlerDomainError,
    value_objects::table_name::TableName,
};

#[derive(Clone, Debug)]
pub struct InvalidateTableCacheCommand {
    table_name: TableName,
}

impl InvalidateTableCacheCommand {
    pub fn new(table_name: String) -> Result<Self, SchemaCrawlerDomainError> {
        Ok(Self {
            table_name: TableName::new(table_name)?,
        })
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }
}
