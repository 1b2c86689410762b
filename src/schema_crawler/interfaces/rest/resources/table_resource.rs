use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema_crawler::{
    domain::model::entities::table::Table,
    interfaces::rest::resources::{
        column_resource::ColumnResource, foreign_key_resource::ForeignKeyResource,
        index_resource::IndexResource,
    },
};

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableResource {
    pub name: String,
    pub comment: Option<String>,
    pub row_count: u64,
    pub columns: Vec<ColumnResource>,
    pub foreign_keys: Vec<ForeignKeyResource>,
    pub primary_keys: Vec<String>,
    pub indexes: Vec<IndexResource>,
}

impl From<&Table> for TableResource {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name().to_string(),
            comment: table.comment().map(str::to_string),
            row_count: table.row_count(),
            columns: table.columns().iter().map(ColumnResource::from).collect(),
            foreign_keys: table
                .foreign_keys()
                .iter()
                .map(ForeignKeyResource::from)
                .collect(),
            primary_keys: table.primary_keys().to_vec(),
            indexes: table.indexes().iter().map(IndexResource::from).collect(),
        }
    }
}
