use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema_crawler::domain::model::entities::index::Index;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexResource {
    pub name: String,
    pub table_name: String,
    pub column_names: Vec<String>,
    pub unique: bool,
    #[serde(rename = "type")]
    #[schema(example = "BTREE")]
    pub index_type: String,
}

impl From<&Index> for IndexResource {
    fn from(index: &Index) -> Self {
        Self {
            name: index.name.clone(),
            table_name: index.table_name.clone(),
            column_names: index.column_names.clone(),
            unique: index.unique,
            index_type: index.index_type.clone(),
        }
    }
}
