use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema_crawler::domain::model::entities::column::Column;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnResource {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub size: Option<u64>,
    pub precision: Option<u64>,
    pub scale: Option<u64>,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub default_value: Option<String>,
    pub comment: Option<String>,
}

impl From<&Column> for ColumnResource {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            type_name: column.type_name.clone(),
            size: column.size,
            precision: column.precision,
            scale: column.scale,
            nullable: column.nullable,
            primary_key: column.primary_key,
            auto_increment: column.auto_increment,
            default_value: column.default_value.clone(),
            comment: column.comment.clone(),
        }
    }
}
