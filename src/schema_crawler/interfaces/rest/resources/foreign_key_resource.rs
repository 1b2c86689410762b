use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schema_crawler::domain::model::entities::foreign_key::ForeignKey;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyResource {
    pub name: String,
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    #[schema(example = "CASCADE")]
    pub update_rule: String,
    #[schema(example = "RESTRICT")]
    pub delete_rule: String,
}

impl From<&ForeignKey> for ForeignKeyResource {
    fn from(foreign_key: &ForeignKey) -> Self {
        Self {
            name: foreign_key.name.clone(),
            source_table: foreign_key.source_table.clone(),
            source_column: foreign_key.source_column.clone(),
            target_table: foreign_key.target_table.clone(),
            target_column: foreign_key.target_column.clone(),
            update_rule: foreign_key.update_rule.as_str().to_string(),
            delete_rule: foreign_key.delete_rule.as_str().to_string(),
        }
    }
}
