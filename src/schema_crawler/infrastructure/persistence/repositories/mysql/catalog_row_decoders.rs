use std::collections::HashMap;

use crate::schema_crawler::domain::model::{
    entities::{column::Column, foreign_key::ForeignKey, index::Index},
    enums::{
        referential_action::ReferentialAction, schema_crawler_domain_error::SchemaCrawlerDomainError,
    },
};

const NULLABLE_MARKER: &str = "YES";
const PRIMARY_KEY_MARKER: &str = "PRI";
const AUTO_INCREMENT_MARKER: &str = "auto_increment";

/// Raw `INFORMATION_SCHEMA.COLUMNS` row.
#[derive(Clone, Debug, Default)]
pub struct ColumnCatalogRow {
    pub column_name: Option<String>,
    pub data_type: Option<String>,
    pub character_maximum_length: Option<u64>,
    pub numeric_precision: Option<u64>,
    pub numeric_scale: Option<u64>,
    pub is_nullable: Option<String>,
    pub column_default: Option<String>,
    pub column_comment: Option<String>,
    pub extra: Option<String>,
    pub column_key: Option<String>,
}

impl ColumnCatalogRow {
    pub fn decode(self) -> Result<Column, SchemaCrawlerDomainError> {
        let name = required(self.column_name, "COLUMNS.COLUMN_NAME")?;
        let type_name = required(self.data_type, "COLUMNS.DATA_TYPE")?;

        Ok(Column {
            name,
            type_name,
            size: self.character_maximum_length,
            precision: self.numeric_precision,
            scale: self.numeric_scale,
            nullable: self
                .is_nullable
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(NULLABLE_MARKER)),
            primary_key: self
                .column_key
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(PRIMARY_KEY_MARKER)),
            auto_increment: self
                .extra
                .is_some_and(|v| v.to_ascii_lowercase().contains(AUTO_INCREMENT_MARKER)),
            default_value: self.column_default,
            comment: non_empty(self.column_comment),
        })
    }
}

/// Raw `KEY_COLUMN_USAGE` joined with `REFERENTIAL_CONSTRAINTS`.
#[derive(Clone, Debug, Default)]
pub struct ForeignKeyCatalogRow {
    pub constraint_name: Option<String>,
    pub column_name: Option<String>,
    pub referenced_table_name: Option<String>,
    pub referenced_column_name: Option<String>,
    pub update_rule: Option<String>,
    pub delete_rule: Option<String>,
}

impl ForeignKeyCatalogRow {
    pub fn decode(self, source_table: &str) -> Result<ForeignKey, SchemaCrawlerDomainError> {
        Ok(ForeignKey {
            name: required(self.constraint_name, "KEY_COLUMN_USAGE.CONSTRAINT_NAME")?,
            source_table: source_table.to_string(),
            source_column: required(self.column_name, "KEY_COLUMN_USAGE.COLUMN_NAME")?,
            target_table: required(
                self.referenced_table_name,
                "KEY_COLUMN_USAGE.REFERENCED_TABLE_NAME",
            )?,
            target_column: required(
                self.referenced_column_name,
                "KEY_COLUMN_USAGE.REFERENCED_COLUMN_NAME",
            )?,
            update_rule: required(self.update_rule, "REFERENTIAL_CONSTRAINTS.UPDATE_RULE")?
                .parse::<ReferentialAction>()?,
            delete_rule: required(self.delete_rule, "REFERENTIAL_CONSTRAINTS.DELETE_RULE")?
                .parse::<ReferentialAction>()?,
        })
    }
}

/// Raw `INFORMATION_SCHEMA.STATISTICS` row, one per (index, column).
#[derive(Clone, Debug, Default)]
pub struct IndexCatalogRow {
    pub index_name: Option<String>,
    /// `None` for functional key parts.
    pub column_name: Option<String>,
    pub non_unique: Option<i64>,
    pub index_type: Option<String>,
}

/// Folds statistics rows into one `Index` per name. Rows are expected in
/// (index name, sequence in index) order; indexes come out in first-seen
/// order and the first row of each index decides uniqueness and type.
pub fn accumulate_indexes(
    table_name: &str,
    rows: Vec<IndexCatalogRow>,
) -> Result<Vec<Index>, SchemaCrawlerDomainError> {
    let mut indexes: Vec<Index> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let index_name = required(row.index_name, "STATISTICS.INDEX_NAME")?;

        let position = match positions.get(&index_name) {
            Some(position) => *position,
            None => {
                let non_unique = row.non_unique.ok_or_else(|| {
                    SchemaCrawlerDomainError::MalformedCatalogRow(
                        "missing STATISTICS.NON_UNIQUE".to_string(),
                    )
                })?;

                indexes.push(Index {
                    name: index_name.clone(),
                    table_name: table_name.to_string(),
                    column_names: Vec::new(),
                    unique: non_unique == 0,
                    index_type: row.index_type.unwrap_or_default(),
                });
                positions.insert(index_name, indexes.len() - 1);
                indexes.len() - 1
            }
        };

        if let Some(column_name) = row.column_name {
            indexes[position].column_names.push(column_name);
        }
    }

    Ok(indexes)
}

/// Catalogs report a missing comment as an empty string.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String, SchemaCrawlerDomainError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SchemaCrawlerDomainError::MalformedCatalogRow(format!("missing {field}")))
}
