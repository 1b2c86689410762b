use crate::schema_crawler::domain::model::entities::{
    column::Column, foreign_key::ForeignKey, index::Index,
};

pub struct TableParts {
    pub name: String,
    pub comment: Option<String>,
    pub row_count: u64,
    pub columns: Vec<Column>,
    pub primary_keys: Vec<String>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<Index>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrimaryKeyMismatch {
    /// Column carries the `PRI` marker but is not part of the constraint.
    FlaggedOutsideConstraint(String),
    /// Constraint lists a column the marker did not flag.
    UnflaggedInConstraint(String),
    /// Constraint lists a column the table does not have.
    UnknownColumn(String),
}

impl TableParts {
    pub fn primary_key_mismatches(&self) -> Vec<PrimaryKeyMismatch> {
        let mut mismatches = Vec::new();

        for column in &self.columns {
            let in_constraint = self.primary_keys.contains(&column.name);
            if column.primary_key && !in_constraint {
                mismatches.push(PrimaryKeyMismatch::FlaggedOutsideConstraint(
                    column.name.clone(),
                ));
            } else if !column.primary_key && in_constraint {
                mismatches.push(PrimaryKeyMismatch::UnflaggedInConstraint(
                    column.name.clone(),
                ));
            }
        }

        for key in &self.primary_keys {
            if !self.columns.iter().any(|c| &c.name == key) {
                mismatches.push(PrimaryKeyMismatch::UnknownColumn(key.clone()));
            }
        }

        mismatches
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Table {
    name: String,
    comment: Option<String>,
    row_count: u64,
    columns: Vec<Column>,
    primary_keys: Vec<String>,
    foreign_keys: Vec<ForeignKey>,
    indexes: Vec<Index>,
}

impl Table {
    /// Builds a table treating the constraint-derived key list as the source
    /// of truth: column flags are recomputed from it and keys naming unknown
    /// columns are dropped.
    pub fn assemble(parts: TableParts) -> Self {
        let TableParts {
            name,
            comment,
            row_count,
            mut columns,
            primary_keys,
            foreign_keys,
            indexes,
        } = parts;

        let primary_keys = primary_keys
            .into_iter()
            .filter(|key| columns.iter().any(|c| &c.name == key))
            .collect::<Vec<_>>();

        for column in &mut columns {
            column.primary_key = primary_keys.contains(&column.name);
        }

        Self {
            name,
            comment,
            row_count,
            columns,
            primary_keys,
            foreign_keys,
            indexes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    pub fn row_count(&self) -> u64 {
        self.row_count
    }
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }
}
