use lazy_static::lazy_static;
use regex::Regex;

use crate::schema_crawler::domain::model::enums::schema_crawler_domain_error::SchemaCrawlerDomainError;

lazy_static! {
    // 1..=64 characters, no control characters, no trailing whitespace.
    // MySQL accepts a leading space in a table name, so it is kept verbatim.
    static ref TABLE_NAME_PATTERN: Regex =
        Regex::new(r"^[^\x00-\x1F\x7F]{0,63}[^\x00-\x1F\x7F\s]$").expect("valid regex");
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Validates without rewriting, so catalog names round-trip unchanged.
    pub fn new(value: String) -> Result<Self, SchemaCrawlerDomainError> {
        if !TABLE_NAME_PATTERN.is_match(&value) {
            return Err(SchemaCrawlerDomainError::InvalidTableName);
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Backtick-quoted form for the few statements that cannot bind the name.
    pub fn quoted_identifier(&self) -> String {
        format!("`{}`", self.0.replace('`', "``"))
    }
}
