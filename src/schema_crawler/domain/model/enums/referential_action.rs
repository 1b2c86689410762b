use std::str::FromStr;

use crate::schema_crawler::domain::model::enums::schema_crawler_domain_error::SchemaCrawlerDomainError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    Restrict,
    NoAction,
    SetDefault,
}

impl ReferentialAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

impl FromStr for ReferentialAction {
    type Err = SchemaCrawlerDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CASCADE" => Ok(Self::Cascade),
            "SET NULL" => Ok(Self::SetNull),
            "RESTRICT" => Ok(Self::Restrict),
            "NO ACTION" => Ok(Self::NoAction),
            "SET DEFAULT" => Ok(Self::SetDefault),
            other => Err(SchemaCrawlerDomainError::MalformedCatalogRow(format!(
                "unknown referential action '{other}'"
            ))),
        }
    }
}
