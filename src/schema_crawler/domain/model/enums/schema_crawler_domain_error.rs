use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaCrawlerDomainError {
    #[error("table name is invalid")]
    InvalidTableName,

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("failed to crawl {scope}")]
    CrawlFailed {
        scope: String,
        #[source]
        source: Box<SchemaCrawlerDomainError>,
    },

    #[error("malformed catalog row: {0}")]
    MalformedCatalogRow(String),

    #[error("infrastructure error: {0}")]
    InfrastructureError(String),
}

impl SchemaCrawlerDomainError {
    pub fn crawl_failed(scope: impl Into<String>, source: SchemaCrawlerDomainError) -> Self {
        Self::CrawlFailed {
            scope: scope.into(),
            source: Box::new(source),
        }
    }

    /// Walks `CrawlFailed` wrappers down to the error that started the failure.
    pub fn root_cause(&self) -> &SchemaCrawlerDomainError {
        match self {
            Self::CrawlFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
