use async_trait::async_trait;
use sqlx::{Executor, MySql, MySqlConnection, MySqlPool, Row, mysql::MySqlRow, pool::PoolConnection};
use tracing::warn;

use crate::schema_crawler::{
    domain::model::{
        entities::{column::Column, foreign_key::ForeignKey, index::Index},
        enums::schema_crawler_domain_error::SchemaCrawlerDomainError,
        value_objects::table_name::TableName,
    },
    infrastructure::persistence::repositories::{
        mysql::catalog_row_decoders::{
            ColumnCatalogRow, ForeignKeyCatalogRow, IndexCatalogRow, accumulate_indexes, non_empty,
        },
        schema_metadata_repository::{SchemaMetadataRepository, SchemaMetadataSession},
    },
};

/// The server rejects any write issued inside this transaction.
pub const READ_ONLY_TRANSACTION_STATEMENT: &str =
    "START TRANSACTION READ ONLY, WITH CONSISTENT SNAPSHOT";
pub const END_TRANSACTION_STATEMENT: &str = "ROLLBACK";

pub struct SqlxSchemaMetadataRepositoryImpl {
    pool: MySqlPool,
}

impl SqlxSchemaMetadataRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaMetadataRepository for SqlxSchemaMetadataRepositoryImpl {
    async fn open_session(
        &self,
    ) -> Result<Box<dyn SchemaMetadataSession>, SchemaCrawlerDomainError> {
        let mut connection = self.pool.acquire().await.map_err(infrastructure_error)?;

        // Plain text protocol, the way sqlx issues its own BEGIN.
        (&mut *connection)
            .execute(READ_ONLY_TRANSACTION_STATEMENT)
            .await
            .map_err(infrastructure_error)?;

        Ok(Box::new(SqlxSchemaMetadataSession {
            connection: Some(connection),
        }))
    }
}

/// Catalog session on one pooled connection inside a read-only transaction.
/// The transaction is always rolled back at close.
pub struct SqlxSchemaMetadataSession {
    connection: Option<PoolConnection<MySql>>,
}

impl SqlxSchemaMetadataSession {
    fn connection(&mut self) -> Result<&mut MySqlConnection, SchemaCrawlerDomainError> {
        self.connection.as_deref_mut().ok_or_else(|| {
            SchemaCrawlerDomainError::InfrastructureError(
                "catalog session already closed".to_string(),
            )
        })
    }
}

impl Drop for SqlxSchemaMetadataSession {
    fn drop(&mut self) {
        // A connection still inside the transaction must not go back to the pool.
        if let Some(mut connection) = self.connection.take() {
            warn!("catalog session dropped without close; discarding its connection");
            connection.close_on_drop();
        }
    }
}

#[async_trait]
impl SchemaMetadataSession for SqlxSchemaMetadataSession {
    async fn list_table_names(&mut self) -> Result<Vec<String>, SchemaCrawlerDomainError> {
        let statement = r#"
            SELECT CAST(TABLE_NAME AS CHAR) AS table_name
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = DATABASE()
                AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
        "#;

        let rows = sqlx::query(statement)
            .fetch_all(self.connection()?)
            .await
            .map_err(infrastructure_error)?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("table_name")
                    .map_err(malformed_row)
            })
            .collect()
    }

    async fn get_table_comment(
        &mut self,
        table_name: &TableName,
    ) -> Result<Option<String>, SchemaCrawlerDomainError> {
        let statement = r#"
            SELECT CAST(TABLE_COMMENT AS CHAR) AS table_comment
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = DATABASE()
                AND TABLE_TYPE = 'BASE TABLE'
                AND TABLE_NAME = ?
        "#;

        let row = sqlx::query(statement)
            .bind(table_name.value())
            .fetch_optional(self.connection()?)
            .await
            .map_err(infrastructure_error)?
            .ok_or_else(|| SchemaCrawlerDomainError::TableNotFound(table_name.value().to_string()))?;

        let comment = row
            .try_get::<Option<String>, _>("table_comment")
            .map_err(malformed_row)?;

        Ok(non_empty(comment))
    }

    async fn get_columns(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<Column>, SchemaCrawlerDomainError> {
        let statement = r#"
            SELECT
                CAST(COLUMN_NAME AS CHAR) AS column_name,
                CAST(DATA_TYPE AS CHAR) AS data_type,
                CAST(CHARACTER_MAXIMUM_LENGTH AS UNSIGNED) AS character_maximum_length,
                CAST(NUMERIC_PRECISION AS UNSIGNED) AS numeric_precision,
                CAST(NUMERIC_SCALE AS UNSIGNED) AS numeric_scale,
                CAST(IS_NULLABLE AS CHAR) AS is_nullable,
                CAST(COLUMN_DEFAULT AS CHAR) AS column_default,
                CAST(COLUMN_COMMENT AS CHAR) AS column_comment,
                CAST(EXTRA AS CHAR) AS extra,
                CAST(COLUMN_KEY AS CHAR) AS column_key
            FROM INFORMATION_SCHEMA.COLUMNS
            WHERE TABLE_SCHEMA = DATABASE()
                AND TABLE_NAME = ?
            ORDER BY ORDINAL_POSITION
        "#;

        let rows = sqlx::query(statement)
            .bind(table_name.value())
            .fetch_all(self.connection()?)
            .await
            .map_err(infrastructure_error)?;

        rows.iter()
            .map(|row| column_row(row)?.decode())
            .collect()
    }

    async fn get_primary_keys(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<String>, SchemaCrawlerDomainError> {
        let statement = r#"
            SELECT CAST(COLUMN_NAME AS CHAR) AS column_name
            FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE
            WHERE TABLE_SCHEMA = DATABASE()
                AND TABLE_NAME = ?
                AND CONSTRAINT_NAME = 'PRIMARY'
            ORDER BY ORDINAL_POSITION
        "#;

        let rows = sqlx::query(statement)
            .bind(table_name.value())
            .fetch_all(self.connection()?)
            .await
            .map_err(infrastructure_error)?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("column_name")
                    .map_err(malformed_row)
            })
            .collect()
    }

    async fn get_foreign_keys(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<ForeignKey>, SchemaCrawlerDomainError> {
        let statement = r#"
            SELECT
                CAST(k.CONSTRAINT_NAME AS CHAR) AS constraint_name,
                CAST(k.COLUMN_NAME AS CHAR) AS column_name,
                CAST(k.REFERENCED_TABLE_NAME AS CHAR) AS referenced_table_name,
                CAST(k.REFERENCED_COLUMN_NAME AS CHAR) AS referenced_column_name,
                CAST(r.UPDATE_RULE AS CHAR) AS update_rule,
                CAST(r.DELETE_RULE AS CHAR) AS delete_rule
            FROM INFORMATION_SCHEMA.KEY_COLUMN_USAGE k
            INNER JOIN INFORMATION_SCHEMA.REFERENTIAL_CONSTRAINTS r
                ON k.CONSTRAINT_NAME = r.CONSTRAINT_NAME
                AND k.TABLE_SCHEMA = r.CONSTRAINT_SCHEMA
                AND k.TABLE_NAME = r.TABLE_NAME
            WHERE k.TABLE_SCHEMA = DATABASE()
                AND k.TABLE_NAME = ?
                AND k.REFERENCED_TABLE_NAME IS NOT NULL
            ORDER BY k.CONSTRAINT_NAME, k.ORDINAL_POSITION
        "#;

        let rows = sqlx::query(statement)
            .bind(table_name.value())
            .fetch_all(self.connection()?)
            .await
            .map_err(infrastructure_error)?;

        rows.iter()
            .map(|row| foreign_key_row(row)?.decode(table_name.value()))
            .collect()
    }

    async fn get_indexes(
        &mut self,
        table_name: &TableName,
    ) -> Result<Vec<Index>, SchemaCrawlerDomainError> {
        let statement = r#"
            SELECT
                CAST(INDEX_NAME AS CHAR) AS index_name,
                CAST(COLUMN_NAME AS CHAR) AS column_name,
                CAST(NON_UNIQUE AS SIGNED) AS non_unique,
                CAST(INDEX_TYPE AS CHAR) AS index_type
            FROM INFORMATION_SCHEMA.STATISTICS
            WHERE TABLE_SCHEMA = DATABASE()
                AND TABLE_NAME = ?
            ORDER BY INDEX_NAME, SEQ_IN_INDEX
        "#;

        let rows = sqlx::query(statement)
            .bind(table_name.value())
            .fetch_all(self.connection()?)
            .await
            .map_err(infrastructure_error)?;

        let catalog_rows = rows
            .iter()
            .map(index_row)
            .collect::<Result<Vec<_>, _>>()?;

        accumulate_indexes(table_name.value(), catalog_rows)
    }

    async fn get_row_count(
        &mut self,
        table_name: &TableName,
    ) -> Result<u64, SchemaCrawlerDomainError> {
        let statement = format!(
            "SELECT COUNT(*) AS row_count FROM {}",
            table_name.quoted_identifier()
        );

        let row = sqlx::query(&statement)
            .fetch_one(self.connection()?)
            .await
            .map_err(infrastructure_error)?;

        let count = row.try_get::<i64, _>("row_count").map_err(malformed_row)?;

        u64::try_from(count).map_err(|_| {
            SchemaCrawlerDomainError::MalformedCatalogRow(format!("negative row count {count}"))
        })
    }

    async fn close(&mut self) -> Result<(), SchemaCrawlerDomainError> {
        if let Some(mut connection) = self.connection.take() {
            if let Err(error) = (&mut *connection).execute(END_TRANSACTION_STATEMENT).await {
                connection.close_on_drop();
                return Err(infrastructure_error(error));
            }
        }

        Ok(())
    }
}

fn column_row(row: &MySqlRow) -> Result<ColumnCatalogRow, SchemaCrawlerDomainError> {
    Ok(ColumnCatalogRow {
        column_name: row.try_get("column_name").map_err(malformed_row)?,
        data_type: row.try_get("data_type").map_err(malformed_row)?,
        character_maximum_length: row
            .try_get("character_maximum_length")
            .map_err(malformed_row)?,
        numeric_precision: row.try_get("numeric_precision").map_err(malformed_row)?,
        numeric_scale: row.try_get("numeric_scale").map_err(malformed_row)?,
        is_nullable: row.try_get("is_nullable").map_err(malformed_row)?,
        column_default: row.try_get("column_default").map_err(malformed_row)?,
        column_comment: row.try_get("column_comment").map_err(malformed_row)?,
        extra: row.try_get("extra").map_err(malformed_row)?,
        column_key: row.try_get("column_key").map_err(malformed_row)?,
    })
}

fn foreign_key_row(row: &MySqlRow) -> Result<ForeignKeyCatalogRow, SchemaCrawlerDomainError> {
    Ok(ForeignKeyCatalogRow {
        constraint_name: row.try_get("constraint_name").map_err(malformed_row)?,
        column_name: row.try_get("column_name").map_err(malformed_row)?,
        referenced_table_name: row.try_get("referenced_table_name").map_err(malformed_row)?,
        referenced_column_name: row
            .try_get("referenced_column_name")
            .map_err(malformed_row)?,
        update_rule: row.try_get("update_rule").map_err(malformed_row)?,
        delete_rule: row.try_get("delete_rule").map_err(malformed_row)?,
    })
}

fn index_row(row: &MySqlRow) -> Result<IndexCatalogRow, SchemaCrawlerDomainError> {
    Ok(IndexCatalogRow {
        index_name: row.try_get("index_name").map_err(malformed_row)?,
        column_name: row.try_get("column_name").map_err(malformed_row)?,
        non_unique: row.try_get("non_unique").map_err(malformed_row)?,
        index_type: row.try_get("index_type").map_err(malformed_row)?,
    })
}

fn infrastructure_error(error: sqlx::Error) -> SchemaCrawlerDomainError {
    SchemaCrawlerDomainError::InfrastructureError(error.to_string())
}

fn malformed_row(error: sqlx::Error) -> SchemaCrawlerDomainError {
    SchemaCrawlerDomainError::MalformedCatalogRow(error.to_string())
}
