//! MySQL catalog over `information_schema`.
//!
//! sqlx is async; each connection owns a current-thread runtime that drives
//! it, so callers stay synchronous.

use sqlx::{Connection, MySqlConnection};
use strata_ir::{ColumnDescriptor, TableSummary};
use tokio::runtime::{Builder, Runtime};

use super::{Catalog, Connector, IntrospectError};

const LIST_TABLES: &str = "SELECT CAST(TABLE_NAME AS CHAR), CAST(COALESCE(TABLE_COMMENT, '') AS CHAR) \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE' \
     ORDER BY TABLE_NAME";

const TABLE_COMMENT: &str = "SELECT CAST(COALESCE(TABLE_COMMENT, '') AS CHAR) \
     FROM information_schema.TABLES \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?";

const COLUMNS: &str = "SELECT CAST(COLUMN_NAME AS CHAR), CAST(DATA_TYPE AS CHAR), \
     CAST(COLUMN_TYPE AS CHAR), CAST(IS_NULLABLE AS CHAR), CAST(COLUMN_DEFAULT AS CHAR), \
     CAST(COLUMN_KEY AS CHAR), CAST(EXTRA AS CHAR), CAST(COLUMN_COMMENT AS CHAR), \
     CAST(CHARACTER_MAXIMUM_LENGTH AS SIGNED), CAST(NUMERIC_SCALE AS SIGNED) \
     FROM information_schema.COLUMNS \
     WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? \
     ORDER BY ORDINAL_POSITION";

type ColumnRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    Option<i64>,
    Option<i64>,
);

/// Connects to MySQL with a `mysql://` URL.
#[derive(Debug, Clone)]
pub struct MySqlConnector {
    url: String,
}

impl MySqlConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Connector for MySqlConnector {
    fn connect(&self) -> Result<Box<dyn Catalog>, IntrospectError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(IntrospectError::connect)?;

        let mut conn = runtime
            .block_on(MySqlConnection::connect(&self.url))
            .map_err(IntrospectError::connect)?;

        let schema: Option<String> = match runtime.block_on(
            sqlx::query_scalar("SELECT CAST(DATABASE() AS CHAR)").fetch_one(&mut conn),
        ) {
            Ok(schema) => schema,
            Err(err) => {
                let _ = runtime.block_on(conn.close());
                return Err(IntrospectError::query("current schema", err));
            }
        };

        let Some(schema) = schema else {
            let _ = runtime.block_on(conn.close());
            return Err(IntrospectError::connect(
                "connection URL does not select a database",
            ));
        };

        tracing::debug!(schema = %schema, "connected to mysql");
        Ok(Box::new(MySqlCatalog {
            runtime,
            conn,
            schema,
        }))
    }
}

struct MySqlCatalog {
    runtime: Runtime,
    conn: MySqlConnection,
    schema: String,
}

impl Catalog for MySqlCatalog {
    fn list_tables(&mut self) -> Result<Vec<TableSummary>, IntrospectError> {
        let rows: Vec<(String, String)> = self
            .runtime
            .block_on(
                sqlx::query_as(LIST_TABLES)
                    .bind(&self.schema)
                    .fetch_all(&mut self.conn),
            )
            .map_err(|e| IntrospectError::query("tables", e))?;

        Ok(rows
            .into_iter()
            .map(|(name, comment)| TableSummary { name, comment })
            .collect())
    }

    fn table_comment(&mut self, table: &str) -> Result<String, IntrospectError> {
        let comment: Option<String> = self
            .runtime
            .block_on(
                sqlx::query_scalar(TABLE_COMMENT)
                    .bind(&self.schema)
                    .bind(table)
                    .fetch_optional(&mut self.conn),
            )
            .map_err(|e| IntrospectError::query(format!("comment of '{}'", table), e))?;

        Ok(comment.unwrap_or_default())
    }

    fn columns(&mut self, table: &str) -> Result<Vec<ColumnDescriptor>, IntrospectError> {
        let rows: Vec<ColumnRow> = self
            .runtime
            .block_on(
                sqlx::query_as(COLUMNS)
                    .bind(&self.schema)
                    .bind(table)
                    .fetch_all(&mut self.conn),
            )
            .map_err(|e| IntrospectError::query(format!("columns of '{}'", table), e))?;

        Ok(rows.into_iter().map(column_from_row).collect())
    }

    fn close(self: Box<Self>) -> Result<(), IntrospectError> {
        let MySqlCatalog { runtime, conn, .. } = *self;
        runtime
            .block_on(conn.close())
            .map_err(|e| IntrospectError::query("connection close", e))
    }
}

fn column_from_row(row: ColumnRow) -> ColumnDescriptor {
    let (
        name,
        data_type,
        column_type,
        is_nullable,
        default,
        column_key,
        extra,
        comment,
        max_length,
        numeric_scale,
    ) = row;

    ColumnDescriptor {
        name,
        data_type: data_type.to_ascii_lowercase(),
        column_type,
        nullable: is_nullable.eq_ignore_ascii_case("YES"),
        default,
        primary_key: column_key.eq_ignore_ascii_case("PRI"),
        auto_increment: extra.to_ascii_lowercase().contains("auto_increment"),
        comment,
        max_length: max_length.and_then(|v| u64::try_from(v).ok()),
        numeric_scale: numeric_scale.and_then(|v| u64::try_from(v).ok()),
    }
}
