//! Per-driver schema knowledge and the truncate-all helper.

use futures::future::BoxFuture;
use sqlx::{Acquire, Database, Executor};
use sqlparser::dialect::Dialect;
use tracing::debug;

use crate::error::{Result, SqlUtilError};

/// Driver-specific knowledge the script and schema helpers need: which
/// SQL dialect to parse with, how to list the schema's tables, and how to
/// truncate one table.
///
/// Implemented for the sqlx drivers enabled through this crate's cargo
/// features (`sqlite`, `postgres`, `mysql`).
pub trait SchemaDialect: Database {
    /// The `sqlparser` dialect matching this driver.
    fn parser_dialect() -> Box<dyn Dialect>;

    /// List the schema's table names, in the driver's listing order.
    fn list_tables(conn: &mut Self::Connection) -> BoxFuture<'_, sqlx::Result<Vec<String>>>;

    /// The statement that empties one table.
    fn truncate_sql(table: &str) -> String;
}

#[cfg(feature = "sqlite")]
impl SchemaDialect for sqlx::Sqlite {
    fn parser_dialect() -> Box<dyn Dialect> {
        Box::new(sqlparser::dialect::SQLiteDialect {})
    }

    fn list_tables(conn: &mut sqlx::SqliteConnection) -> BoxFuture<'_, sqlx::Result<Vec<String>>> {
        Box::pin(
            sqlx::query_scalar(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            )
            .fetch_all(conn),
        )
    }

    fn truncate_sql(table: &str) -> String {
        // SQLite has no TRUNCATE statement
        format!("DELETE FROM \"{}\"", table.replace('"', "\"\""))
    }
}

#[cfg(feature = "postgres")]
impl SchemaDialect for sqlx::Postgres {
    fn parser_dialect() -> Box<dyn Dialect> {
        Box::new(sqlparser::dialect::PostgreSqlDialect {})
    }

    fn list_tables(conn: &mut sqlx::PgConnection) -> BoxFuture<'_, sqlx::Result<Vec<String>>> {
        Box::pin(
            sqlx::query_scalar(
                "SELECT tablename::text FROM pg_tables WHERE schemaname = current_schema()",
            )
            .fetch_all(conn),
        )
    }

    fn truncate_sql(table: &str) -> String {
        format!("TRUNCATE TABLE \"{}\"", table.replace('"', "\"\""))
    }
}

#[cfg(feature = "mysql")]
impl SchemaDialect for sqlx::MySql {
    fn parser_dialect() -> Box<dyn Dialect> {
        Box::new(sqlparser::dialect::MySqlDialect {})
    }

    fn list_tables(conn: &mut sqlx::MySqlConnection) -> BoxFuture<'_, sqlx::Result<Vec<String>>> {
        Box::pin(sqlx::query_scalar("SHOW TABLES").fetch_all(conn))
    }

    fn truncate_sql(table: &str) -> String {
        format!("TRUNCATE TABLE `{}`", table.replace('`', "``"))
    }
}

/// Empty every table in the schema, in listing order.
///
/// Intended for test fixture cleanup. Aborts on the first failure (the
/// listing query or any single truncate); tables already truncated stay
/// truncated — there is no cross-table atomicity. Wrap the call in
/// [`transact`](crate::transact) if that matters for your driver.
pub async fn truncate_all<'a, A>(conn: A) -> Result<()>
where
    A: Acquire<'a>,
    A::Database: SchemaDialect,
    for<'c> &'c mut <A::Database as Database>::Connection: Executor<'c, Database = A::Database>,
{
    let mut conn = conn.acquire().await.map_err(SqlUtilError::Acquire)?;

    let tables = <A::Database as SchemaDialect>::list_tables(&mut *conn)
        .await
        .map_err(SqlUtilError::ListTables)?;

    for table in tables {
        let sql = <A::Database as SchemaDialect>::truncate_sql(&table);

        (&mut *conn)
            .execute(sql.as_str())
            .await
            .map_err(|source| SqlUtilError::TruncateTable {
                table: table.clone(),
                source,
            })?;

        debug!(%table, "truncated table");
    }

    Ok(())
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[test]
    fn sqlite_truncate_sql_quotes_identifier() {
        assert_eq!(
            sqlx::Sqlite::truncate_sql("task"),
            "DELETE FROM \"task\""
        );
        assert_eq!(
            sqlx::Sqlite::truncate_sql("odd\"name"),
            "DELETE FROM \"odd\"\"name\""
        );
    }
}
