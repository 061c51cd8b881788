//! SQL script execution.
//!
//! Two variants, both requiring an absolute path:
//!
//! - [`exec_file`] parses the script into individual statements and
//!   executes them one by one, so it works on drivers without native
//!   multi-statement execution.
//! - [`exec_file_raw`] submits the whole file in one call and leaves
//!   multi-statement handling to the driver.
//!
//! Neither variant is transactional: statements applied before a
//! mid-script failure stay applied. Callers needing atomicity wrap the
//! call in [`transact`](crate::transact).

use std::fs;
use std::path::Path;

use sqlparser::parser::{Parser, ParserError};
use sqlx::{Acquire, Database, Executor};
use tracing::debug;

use crate::error::{Result, SqlUtilError};
use crate::schema::SchemaDialect;

/// Parse `sql` with the dialect of driver `DB` and re-serialize each
/// statement node back to canonical SQL text, in source order.
///
/// Semicolons inside string literals or comments do not split statements;
/// that is the point of using a real parser here.
pub fn split_statements<DB>(sql: &str) -> std::result::Result<Vec<String>, ParserError>
where
    DB: SchemaDialect,
{
    let dialect = DB::parser_dialect();
    let statements = Parser::parse_sql(dialect.as_ref(), sql)?;

    Ok(statements.iter().map(|stmt| stmt.to_string()).collect())
}

/// Execute a SQL script file statement by statement.
///
/// The file is parsed with the driver's dialect and each statement is
/// executed in file order on a single acquired connection. The first
/// failing phase (read, parse, execute) aborts with an error naming that
/// phase; an execution error also carries the zero-based statement index.
pub async fn exec_file<'a, A>(conn: A, path: impl AsRef<Path>) -> Result<()>
where
    A: Acquire<'a>,
    A::Database: SchemaDialect,
    for<'c> &'c mut <A::Database as Database>::Connection: Executor<'c, Database = A::Database>,
{
    let path = path.as_ref();
    let script = read_script(path)?;

    let statements = split_statements::<A::Database>(&script)
        .map_err(|source| SqlUtilError::parse_script(path, source))?;

    debug!(path = %path.display(), statements = statements.len(), "executing script");

    let mut conn = conn.acquire().await.map_err(SqlUtilError::Acquire)?;

    for (index, statement) in statements.iter().enumerate() {
        (&mut *conn)
            .execute(statement.as_str())
            .await
            .map_err(|source| SqlUtilError::execute_statement(path, index, source))?;
    }

    Ok(())
}

/// Execute a SQL script file as a single submission.
///
/// Whether multiple statements in one submission work is up to the driver;
/// use [`exec_file`] when the driver lacks multi-statement support.
pub async fn exec_file_raw<'a, A>(conn: A, path: impl AsRef<Path>) -> Result<()>
where
    A: Acquire<'a>,
    for<'c> &'c mut <A::Database as Database>::Connection: Executor<'c, Database = A::Database>,
{
    let path = path.as_ref();
    let script = read_script(path)?;

    debug!(path = %path.display(), "executing script in one submission");

    let mut conn = conn.acquire().await.map_err(SqlUtilError::Acquire)?;

    (&mut *conn)
        .execute(script.as_str())
        .await
        .map_err(|source| SqlUtilError::execute_statement(path, 0, source))?;

    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if !path.is_absolute() {
        return Err(SqlUtilError::relative_path(path));
    }

    fs::read_to_string(path).map_err(|source| SqlUtilError::read_script(path, source))
}
