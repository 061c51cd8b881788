//! Structured error types for sqlutil.
//!
//! Uses `thiserror` so library consumers get composable errors with full
//! source chains; application code can still bubble everything through
//! `anyhow` if it prefers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for script execution and schema helpers.
#[derive(Error, Debug)]
pub enum SqlUtilError {
    /// Script path was not absolute (configuration error, caught before
    /// touching the filesystem)
    #[error("script path must be absolute: {path:?}")]
    RelativePath { path: PathBuf },

    /// Reading the script file failed
    #[error("failed to read script {path:?}")]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The script did not parse as SQL in the driver's dialect
    #[error("failed to parse sql in {path:?}")]
    ParseScript {
        path: PathBuf,
        #[source]
        source: sqlparser::parser::ParserError,
    },

    /// Acquiring a connection from the caller-supplied handle failed
    #[error("failed to acquire connection")]
    Acquire(#[source] sqlx::Error),

    /// One statement of a script failed; `index` is its zero-based
    /// position in the file
    #[error("failed to execute statement {index} of {path:?}")]
    ExecuteStatement {
        path: PathBuf,
        index: usize,
        #[source]
        source: sqlx::Error,
    },

    /// Listing the schema's tables failed
    #[error("failed to list tables")]
    ListTables(#[source] sqlx::Error),

    /// Truncating a single table failed
    #[error("failed to truncate table {table}")]
    TruncateTable {
        table: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Result type alias for sqlutil operations
pub type Result<T> = std::result::Result<T, SqlUtilError>;

impl SqlUtilError {
    pub(crate) fn relative_path(path: impl Into<PathBuf>) -> Self {
        Self::RelativePath { path: path.into() }
    }

    pub(crate) fn read_script(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadScript {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse_script(
        path: impl Into<PathBuf>,
        source: sqlparser::parser::ParserError,
    ) -> Self {
        Self::ParseScript {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn execute_statement(
        path: impl Into<PathBuf>,
        index: usize,
        source: sqlx::Error,
    ) -> Self {
        Self::ExecuteStatement {
            path: path.into(),
            index,
            source,
        }
    }
}

/// Error type for [`transact`](crate::transact), generic over the caller's
/// work error so the original failure survives intact.
#[derive(Error, Debug)]
pub enum TransactError<E> {
    /// Beginning the transaction failed; the work was never invoked
    #[error("failed to begin transaction")]
    Begin(#[source] sqlx::Error),

    /// The unit of work returned a failure; the transaction was rolled back
    #[error("transactional work failed")]
    Work(#[source] E),

    /// The work succeeded but the commit failed
    #[error("failed to commit transaction")]
    Commit(#[source] sqlx::Error),
}

impl<E> TransactError<E> {
    /// The caller's own error, if the failure came from the unit of work.
    pub fn work(&self) -> Option<&E> {
        match self {
            Self::Work(err) => Some(err),
            _ => None,
        }
    }

    /// Consume the error, returning the caller's own error if the failure
    /// came from the unit of work.
    pub fn into_work(self) -> Option<E> {
        match self {
            Self::Work(err) => Some(err),
            _ => None,
        }
    }
}
