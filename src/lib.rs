//! Small helpers around `sqlx`: transaction discipline, SQL script
//! execution, and schema-wide truncation for test cleanup.
//!
//! - [`transact`] begins a transaction on anything implementing
//!   [`sqlx::Acquire`], runs a caller-supplied unit of work against it,
//!   and commits or rolls back based on the outcome.
//! - [`exec_file`] executes a SQL script file statement by statement via
//!   a real SQL parser; [`exec_file_raw`] submits the file in one call.
//! - [`truncate_all`] empties every table in the schema.
//!
//! Drivers are selected through cargo features (`sqlite` is the default;
//! `postgres` and `mysql` are available).

pub mod error;
pub mod schema;
pub mod script;
pub mod transaction;

pub use error::{Result, SqlUtilError, TransactError};
pub use schema::{truncate_all, SchemaDialect};
pub use script::{exec_file, exec_file_raw, split_statements};
pub use transaction::transact;
