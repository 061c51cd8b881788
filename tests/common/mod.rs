//! Shared test fixtures: a tempfile-backed SQLite pool plus the committed
//! schema/fixture scripts under `tests/testdata/`.

use std::path::PathBuf;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Open a fresh SQLite database in its own temp directory. The `TempDir`
/// must stay alive as long as the pool.
pub async fn setup_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.sqlite"))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("failed to open sqlite database");

    (pool, dir)
}

/// Absolute path to a committed file under `tests/testdata/`.
pub fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name)
}

/// Fresh database with the task schema applied and fixture rows loaded.
pub async fn setup_task_db() -> (SqlitePool, TempDir) {
    let (pool, dir) = setup_db().await;

    sqlutil::exec_file(&pool, testdata("schema.sql"))
        .await
        .expect("failed to exec schema script");
    sqlutil::exec_file(&pool, testdata("fixture.sql"))
        .await
        .expect("failed to exec fixture script");

    (pool, dir)
}
