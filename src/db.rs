//! Database access wrapper.
//!
//! A thin pass-through over a MySQL pool. Each call checks one connection
//! out of the pool, performs exactly one operation, and returns it: the
//! one-operation-per-acquisition contract, with the pool replacing a
//! connect/close pair per call.
//!
//! Failure policy: a failed statement is logged server-side, recorded once
//! on the request's [`ErrorList`], and surfaced as an empty result. Only
//! the startup health check in [`Db::connect`] is allowed to be fatal.

use std::collections::BTreeMap;

use sqlx::Column;
use sqlx::Row as _;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};

use crate::config::DbConfig;
use crate::error::{Error, ErrorList};

/// One fetched row, keyed by column name. Query-scoped; nothing caches or
/// re-identifies rows across calls.
pub type Row = BTreeMap<String, String>;

/// The database handle. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Db {
    pool: MySqlPool,
}

impl Db {
    /// Builds the pool and runs the startup health check.
    ///
    /// A failure here means the database is unreachable and the
    /// application cannot meaningfully start; surface the error to the
    /// operator instead of limping along.
    pub async fn connect(config: &DbConfig) -> Result<Self, Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(5)
            .connect(&config.url())
            .await
            .map_err(Error::DbConnection)?;

        let db = Self { pool };
        db.ping().await?;
        Ok(db)
    }

    /// One round-trip to verify the pool can still hand out working
    /// connections.
    pub async fn ping(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(Error::DbConnection)
    }

    /// Runs one INSERT/UPDATE/DELETE statement; returns the affected-row
    /// count, or 0 after recording the failure.
    pub async fn execute(&self, sql: &str, errors: &ErrorList) -> u64 {
        match sqlx::query(sql).execute(&self.pool).await {
            Ok(result) => result.rows_affected(),
            Err(e) => {
                tracing::error!(sql, error = %Error::DbQuery(e), "statement failed");
                errors.record(format!("query error: {sql}"));
                0
            }
        }
    }

    /// Runs one SELECT; returns the fetched rows, or the empty vec after
    /// recording the failure. Never propagates an error to the caller.
    pub async fn query(&self, sql: &str, errors: &ErrorList) -> Vec<Row> {
        match sqlx::query(sql).fetch_all(&self.pool).await {
            Ok(rows) => rows.iter().map(row_map).collect(),
            Err(e) => {
                tracing::error!(sql, error = %Error::DbQuery(e), "query failed");
                errors.record(format!("query error: {sql}"));
                Vec::new()
            }
        }
    }

    /// Runs one SELECT and returns only the number of matching rows.
    pub async fn count(&self, sql: &str, errors: &ErrorList) -> u64 {
        match sqlx::query(sql).fetch_all(&self.pool).await {
            Ok(rows) => rows.len() as u64,
            Err(e) => {
                tracing::error!(sql, error = %Error::DbQuery(e), "query failed");
                errors.record(format!("query error: {sql}"));
                0
            }
        }
    }
}

fn row_map(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, column)| (column.name().to_owned(), sanitize(&column_text(row, i))))
        .collect()
}

/// Decodes one column to text, trying the common MySQL shapes in turn.
/// Undecodable values contribute the empty string rather than an error.
fn column_text(row: &MySqlRow, i: usize) -> String {
    if let Ok(value) = row.try_get::<Option<String>, _>(i) {
        return value.unwrap_or_default();
    }
    if let Ok(Some(value)) = row.try_get::<Option<i64>, _>(i) {
        return value.to_string();
    }
    if let Ok(Some(value)) = row.try_get::<Option<f64>, _>(i) {
        return value.to_string();
    }
    if let Ok(Some(value)) = row.try_get::<Option<Vec<u8>>, _>(i) {
        return String::from_utf8_lossy(&value).into_owned();
    }
    String::new()
}

/// Entity-escapes a fetched value, then restores the markup the site is
/// allowed to store: `<br />` line breaks and bare ampersands. Anything
/// else that was injected into the database stays inert text.
fn sanitize(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace("&lt;br /&gt;", "<br />")
        .replace("&amp;", "&")
}
