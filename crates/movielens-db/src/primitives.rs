//! # Data-Access Primitives
//!
//! Three operations every query in the crate goes through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Primitive Contracts                                │
//! │                                                                         │
//! │  fetch_one(conn, sql, params)   → Ok(Some(row)) | Ok(None) | Err       │
//! │  fetch_many(conn, sql, params)  → Ok(rows, maybe empty)    | Err       │
//! │  execute(conn, sql, params)     → Ok(rows affected, 0 ok)  | Err       │
//! │                                                                         │
//! │  • params bind positionally to `?` placeholders, never interpolated    │
//! │  • `&[]` is always a valid parameter list                              │
//! │  • every Err is logged here, once, with the operation name             │
//! │  • statement resources are dropped before returning, on every path     │
//! │  • execute commits its own transaction; on error the guard is dropped  │
//! │    uncommitted and SQLite rolls back                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnection};
use sqlx::Connection;
use tracing::{debug, error};

use crate::error::{DbError, DbResult};
use crate::value::{decode_row, SqlRow, SqlValue};

/// Binds positional parameters in order.
fn bind_params<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    params: &[SqlValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(None::<i64>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::Blob(v) => query.bind(v.clone()),
        };
    }
    query
}

/// Logs a failure at the primitive boundary and converts it.
fn log_failure(operation: &'static str, sql: &str, err: impl Into<DbError>) -> DbError {
    let err = err.into();
    error!(operation, sql = %sql.trim(), error = %err, "{} failed", operation);
    err
}

/// Logs a repository's failure to map rows into records.
///
/// The primitives already logged engine errors; this covers rows that came
/// back fine but do not have the shape the repository expects.
pub(crate) fn log_mapping_failure(operation: &'static str, err: DbError) -> DbError {
    error!(operation, error = %err, "{} could not map rows", operation);
    err
}

/// Returns the first row of a query, or `None` if it matched nothing.
///
/// ## Arguments
/// * `conn` - The session's single connection
/// * `sql` - Query text with `?` placeholders
/// * `params` - Values for the placeholders, in order
///
/// ## Returns
/// * `Ok(Some(row))` - First row
/// * `Ok(None)` - Zero rows matched
/// * `Err(DbError)` - Engine/driver failure (already logged)
pub async fn fetch_one(
    conn: &mut SqliteConnection,
    sql: &str,
    params: &[SqlValue],
) -> DbResult<Option<SqlRow>> {
    let query = bind_params(sqlx::query(sql), params);

    let row = query
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| log_failure("fetch_one", sql, e))?;

    row.as_ref()
        .map(decode_row)
        .transpose()
        .map_err(|e| log_failure("fetch_one", sql, e))
}

/// Returns every row of a query, in the order the engine produced them.
///
/// ## Returns
/// * `Ok(rows)` - Possibly empty
/// * `Err(DbError)` - Engine/driver failure (already logged)
pub async fn fetch_many(
    conn: &mut SqliteConnection,
    sql: &str,
    params: &[SqlValue],
) -> DbResult<Vec<SqlRow>> {
    let query = bind_params(sqlx::query(sql), params);

    let rows = query
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| log_failure("fetch_many", sql, e))?;

    rows.iter()
        .map(decode_row)
        .collect::<DbResult<Vec<_>>>()
        .map_err(|e| log_failure("fetch_many", sql, e))
}

/// Runs one insert/update/delete and commits it.
///
/// ## Returns
/// * `Ok(n)` - Rows affected; `0` means the statement matched nothing
/// * `Err(DbError)` - Engine/driver failure (already logged, not committed)
pub async fn execute(conn: &mut SqliteConnection, sql: &str, params: &[SqlValue]) -> DbResult<u64> {
    let mut tx = conn
        .begin()
        .await
        .map_err(|e| log_failure("execute", sql, DbError::TransactionFailed(e.to_string())))?;

    let query = bind_params(sqlx::query(sql), params);

    // On error `tx` is dropped here without commit, which rolls back.
    let result = query
        .execute(&mut *tx)
        .await
        .map_err(|e| log_failure("execute", sql, e))?;

    tx.commit()
        .await
        .map_err(|e| log_failure("execute", sql, DbError::TransactionFailed(e.to_string())))?;

    let affected = result.rows_affected();
    debug!(rows_affected = affected, "Statement committed");
    Ok(affected)
}

// =============================================================================
// Unit Tests
// =============================================================================
