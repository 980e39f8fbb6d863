//! Catalog table definition and readiness checks.
//!
//! # Invariants
//! - `ensure_schema` only ever creates missing objects; it never alters or
//!   drops existing data.
//! - `MOVIE_COLUMNS` lists the exact persisted column set in select order.

use super::DbResult;
use rusqlite::Connection;

/// Catalog table name.
pub const MOVIES_TABLE: &str = "barbie_movies";

/// Persisted columns of [`MOVIES_TABLE`] in canonical order.
pub const MOVIE_COLUMNS: [&str; 9] = [
    "id",
    "title",
    "year",
    "genre",
    "theme",
    "character",
    "rating",
    "watch_link",
    "added_at",
];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the catalog table and its index when missing.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.commit()?;
    Ok(())
}

/// Returns whether a table with the given name exists.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `table` declares `column`.
pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
