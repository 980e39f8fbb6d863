//! SQLite storage bootstrap entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the movie catalog.
//! - Ensure the `barbie_movies` table exists before any repository call.
//!
//! # Invariants
//! - Schema bootstrap is idempotent and safe on every process start.
//! - Core code must not read/write catalog data before bootstrap succeeds.

use std::path::PathBuf;
use thiserror::Error;

mod open;
pub mod schema;

pub use open::{init_store, open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to prepare storage directory `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
