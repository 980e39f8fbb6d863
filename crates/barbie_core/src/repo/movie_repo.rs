//! Movie repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/add/update/delete/search/range APIs over `barbie_movies`.
//! - Translate optional criteria into purely conjunctive SQL predicates.
//!
//! # Invariants
//! - Write paths validate payloads before SQL mutations.
//! - Every operation is one statement and commits or fails as a unit.
//! - Read paths reject undecodable persisted rows instead of masking them.
//! - Title rules apply to writes only; stored blank titles are still returned.

use crate::db::schema::{table_exists, table_has_column, MOVIES_TABLE, MOVIE_COLUMNS};
use crate::db::DbError;
use crate::model::movie::{
    AddedRange, Movie, MovieId, MoviePatch, MovieSearch, MovieValidationError, NewMovie,
};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::time::Instant;
use thiserror::Error;

const MOVIE_SELECT_SQL: &str = "SELECT
    id,
    title,
    year,
    genre,
    theme,
    character,
    rating,
    watch_link,
    added_at
FROM barbie_movies";

/// Text layout of `added_at` as produced by SQLite `datetime('now')`.
pub const STORAGE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for movie persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] MovieValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("invalid persisted movie data: {0}")]
    InvalidData(String),
    #[error("required table `{0}` is missing; initialize the store first")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for catalog operations.
pub trait MovieRepository {
    /// All movies ordered by id ascending.
    fn list_all(&self) -> RepoResult<Vec<Movie>>;
    fn get(&self, id: MovieId) -> RepoResult<Option<Movie>>;
    /// Inserts a movie and returns its storage-assigned id.
    fn add(&self, movie: &NewMovie) -> RepoResult<MovieId>;
    /// Overwrites supplied fields only. Returns the changed row count.
    fn update(&self, id: MovieId, patch: &MoviePatch) -> RepoResult<usize>;
    /// Returns the removed row count.
    fn delete(&self, id: MovieId) -> RepoResult<usize>;
    /// Matches all supplied criteria, best rated and newest first.
    fn search(&self, criteria: &MovieSearch) -> RepoResult<Vec<Movie>>;
    /// Movies added inside the inclusive range, oldest first.
    fn filter_by_added_range(&self, range: &AddedRange) -> RepoResult<Vec<Movie>>;
}

/// SQLite-backed movie repository.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    /// Constructs a repository over a bootstrapped connection.
    ///
    /// Rejects connections where `barbie_movies` or any of its columns is
    /// missing.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_movie_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Movie>> {
        let movies =
            self.query_movies(&format!("{MOVIE_SELECT_SQL} ORDER BY id ASC;"), Vec::new())?;
        debug!(
            "event=movie_list module=repo status=ok count={}",
            movies.len()
        );
        Ok(movies)
    }

    fn get(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_movie_row(row)?));
        }
        Ok(None)
    }

    fn add(&self, movie: &NewMovie) -> RepoResult<MovieId> {
        movie.validate()?;
        let started_at = Instant::now();

        self.conn.execute(
            "INSERT INTO barbie_movies (
                title,
                year,
                genre,
                theme,
                character,
                rating,
                watch_link
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                movie.title.as_str(),
                movie.year,
                movie.genre.as_deref(),
                movie.theme.as_deref(),
                movie.character.as_deref(),
                movie.rating,
                movie.watch_link.as_deref(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        info!(
            "event=movie_add module=repo status=ok id={id} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(id)
    }

    fn update(&self, id: MovieId, patch: &MoviePatch) -> RepoResult<usize> {
        patch.validate()?;
        if patch.is_empty() {
            debug!("event=movie_update module=repo status=skipped id={id} reason=empty_patch");
            return Ok(0);
        }
        let started_at = Instant::now();

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(year) = patch.year {
            assignments.push("year = ?");
            bind_values.push(year.map_or(Value::Null, Value::Integer));
        }
        if let Some(genre) = patch.genre.as_ref() {
            assignments.push("genre = ?");
            bind_values.push(nullable_text(genre));
        }
        if let Some(theme) = patch.theme.as_ref() {
            assignments.push("theme = ?");
            bind_values.push(nullable_text(theme));
        }
        if let Some(character) = patch.character.as_ref() {
            assignments.push("character = ?");
            bind_values.push(nullable_text(character));
        }
        if let Some(rating) = patch.rating {
            assignments.push("rating = ?");
            bind_values.push(rating.map_or(Value::Null, Value::Real));
        }
        if let Some(watch_link) = patch.watch_link.as_ref() {
            assignments.push("watch_link = ?");
            bind_values.push(nullable_text(watch_link));
        }

        let sql = format!(
            "UPDATE barbie_movies SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        info!(
            "event=movie_update module=repo status=ok id={id} fields={} changed={changed} duration_ms={}",
            assignments.len(),
            started_at.elapsed().as_millis()
        );
        Ok(changed)
    }

    fn delete(&self, id: MovieId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM barbie_movies WHERE id = ?1;", [id])?;
        info!("event=movie_delete module=repo status=ok id={id} removed={removed}");
        Ok(removed)
    }

    fn search(&self, criteria: &MovieSearch) -> RepoResult<Vec<Movie>> {
        let started_at = Instant::now();
        let mut sql = format!("{MOVIE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        // instr() keeps the match case-sensitive, unlike LIKE.
        if let Some(fragment) = criteria.title_contains.as_ref() {
            sql.push_str(" AND instr(title, ?) > 0");
            bind_values.push(Value::Text(fragment.clone()));
        }
        if let Some(min_year) = criteria.min_year {
            sql.push_str(" AND year >= ?");
            bind_values.push(Value::Integer(min_year));
        }
        if let Some(max_year) = criteria.max_year {
            sql.push_str(" AND year <= ?");
            bind_values.push(Value::Integer(max_year));
        }
        for (column, value) in [
            ("genre", criteria.genre.as_ref()),
            ("theme", criteria.theme.as_ref()),
            ("character", criteria.character.as_ref()),
        ] {
            if let Some(value) = value {
                sql.push_str(&format!(" AND {column} = ?"));
                bind_values.push(Value::Text(value.clone()));
            }
        }

        sql.push_str(" ORDER BY rating DESC NULLS LAST, year DESC NULLS LAST, id ASC;");

        let criteria_count = bind_values.len();
        let movies = self.query_movies(&sql, bind_values)?;
        debug!(
            "event=movie_search module=repo status=ok unfiltered={} criteria={criteria_count} count={} duration_ms={}",
            criteria.is_unfiltered(),
            movies.len(),
            started_at.elapsed().as_millis()
        );
        Ok(movies)
    }

    fn filter_by_added_range(&self, range: &AddedRange) -> RepoResult<Vec<Movie>> {
        let movies = self.query_movies(
            &format!(
                "{MOVIE_SELECT_SQL}
                 WHERE added_at BETWEEN ? AND ?
                 ORDER BY added_at ASC, id ASC;"
            ),
            vec![
                Value::Text(format_storage_timestamp(&range.start)),
                Value::Text(format_storage_timestamp(&range.end)),
            ],
        )?;
        debug!(
            "event=movie_range module=repo status=ok count={}",
            movies.len()
        );
        Ok(movies)
    }
}

impl SqliteMovieRepository<'_> {
    fn query_movies(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<Movie>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut movies = Vec::new();
        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }
        Ok(movies)
    }
}

/// Formats a timestamp the way `added_at` is stored.
pub fn format_storage_timestamp(value: &NaiveDateTime) -> String {
    value.format(STORAGE_TIMESTAMP_FORMAT).to_string()
}

/// Parses a stored `added_at` value. Fractional seconds are tolerated.
pub fn parse_storage_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").ok()
}

fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    let id: MovieId = row.get("id")?;
    let added_at_text: String = row.get("added_at")?;
    let added_at = parse_storage_timestamp(&added_at_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{added_at_text}` in barbie_movies.added_at for id {id}"
        ))
    })?;

    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        // Stores written by older tools may hold blank titles.
        warn!("event=movie_decode module=repo status=blank_title movie_id={id}");
    }

    Ok(Movie {
        id,
        title,
        year: row.get("year")?,
        genre: row.get("genre")?,
        theme: row.get("theme")?,
        character: row.get("character")?,
        rating: row.get("rating")?,
        watch_link: row.get("watch_link")?,
        added_at,
    })
}

fn nullable_text(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

fn ensure_movie_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, MOVIES_TABLE)? {
        return Err(RepoError::MissingRequiredTable(MOVIES_TABLE));
    }
    for column in MOVIE_COLUMNS {
        if !table_has_column(conn, MOVIES_TABLE, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: MOVIES_TABLE,
                column,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_storage_timestamp, parse_storage_timestamp};

    #[test]
    fn storage_timestamp_roundtrips_sqlite_layout() {
        let parsed = parse_storage_timestamp("2025-12-24 08:15:00").unwrap();
        assert_eq!(format_storage_timestamp(&parsed), "2025-12-24 08:15:00");
        assert!(parse_storage_timestamp("2025-12-24 08:15:00.250").is_some());
        assert!(parse_storage_timestamp("yesterday").is_none());
    }
}
