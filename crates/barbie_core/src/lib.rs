//! Core catalog logic for the Barbie movie collection.
//! This crate owns storage bootstrap, the typed record model and every
//! query the CLI issues.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CatalogConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::movie::{
    AddedRange, Movie, MovieId, MoviePatch, MovieSearch, MovieValidationError, NewMovie,
    RangeParseError,
};
pub use repo::movie_repo::{MovieRepository, RepoError, RepoResult, SqliteMovieRepository};
pub use service::movie_service::MovieService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
