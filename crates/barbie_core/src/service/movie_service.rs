//! Movie use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::movie::{AddedRange, Movie, MovieId, MoviePatch, MovieSearch, NewMovie};
use crate::repo::movie_repo::{MovieRepository, RepoResult};

/// Use-case service wrapper for catalog operations.
pub struct MovieService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> MovieService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_movies(&self) -> RepoResult<Vec<Movie>> {
        self.repo.list_all()
    }

    pub fn get_movie(&self, id: MovieId) -> RepoResult<Option<Movie>> {
        self.repo.get(id)
    }

    /// Adds a movie and returns its new id.
    pub fn add_movie(&self, movie: &NewMovie) -> RepoResult<MovieId> {
        self.repo.add(movie)
    }

    /// Applies a partial update.
    ///
    /// Returns `0` for an unknown id or an empty patch.
    pub fn update_movie(&self, id: MovieId, patch: &MoviePatch) -> RepoResult<usize> {
        self.repo.update(id, patch)
    }

    /// Returns `0` when the id does not exist.
    pub fn delete_movie(&self, id: MovieId) -> RepoResult<usize> {
        self.repo.delete(id)
    }

    pub fn search_movies(&self, criteria: &MovieSearch) -> RepoResult<Vec<Movie>> {
        self.repo.search(criteria)
    }

    pub fn movies_added_between(&self, range: &AddedRange) -> RepoResult<Vec<Movie>> {
        self.repo.filter_by_added_range(range)
    }
}
