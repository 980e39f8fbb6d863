//! Typed domain model for the movie catalog.
//!
//! # Responsibility
//! - Define the canonical `Movie` record and its write/query payloads.
//! - Keep "not supplied" distinct from empty or zero values.
//!
//! # Invariants
//! - Every stored movie is identified by a storage-assigned `MovieId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod movie;
