//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must validate payloads before persistence.
//! - Missing rows are reported as zero counts or `None`, never as errors.

pub mod movie_repo;
