//! Movie domain model.
//!
//! # Responsibility
//! - Define the persisted `Movie` record and its insert/update/search
//!   payloads.
//! - Provide validation helpers shared by every write path.
//!
//! # Invariants
//! - Write payloads never carry an empty or whitespace-only `title`.
//! - Write payloads never carry a NaN or infinite `rating`.
//! - `id` and `added_at` are assigned by storage and never written by callers.
//! - In every payload `None` means "not supplied"; empty strings and zero
//!   numbers are real values.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage-assigned row identifier.
pub type MovieId = i64;

/// One catalog entry as persisted in `barbie_movies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub theme: Option<String>,
    /// Main character, e.g. `Barbie` or `Ken`.
    pub character: Option<String>,
    /// Expected on a 0-10 scale; the range is not enforced.
    pub rating: Option<f64>,
    /// Free-form link, usually a URL. Not validated.
    pub watch_link: Option<String>,
    /// Storage clock (UTC) at insertion time.
    pub added_at: NaiveDateTime,
}

/// Validation failures for movie write payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MovieValidationError {
    #[error("movie title must not be empty")]
    EmptyTitle,
    #[error("movie rating must be a finite number")]
    NonFiniteRating,
}

/// Insert payload for a new movie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: Option<i64>,
    pub genre: Option<String>,
    pub theme: Option<String>,
    pub character: Option<String>,
    pub rating: Option<f64>,
    pub watch_link: Option<String>,
}

impl NewMovie {
    /// Creates a payload with only the required title set.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MovieValidationError> {
        validate_title(&self.title)?;
        validate_rating(self.rating)
    }
}

/// Partial update payload.
///
/// Nullable columns use a nested option:
/// - `None` keeps the stored value.
/// - `Some(None)` clears the column to NULL.
/// - `Some(Some(v))` stores `v`, including `""` and `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<Option<i64>>,
    pub genre: Option<Option<String>>,
    pub theme: Option<Option<String>>,
    pub character: Option<Option<String>>,
    pub rating: Option<Option<f64>>,
    pub watch_link: Option<Option<String>>,
}

impl MoviePatch {
    /// Returns true when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.theme.is_none()
            && self.character.is_none()
            && self.rating.is_none()
            && self.watch_link.is_none()
    }

    pub fn validate(&self) -> Result<(), MovieValidationError> {
        if let Some(title) = self.title.as_deref() {
            validate_title(title)?;
        }
        validate_rating(self.rating.flatten())
    }
}

/// Conjunctive search criteria. Unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieSearch {
    /// Case-sensitive substring of `title`.
    pub title_contains: Option<String>,
    /// Inclusive lower bound on `year`.
    pub min_year: Option<i64>,
    /// Inclusive upper bound on `year`.
    pub max_year: Option<i64>,
    pub genre: Option<String>,
    pub theme: Option<String>,
    pub character: Option<String>,
}

impl MovieSearch {
    /// Returns true when no criterion is supplied.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }
}

/// Errors raised while building an [`AddedRange`] from calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("invalid date `{value}`; expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("range start {start} is after range end {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },
    #[error("date {0} cannot be expressed as a full-day range")]
    OutOfRange(NaiveDate),
}

/// Inclusive `added_at` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl AddedRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Covers `start_day 00:00:00` through `end_day 23:59:59`.
    pub fn from_days(start_day: NaiveDate, end_day: NaiveDate) -> Result<Self, RangeParseError> {
        if start_day > end_day {
            return Err(RangeParseError::Reversed {
                start: start_day,
                end: end_day,
            });
        }
        let start = start_day
            .and_hms_opt(0, 0, 0)
            .ok_or(RangeParseError::OutOfRange(start_day))?;
        let end = end_day
            .and_hms_opt(23, 59, 59)
            .ok_or(RangeParseError::OutOfRange(end_day))?;
        Ok(Self { start, end })
    }

    /// Parses two `YYYY-MM-DD` strings into a full-day range.
    pub fn parse_days(start_day: &str, end_day: &str) -> Result<Self, RangeParseError> {
        Self::from_days(parse_day(start_day)?, parse_day(end_day)?)
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, RangeParseError> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| RangeParseError::InvalidDate {
        value: trimmed.to_string(),
    })
}

fn validate_title(title: &str) -> Result<(), MovieValidationError> {
    if title.trim().is_empty() {
        return Err(MovieValidationError::EmptyTitle);
    }
    Ok(())
}

fn validate_rating(rating: Option<f64>) -> Result<(), MovieValidationError> {
    match rating {
        Some(value) if !value.is_finite() => Err(MovieValidationError::NonFiniteRating),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AddedRange, MoviePatch, MovieSearch, MovieValidationError, NewMovie, RangeParseError,
    };
    use chrono::NaiveDate;

    #[test]
    fn validate_rejects_non_finite_ratings() {
        let nan = NewMovie {
            rating: Some(f64::NAN),
            ..NewMovie::new("Barbie as Rapunzel")
        };
        assert_eq!(nan.validate(), Err(MovieValidationError::NonFiniteRating));

        let infinite = MoviePatch {
            rating: Some(Some(f64::NEG_INFINITY)),
            ..MoviePatch::default()
        };
        assert_eq!(
            infinite.validate(),
            Err(MovieValidationError::NonFiniteRating)
        );

        let cleared = MoviePatch {
            rating: Some(None),
            ..MoviePatch::default()
        };
        assert_eq!(cleared.validate(), Ok(()));
    }

    #[test]
    fn patch_with_explicit_clear_is_not_empty() {
        let patch = MoviePatch {
            genre: Some(None),
            ..MoviePatch::default()
        };
        assert!(!patch.is_empty());
        assert!(MoviePatch::default().is_empty());
    }

    #[test]
    fn zero_year_is_a_real_search_criterion() {
        let search = MovieSearch {
            min_year: Some(0),
            ..MovieSearch::default()
        };
        assert!(!search.is_unfiltered());
        assert!(MovieSearch::default().is_unfiltered());
    }

    #[test]
    fn whitespace_title_fails_validation() {
        assert!(NewMovie::new("   ").validate().is_err());
        assert!(NewMovie::new("Barbie").validate().is_ok());
    }

    #[test]
    fn parse_days_covers_full_days() {
        let range = AddedRange::parse_days("2024-03-01", " 2024-03-02 ").unwrap();
        let start_day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end_day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(range.start, start_day.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(range.end, end_day.and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn parse_days_rejects_bad_input() {
        let err = AddedRange::parse_days("2024/03/01", "2024-03-02").unwrap_err();
        assert!(matches!(err, RangeParseError::InvalidDate { value } if value == "2024/03/01"));

        let err = AddedRange::parse_days("2024-03-02", "2024-03-01").unwrap_err();
        assert!(matches!(err, RangeParseError::Reversed { .. }));
    }
}
