//! Human-readable movie rows.

use barbie_core::repo::movie_repo::format_storage_timestamp;
use barbie_core::Movie;

const EMPTY_RESULT: &str = "(no results)";
const MISSING_YEAR: &str = "N/A";
const MISSING_FIELD: &str = "-";

/// Renders one line per movie, or a single `(no results)` line.
pub fn render_movies(movies: &[Movie]) -> Vec<String> {
    if movies.is_empty() {
        return vec![EMPTY_RESULT.to_string()];
    }
    movies.iter().map(render_movie).collect()
}

pub fn render_movie(movie: &Movie) -> String {
    format!(
        "[{}] {} ({}) | Genre={} | Theme={} | Character={} | Rating={} | Link={} | Added={}",
        movie.id,
        movie.title,
        movie
            .year
            .map_or_else(|| MISSING_YEAR.to_string(), |year| year.to_string()),
        or_missing(movie.genre.as_deref()),
        or_missing(movie.theme.as_deref()),
        or_missing(movie.character.as_deref()),
        movie
            .rating
            .map_or_else(|| MISSING_FIELD.to_string(), |rating| format!("{rating:?}")),
        or_missing(movie.watch_link.as_deref()),
        format_storage_timestamp(&movie.added_at),
    )
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING_FIELD)
}
