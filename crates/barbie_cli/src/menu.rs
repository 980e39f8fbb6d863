//! Interactive menu loop.
//!
//! # Responsibility
//! - Collect fields for each action, then run it against a fresh connection.
//! - Report per-action failures and keep the loop alive.
//!
//! # Invariants
//! - A storage connection is opened per action and dropped before the next
//!   prompt.
//! - Only I/O errors on the terminal streams end the loop early.

use crate::prompt::{Prompter, CLEAR_MARKER};
use crate::render::render_movies;
use barbie_core::db::open_db;
use barbie_core::{
    AddedRange, MovieId, MoviePatch, MovieSearch, MovieService, NewMovie, RepoResult,
    SqliteMovieRepository,
};
use log::{debug, warn};
use std::io::{self, BufRead, Write};
use std::path::Path;

const MENU: &str = "\n=== Barbie Movie Collection ===
1) List movies
2) Add movie
3) Update movie
4) Delete movie
5) Search movies
6) Filter by date range
0) Exit";

/// Runs the prompt loop until `0` or end of input.
pub fn run_menu<R: BufRead, W: Write>(db_path: &Path, input: R, output: W) -> io::Result<()> {
    let mut prompter = Prompter::new(input, output);

    loop {
        prompter.say(MENU)?;
        let Some(choice) = prompter.line("Choose an option: ")? else {
            break;
        };

        let keep_going = match choice.as_str() {
            "1" => list(db_path, &mut prompter)?,
            "2" => add(db_path, &mut prompter)?,
            "3" => update(db_path, &mut prompter)?,
            "4" => delete(db_path, &mut prompter)?,
            "5" => search(db_path, &mut prompter)?,
            "6" => filter_by_date(db_path, &mut prompter)?,
            "0" => false,
            _ => {
                prompter.say("Invalid choice.")?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    prompter.say("Goodbye, Barbie fan!")
}

fn with_service<T>(
    db_path: &Path,
    action: impl FnOnce(&MovieService<SqliteMovieRepository<'_>>) -> RepoResult<T>,
) -> RepoResult<T> {
    let conn = open_db(db_path)?;
    let service = MovieService::new(SqliteMovieRepository::try_new(&conn)?);
    action(&service)
}

/// Prints the outcome of one action. Returns whether the loop continues.
fn report<R: BufRead, W: Write, T>(
    prompter: &mut Prompter<R, W>,
    action: &str,
    result: RepoResult<T>,
    describe: impl FnOnce(T) -> Vec<String>,
) -> io::Result<bool> {
    match result {
        Ok(value) => {
            debug!("event=menu_action module=cli status=ok action={action}");
            for line in describe(value) {
                prompter.say(line)?;
            }
        }
        Err(err) => {
            warn!("event=menu_action module=cli status=error action={action} error={err}");
            prompter.say(format!("Error: {err}"))?;
        }
    }
    Ok(true)
}

fn list<R: BufRead, W: Write>(db_path: &Path, prompter: &mut Prompter<R, W>) -> io::Result<bool> {
    let result = with_service(db_path, |service| service.list_movies());
    report(prompter, "list", result, |movies| render_movies(&movies))
}

fn add<R: BufRead, W: Write>(db_path: &Path, prompter: &mut Prompter<R, W>) -> io::Result<bool> {
    let movie = NewMovie {
        title: prompter.line("Title: ")?.unwrap_or_default(),
        year: prompter.int("Year: ")?,
        genre: prompter.text("Genre: ")?,
        theme: prompter.text("Theme (Princess, Fairytale, etc.): ")?,
        character: prompter.text("Main Character (Barbie, Ken, etc.): ")?,
        rating: prompter.real("Rating (0-10): ")?,
        watch_link: prompter.text("Watch link (YouTube, Netflix, etc.): ")?,
    };

    let result = with_service(db_path, |service| service.add_movie(&movie));
    report(prompter, "add", result, |id| {
        vec![format!("Added Barbie movie with ID {id}")]
    })
}

fn update<R: BufRead, W: Write>(
    db_path: &Path,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool> {
    let Some(id) = read_id(prompter, "Movie ID to update: ")? else {
        return Ok(true);
    };
    prompter.say("(blank = keep, '-' = clear; the title cannot be cleared)")?;
    let patch = MoviePatch {
        title: prompter.text("New title: ")?,
        year: prompter.int_change("New year: ")?,
        genre: prompter.text_change("New genre: ")?,
        theme: prompter.text_change("New theme: ")?,
        character: prompter.text_change("New character: ")?,
        rating: prompter.real_change("New rating: ")?,
        watch_link: prompter.text_change("New watch link: ")?,
    };
    if patch.title.as_deref() == Some(CLEAR_MARKER) {
        prompter.say("Error: the title cannot be cleared")?;
        return Ok(true);
    }

    let result = with_service(db_path, |service| service.update_movie(id, &patch));
    report(prompter, "update", result, |count| {
        vec![format!("Updated {count} row(s)")]
    })
}

fn delete<R: BufRead, W: Write>(
    db_path: &Path,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool> {
    let Some(id) = read_id(prompter, "Movie ID to delete: ")? else {
        return Ok(true);
    };

    let result = with_service(db_path, |service| service.delete_movie(id));
    report(prompter, "delete", result, |count| {
        vec![format!("Deleted {count} row(s)")]
    })
}

fn search<R: BufRead, W: Write>(
    db_path: &Path,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool> {
    let criteria = MovieSearch {
        title_contains: prompter.text("Search title contains: ")?,
        min_year: prompter.int("Min year: ")?,
        max_year: prompter.int("Max year: ")?,
        genre: prompter.text("Genre: ")?,
        theme: prompter.text("Theme: ")?,
        character: prompter.text("Character: ")?,
    };

    let result = with_service(db_path, |service| service.search_movies(&criteria));
    report(prompter, "search", result, |movies| render_movies(&movies))
}

fn filter_by_date<R: BufRead, W: Write>(
    db_path: &Path,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool> {
    let start = prompter.line("Start date (YYYY-MM-DD): ")?.unwrap_or_default();
    let end = prompter.line("End date (YYYY-MM-DD): ")?.unwrap_or_default();

    let range = match AddedRange::parse_days(&start, &end) {
        Ok(range) => range,
        Err(err) => {
            prompter.say(format!("Error: {err}"))?;
            return Ok(true);
        }
    };

    let result = with_service(db_path, |service| service.movies_added_between(&range));
    report(prompter, "range", result, |movies| render_movies(&movies))
}

fn read_id<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
) -> io::Result<Option<MovieId>> {
    let id = prompter.int(prompt)?;
    if id.is_none() {
        prompter.say("Invalid movie ID.")?;
    }
    Ok(id)
}
