use barbie_core::db::open_db_in_memory;
use barbie_core::{
    AddedRange, MovieId, MovieRepository, MovieSearch, NewMovie, SqliteMovieRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;

fn movie(title: &str, year: Option<i64>, rating: Option<f64>) -> NewMovie {
    NewMovie {
        year,
        rating,
        ..NewMovie::new(title)
    }
}

fn ids(movies: Vec<barbie_core::Movie>) -> Vec<MovieId> {
    movies.into_iter().map(|movie| movie.id).collect()
}

fn set_added_at(conn: &Connection, id: MovieId, added_at: &str) {
    conn.execute(
        "UPDATE barbie_movies SET added_at = ?1 WHERE id = ?2;",
        rusqlite::params![added_at, id],
    )
    .unwrap();
}

#[test]
fn year_bounds_filter_and_order_by_rating_then_year() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let nutcracker = repo
        .add(&movie("Barbie in the Nutcracker", Some(2001), Some(7.5)))
        .unwrap();
    let older = repo
        .add(&movie("Barbie and the Rockers", Some(1995), Some(8.0)))
        .unwrap();

    let recent = MovieSearch {
        min_year: Some(2000),
        ..MovieSearch::default()
    };
    assert_eq!(ids(repo.search(&recent).unwrap()), vec![nutcracker]);

    let both = MovieSearch {
        min_year: Some(1990),
        ..MovieSearch::default()
    };
    assert_eq!(ids(repo.search(&both).unwrap()), vec![older, nutcracker]);

    let capped = MovieSearch {
        max_year: Some(2000),
        ..MovieSearch::default()
    };
    assert_eq!(ids(repo.search(&capped).unwrap()), vec![older]);
}

#[test]
fn unfiltered_search_returns_everything_with_nulls_last() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let unrated = repo.add(&movie("Barbie: Big City", Some(2021), None)).unwrap();
    let low_old = repo.add(&movie("Barbie as Rapunzel", Some(2002), Some(6.0))).unwrap();
    let high = repo.add(&movie("Barbie of Swan Lake", Some(2003), Some(9.0))).unwrap();
    let low_new = repo.add(&movie("Barbie: Princess Charm", Some(2011), Some(6.0))).unwrap();
    let low_no_year = repo.add(&movie("Barbie: Dolphin Magic", None, Some(6.0))).unwrap();

    let result = ids(repo.search(&MovieSearch::default()).unwrap());
    assert_eq!(result, vec![high, low_new, low_old, low_no_year, unrated]);
}

#[test]
fn equal_sort_keys_keep_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let first = repo.add(&movie("Barbie Fairytopia", Some(2005), Some(7.0))).unwrap();
    let second = repo.add(&movie("Barbie Mermaidia", Some(2005), Some(7.0))).unwrap();

    assert_eq!(
        ids(repo.search(&MovieSearch::default()).unwrap()),
        vec![first, second]
    );
}

#[test]
fn title_contains_is_case_sensitive_substring() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let dreamhouse = repo
        .add(&movie("Barbie Dreamhouse Adventures", Some(2018), Some(6.5)))
        .unwrap();
    let dreamtopia = repo
        .add(&movie("Barbie Dreamtopia", Some(2016), Some(7.0)))
        .unwrap();
    repo.add(&movie("Barbie and the Diamond Castle", Some(2008), Some(8.0)))
        .unwrap();

    let dream = MovieSearch {
        title_contains: Some("Dream".to_string()),
        ..MovieSearch::default()
    };
    assert_eq!(ids(repo.search(&dream).unwrap()), vec![dreamtopia, dreamhouse]);

    let lower = MovieSearch {
        title_contains: Some("dream".to_string()),
        ..MovieSearch::default()
    };
    assert!(repo.search(&lower).unwrap().is_empty());
}

#[test]
fn criteria_are_combined_conjunctively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let target = repo
        .add(&NewMovie {
            genre: Some("Fantasy".to_string()),
            theme: Some("Princess".to_string()),
            character: Some("Barbie".to_string()),
            ..movie("Barbie as the Princess and the Pauper", Some(2004), Some(8.5))
        })
        .unwrap();
    repo.add(&NewMovie {
        genre: Some("Fantasy".to_string()),
        theme: Some("Princess".to_string()),
        character: Some("Ken".to_string()),
        ..movie("Barbie and the Three Musketeers", Some(2009), Some(7.0))
    })
    .unwrap();
    repo.add(&NewMovie {
        genre: Some("Musical".to_string()),
        theme: Some("Princess".to_string()),
        character: Some("Barbie".to_string()),
        ..movie("Barbie Princess Adventure", Some(2020), Some(6.0))
    })
    .unwrap();

    let criteria = MovieSearch {
        title_contains: Some("Princess".to_string()),
        genre: Some("Fantasy".to_string()),
        theme: Some("Princess".to_string()),
        character: Some("Barbie".to_string()),
        ..MovieSearch::default()
    };
    assert_eq!(ids(repo.search(&criteria).unwrap()), vec![target]);
}

#[test]
fn zero_year_bound_is_applied() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    repo.add(&movie("Barbie: A Fashion Fairytale", Some(2010), Some(5.0)))
        .unwrap();

    let criteria = MovieSearch {
        max_year: Some(0),
        ..MovieSearch::default()
    };
    assert!(repo.search(&criteria).unwrap().is_empty());
}

#[test]
fn added_range_is_inclusive_and_ordered_by_added_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let a = repo.add(&NewMovie::new("Barbie in the Pink Shoes")).unwrap();
    let b = repo.add(&NewMovie::new("Barbie in Rock 'n Royals")).unwrap();
    let c = repo.add(&NewMovie::new("Barbie: Spy Squad")).unwrap();
    let d = repo.add(&NewMovie::new("Barbie: Star Light Adventure")).unwrap();

    set_added_at(&conn, a, "2024-05-02 23:59:59");
    set_added_at(&conn, b, "2024-05-01 00:00:00");
    set_added_at(&conn, c, "2024-04-30 23:59:59");
    set_added_at(&conn, d, "2024-05-03 00:00:00");

    let range = AddedRange::from_days(
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
    )
    .unwrap();
    assert_eq!(ids(repo.filter_by_added_range(&range).unwrap()), vec![b, a]);
}

#[test]
fn fresh_rows_fall_inside_todays_range() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let id = repo.add(&NewMovie::new("Barbie & Chelsea")).unwrap();
    let added_at = repo.get(id).unwrap().unwrap().added_at;

    let range = AddedRange::from_days(added_at.date(), added_at.date()).unwrap();
    assert_eq!(ids(repo.filter_by_added_range(&range).unwrap()), vec![id]);

    let explicit = AddedRange::new(added_at, added_at);
    assert_eq!(ids(repo.filter_by_added_range(&explicit).unwrap()), vec![id]);
}
