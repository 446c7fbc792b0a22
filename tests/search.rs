//! End-to-end search tests over a fixed corpus.
//!
//! The corpus mixes titles, publishers and years that share digit runs
//! ("2020", "1920s", "20th") so clause-per-field matching is exercised.

use shelfmark::model::BookRecord;
use shelfmark::query::{Query, filter_books};

fn book(author: &str, title: &str, publisher: &str, year: i32, pages: i32) -> BookRecord {
    BookRecord {
        authors: vec![author.into()],
        title: title.into(),
        publisher: publisher.into(),
        publication_year: year,
        number_of_pages: pages,
        ..Default::default()
    }
}

fn corpus() -> Vec<BookRecord> {
    vec![
        book("Peter Johnson", "The Year 2020", "Penguin", 2020, 250),
        book("Alice Smith", "History of 1920s", "HarperCollins", 2015, 350),
        book("Peter Brown", "The Modern Era", "Random House", 2018, 400),
        book("Samuel Johnson", "The 20th Century", "Simon & Schuster", 2010, 300),
        book("Knud Rasmussen", "Across Arctic America", "G.P. Putnam's Sons", 1927, 414),
        book(
            "Knud Rasmussen",
            "The Netsilik Eskimos",
            "Report of the Fifth Thule Expedition",
            1931,
            276,
        ),
        book("Knud Rasmussen", "Eskimo Folk-Tales", "Houghton Mifflin Company", 1921, 295),
        book(
            "Knud Rasmussen",
            "The Intellectual Culture of the Iglulik Eskimos",
            "Report of the Fifth Thule Expedition",
            1929,
            350,
        ),
        book(
            "Knud Rasmussen",
            "Observations on the Intellectual Culture of the Caribou Eskimos",
            "Report of the Fifth Thule Expedition",
            1930,
            364,
        ),
    ]
}

#[test]
fn single_clause_matches_any_field() {
    let books = corpus();
    let found = filter_books(&books, "*20*");
    assert_eq!(found.len(), 4);
    for (found, expected) in found.iter().zip(&books[..4]) {
        assert_eq!(*found, expected);
    }
}

#[test]
fn clauses_are_anded() {
    let books = corpus();
    let found = filter_books(&books, "*20* & *peter*");
    assert_eq!(found, vec![&books[0], &books[2]]);
}

#[test]
fn search_is_case_insensitive() {
    let books = corpus();
    let found = filter_books(&books, "*EsKiMo* & *kNuD*");
    assert_eq!(found, vec![&books[5], &books[6], &books[7], &books[8]]);
}

#[test]
fn publisher_with_ampersand_is_plain_text() {
    let books = corpus();
    // "Simon & Schuster" cannot be searched as one clause; the separator wins.
    let found = filter_books(&books, "*simon* & *schuster*");
    assert_eq!(found, vec![&books[3]]);
}

#[test]
fn compiled_query_is_reusable() {
    let books = corpus();
    let query = Query::parse("*thule*");
    assert_eq!(query.filter(&books).len(), 3);
    assert_eq!(query.filter(&books[..6]).len(), 1);
}

#[test]
fn no_match_is_empty() {
    let books = corpus();
    assert!(filter_books(&books, "*tolkien*").is_empty());
    assert!(filter_books(&[], "*20*").is_empty());
}
