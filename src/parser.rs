//! Line-oriented record parser.
//!
//! Input is a block of `\n`-separated lines. A line beginning with the record
//! type's marker (`Book` for books) opens a new record; every other non-blank
//! line is `key: value`, split on the first colon, and is applied to the open
//! record through the field table in [`crate::fields`].
//!
//! ```
//! use shelfmark::parser::parse_books;
//!
//! let books = parse_books("Book:\nAuthor: Brian Jensen\nTitle: Texts from Denmark\nPublished: 2001").unwrap();
//! assert_eq!(books[0].authors, vec!["Brian Jensen"]);
//! assert_eq!(books[0].publication_year, 2001);
//! ```

use crate::error::FormatError;
use crate::fields::{CatalogRecord, Setter};
use crate::model::BookRecord;

const LINE_DELIMITER: char = '\n';
const KEY_VALUE_DELIMITER: char = ':';

/// Parse a block of book records.
///
/// All-or-nothing: the first malformed line aborts the whole block.
pub fn parse_books(input: &str) -> Result<Vec<BookRecord>, FormatError> {
    parse_records::<BookRecord>(input)
}

/// Parse a block of records of any [`CatalogRecord`] type.
pub fn parse_records<R: CatalogRecord>(input: &str) -> Result<Vec<R>, FormatError> {
    let mut records = Vec::new();
    let mut current: Option<R> = None;

    for (index, line) in input.split(LINE_DELIMITER).enumerate() {
        let line_no = index + 1;

        if line.starts_with(R::MARKER) {
            if let Some(done) = current.replace(R::default()) {
                records.push(done);
            }
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        let Some(record) = current.as_mut() else {
            return Err(FormatError::MissingRecordMarker {
                marker: R::MARKER,
                line: line_no,
            });
        };

        apply_line(record, line, line_no)?;
    }

    records.extend(current);

    tracing::debug!(count = records.len(), marker = R::MARKER, "parsed records");
    Ok(records)
}

/// Apply one `key: value` line to an open record.
fn apply_line<R: CatalogRecord>(record: &mut R, line: &str, line_no: usize) -> Result<(), FormatError> {
    let (key, value) = line
        .split_once(KEY_VALUE_DELIMITER)
        .ok_or(FormatError::MissingDelimiter { line: line_no })?;
    let (key, value) = (key.trim(), value.trim());

    let field = R::resolve(key).ok_or_else(|| FormatError::UnknownKey {
        key: key.to_string(),
        line: line_no,
    })?;

    match field.setter {
        Setter::Text(set) => set(record, value.to_string()),
        Setter::Integer(set) => {
            let n = value.parse::<i32>().map_err(|_| FormatError::InvalidInteger {
                key: key.to_string(),
                value: value.to_string(),
                line: line_no,
            })?;
            set(record, n);
        }
        Setter::List(list) => list(record).push(value.to_string()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BOOKS: &str = "Book:
Author: Brian Jensen
Title: Texts from Denmark
Publisher: Gyldendal
Published: 2001
NumberOfPages: 253
Book:
Author: Peter Jensen
Author: Hans Andersen
Title: Stories from abroad
Publisher: Borgen
Published: 2012
NumberOfPages: 156";

    #[test]
    fn parses_books() {
        let books = parse_books(TWO_BOOKS).unwrap();
        assert_eq!(books.len(), 2);

        assert_eq!(books[0].authors, vec!["Brian Jensen"]);
        assert_eq!(books[0].title, "Texts from Denmark");
        assert_eq!(books[0].publisher, "Gyldendal");
        assert_eq!(books[0].publication_year, 2001);
        assert_eq!(books[0].number_of_pages, 253);
        assert_eq!(books[0].shelf_id, None);

        assert_eq!(books[1].authors, vec!["Peter Jensen", "Hans Andersen"]);
        assert_eq!(books[1].title, "Stories from abroad");
        assert_eq!(books[1].publisher, "Borgen");
        assert_eq!(books[1].publication_year, 2012);
        assert_eq!(books[1].number_of_pages, 156);
    }

    #[test]
    fn natural_names_work_like_aliases() {
        let books =
            parse_books("Book\nISBN: 978-87-02\nAuthors: A\nPublicationYear: 1999").unwrap();
        assert_eq!(books[0].isbn, "978-87-02");
        assert_eq!(books[0].authors, vec!["A"]);
        assert_eq!(books[0].publication_year, 1999);
    }

    #[test]
    fn unknown_key_names_the_key() {
        let input = "Book:\nSomeWeirdField: Brian Jensen\nTitle: Texts from Denmark";
        let err = parse_books(input).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownKey {
                key: "SomeWeirdField".into(),
                line: 2
            }
        );
        assert!(err.to_string().contains("SomeWeirdField"));
    }

    #[test]
    fn missing_marker_rejected() {
        let input = "Author: Brian Jensen\nTitle: Texts from Denmark";
        let err = parse_books(input).unwrap_err();
        assert!(matches!(err, FormatError::MissingRecordMarker { line: 1, .. }));
        assert!(err.to_string().contains("must start with a \"Book\" record marker"));
    }

    #[test]
    fn non_numeric_integer_rejected() {
        let err = parse_books("Book:\nPublished: two thousand").unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidInteger {
                key: "Published".into(),
                value: "two thousand".into(),
                line: 2
            }
        );
    }

    #[test]
    fn line_without_colon_rejected() {
        let err = parse_books("Book:\nTitle Texts from Denmark").unwrap_err();
        assert_eq!(err, FormatError::MissingDelimiter { line: 2 });
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn error_discards_earlier_records() {
        let input = format!("{TWO_BOOKS}\nBook:\nPages: 10");
        assert!(parse_books(&input).is_err());
    }

    #[test]
    fn value_split_on_first_colon_only() {
        let books = parse_books("Book:\nTitle: Rust: The Book").unwrap();
        assert_eq!(books[0].title, "Rust: The Book");
    }

    #[test]
    fn last_text_write_wins() {
        let books = parse_books("Book:\nTitle: First\nTitle: Second").unwrap();
        assert_eq!(books[0].title, "Second");
    }

    #[test]
    fn empty_records_are_emitted() {
        let books = parse_books("Book:\nBook:\nTitle: X\nBook:").unwrap();
        assert_eq!(books.len(), 3);
        assert_eq!(books[0], BookRecord::default());
        assert_eq!(books[1].title, "X");
        assert_eq!(books[2], BookRecord::default());
    }

    #[test]
    fn blank_lines_and_crlf_tolerated() {
        let books = parse_books("Book:\r\nTitle: A\r\n\r\n  \nPublished: 2001\r\n").unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "A");
        assert_eq!(books[0].publication_year, 2001);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_books("").unwrap().is_empty());
        assert!(parse_books("\n\n").unwrap().is_empty());
    }

    #[test]
    fn surrounding_whitespace_trimmed() {
        let books = parse_books("Book:\n  Title  :   Spaced Out   \nPublished:  42 ").unwrap();
        assert_eq!(books[0].title, "Spaced Out");
        assert_eq!(books[0].publication_year, 42);
    }
}
