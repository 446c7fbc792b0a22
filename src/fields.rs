//! Field mapping: textual keys to record attributes.
//!
//! Each record type publishes a static table of [`Field`]s. A field has its
//! natural name, at most one alias, and a [`Setter`] whose kind drives value
//! coercion in the parser. Resolution is a pure lookup: natural names first,
//! then aliases, both case-sensitive.

use crate::model::BookRecord;

/// How a parsed value is applied to a record.
pub enum Setter<R> {
    /// Assign the trimmed text, replacing any earlier value.
    Text(fn(&mut R, String)),
    /// Parse the trimmed text as a base-10 integer, then assign.
    Integer(fn(&mut R, i32)),
    /// Append the trimmed text to a list attribute.
    List(fn(&mut R) -> &mut Vec<String>),
}

/// One row of a record type's field table.
pub struct Field<R> {
    /// Attribute name as written in the ingestion format.
    pub name: &'static str,
    /// Alternate key accepted for the same attribute.
    pub alias: Option<&'static str>,
    pub setter: Setter<R>,
}

impl<R> Field<R> {
    /// Whether `key` names this field, either naturally or by alias.
    pub fn accepts(&self, key: &str) -> bool {
        self.name == key || self.alias == Some(key)
    }
}

/// A record type the line-oriented parser can build.
pub trait CatalogRecord: Default + 'static {
    /// Line prefix that opens a new record.
    const MARKER: &'static str;

    /// The record's field table.
    fn fields() -> &'static [Field<Self>];

    /// Resolve a textual key to a field of this record type.
    fn resolve(key: &str) -> Option<&'static Field<Self>> {
        resolve(Self::fields(), key)
    }
}

/// Look up `key` in `fields`: exact natural-name match first, then alias.
pub fn resolve<'t, R>(fields: &'t [Field<R>], key: &str) -> Option<&'t Field<R>> {
    fields
        .iter()
        .find(|f| f.name == key)
        .or_else(|| fields.iter().find(|f| f.alias == Some(key)))
}

fn set_isbn(book: &mut BookRecord, value: String) {
    book.isbn = value;
}

fn set_title(book: &mut BookRecord, value: String) {
    book.title = value;
}

fn authors(book: &mut BookRecord) -> &mut Vec<String> {
    &mut book.authors
}

fn set_publisher(book: &mut BookRecord, value: String) {
    book.publisher = value;
}

fn set_publication_year(book: &mut BookRecord, value: i32) {
    book.publication_year = value;
}

fn set_number_of_pages(book: &mut BookRecord, value: i32) {
    book.number_of_pages = value;
}

// The shelf is assigned on placement, so it has no key here.
static BOOK_FIELDS: [Field<BookRecord>; 6] = [
    Field {
        name: "ISBN",
        alias: None,
        setter: Setter::Text(set_isbn),
    },
    Field {
        name: "Title",
        alias: None,
        setter: Setter::Text(set_title),
    },
    Field {
        name: "Authors",
        alias: Some("Author"),
        setter: Setter::List(authors),
    },
    Field {
        name: "Publisher",
        alias: None,
        setter: Setter::Text(set_publisher),
    },
    Field {
        name: "PublicationYear",
        alias: Some("Published"),
        setter: Setter::Integer(set_publication_year),
    },
    Field {
        name: "NumberOfPages",
        alias: None,
        setter: Setter::Integer(set_number_of_pages),
    },
];

impl CatalogRecord for BookRecord {
    const MARKER: &'static str = "Book";

    fn fields() -> &'static [Field<Self>] {
        &BOOK_FIELDS
    }
}
