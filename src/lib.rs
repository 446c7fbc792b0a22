// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # shelfmark
//!
//! An in-memory library catalog: books are read from a line-oriented record
//! format, placed on shelves in a room → row → shelf hierarchy, and found
//! again with a small wildcard query language.
//!
//! ## Architecture
//!
//! - **Field mapping** (`fields`): static key → setter tables per record type
//! - **Record parser** (`parser`): `Book` marker / `key: value` state machine
//! - **Query** (`query`): `*`-wildcard clauses joined by `" & "`
//! - **Inventory** (`inventory`): rooms, rows, shelves and placed books
//! - **Configuration** (`config`): TOML list of record files and their shelves
//!
//! ## Library usage
//!
//! ```
//! use shelfmark::inventory::{InventoryQuery, Library};
//! use shelfmark::model::Location;
//!
//! let mut library = Library::new();
//! library
//!     .ingest("Book:\nTitle: The Year 2020\nAuthor: Peter Johnson\nPublished: 2020", Location::new(1, 1, 1))
//!     .unwrap();
//!
//! assert_eq!(library.search("*20* & *peter*").len(), 1);
//! assert_eq!(library.inventory_list(InventoryQuery::room(1).row(1)).unwrap().len(), 1);
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod inventory;
pub mod model;
pub mod parser;
pub mod query;

pub use error::{ConfigError, FormatError, InventoryError, ShelfmarkError, ShelfmarkResult};
pub use inventory::{InventoryQuery, Library};
pub use model::{BookRecord, Location, ShelfId};
pub use parser::parse_books;
pub use query::{Query, WildcardMatcher, filter_books};
