//! Core data types for the catalog.
//!
//! A [`BookRecord`] is what the record parser produces. Physical placement is
//! expressed twice: as the user-facing [`Location`] (room, row and shelf
//! numbers) and as the stable identifiers the [`Library`](crate::inventory::Library)
//! allocates for each room, row and shelf it knows about.

use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

macro_rules! catalog_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(NonZeroU32);

        impl $name {
            /// Create an identifier from a raw `u32`. Returns `None` for zero.
            pub fn new(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map($name)
            }

            /// Get the underlying `u32` value.
            pub fn get(self) -> u32 {
                self.0.get()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

catalog_id!(
    /// Stable identity of a room known to the library.
    RoomId,
    "room"
);
catalog_id!(
    /// Stable identity of a row within a room.
    RowId,
    "row"
);
catalog_id!(
    /// Stable identity of a unique (room, row, shelf) triple.
    ShelfId,
    "shelf"
);

/// Position of a book in the library's catalog list.
///
/// Two books with identical fields are still distinct entries; this is the
/// identity inventory queries deduplicate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub usize);

/// A book as read from the ingestion format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub isbn: String,
    pub title: String,
    /// Authors in the order their lines appeared.
    pub authors: Vec<String>,
    pub publisher: String,
    pub publication_year: i32,
    pub number_of_pages: i32,
    /// Assigned when the library places the book; the parser never sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_id: Option<ShelfId>,
}

impl BookRecord {
    /// Text values a search query is evaluated against: title, publisher,
    /// every author, and the publication year in decimal.
    pub fn searchable_fields(&self) -> impl Iterator<Item = std::borrow::Cow<'_, str>> {
        use std::borrow::Cow;

        [Cow::Borrowed(self.title.as_str()), Cow::Borrowed(self.publisher.as_str())]
            .into_iter()
            .chain(self.authors.iter().map(|a| Cow::Borrowed(a.as_str())))
            .chain(std::iter::once(Cow::Owned(self.publication_year.to_string())))
    }
}

/// User-facing physical location: room number, row number within the room,
/// shelf number within the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    pub room: u32,
    pub row: u32,
    pub shelf: u32,
}

impl Location {
    pub fn new(room: u32, row: u32, shelf: u32) -> Self {
        Self { room, row, shelf }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.room, self.row, self.shelf)
    }
}

impl FromStr for Location {
    type Err = ConfigError;

    /// Parse `room/row/shelf`, each a positive integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidLocation { input: s.to_string() };

        let parts: Vec<u32> = s
            .split('/')
            .map(|p| p.trim().parse::<u32>().ok().filter(|n| *n > 0))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;

        match parts.as_slice() {
            [room, row, shelf] => Ok(Self::new(*room, *row, *shelf)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Location {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}
