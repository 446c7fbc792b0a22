//! In-memory library: rooms, rows, shelves and the books placed on them.
//!
//! Every room, row and shelf gets a stable identifier the first time a book is
//! placed there. Lookups go through explicit index maps keyed by the parent's
//! identity plus the child's number, so a (room, row, shelf) triple always
//! resolves to the same [`ShelfId`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{FormatError, InventoryError};
use crate::model::{BookId, BookRecord, Location, RoomId, RowId, ShelfId};
use crate::parser::parse_books;
use crate::query::Query;

#[derive(Debug, Clone, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub number: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub id: RowId,
    pub number: u32,
    pub room: RoomId,
}

#[derive(Debug, Clone, Serialize)]
pub struct Shelf {
    pub id: ShelfId,
    pub number: u32,
    pub row: RowId,
}

/// Filter for [`Library::inventory_list`]. A shelf number is only meaningful
/// together with a row number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryQuery {
    pub room: u32,
    pub row: Option<u32>,
    pub shelf: Option<u32>,
}

impl InventoryQuery {
    pub fn room(room: u32) -> Self {
        Self {
            room,
            ..Default::default()
        }
    }

    pub fn row(mut self, row: u32) -> Self {
        self.row = Some(row);
        self
    }

    pub fn shelf(mut self, shelf: u32) -> Self {
        self.shelf = Some(shelf);
        self
    }
}

/// Summary counts for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryInfo {
    pub rooms: usize,
    pub rows: usize,
    pub shelves: usize,
    pub books: usize,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rooms:   {}", self.rooms)?;
        writeln!(f, "Rows:    {}", self.rows)?;
        writeln!(f, "Shelves: {}", self.shelves)?;
        write!(f, "Books:   {}", self.books)
    }
}

/// The catalog store.
#[derive(Debug, Default)]
pub struct Library {
    rooms: Vec<Room>,
    rows: Vec<Row>,
    shelves: Vec<Shelf>,
    books: Vec<BookRecord>,

    room_by_number: HashMap<u32, RoomId>,
    row_by_number: HashMap<(RoomId, u32), RowId>,
    shelf_by_number: HashMap<(RowId, u32), ShelfId>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shelf at `location`, creating the room, row and shelf
    /// entries that do not exist yet. Idempotent.
    pub fn resolve_or_create_shelf(&mut self, location: Location) -> ShelfId {
        let room = match self.room_by_number.get(&location.room) {
            Some(id) => *id,
            None => {
                let id = next_id(self.rooms.len(), RoomId::new);
                self.rooms.push(Room {
                    id,
                    number: location.room,
                });
                self.room_by_number.insert(location.room, id);
                id
            }
        };

        let row = match self.row_by_number.get(&(room, location.row)) {
            Some(id) => *id,
            None => {
                let id = next_id(self.rows.len(), RowId::new);
                self.rows.push(Row {
                    id,
                    number: location.row,
                    room,
                });
                self.row_by_number.insert((room, location.row), id);
                id
            }
        };

        match self.shelf_by_number.get(&(row, location.shelf)) {
            Some(id) => *id,
            None => {
                let id = next_id(self.shelves.len(), ShelfId::new);
                self.shelves.push(Shelf {
                    id,
                    number: location.shelf,
                    row,
                });
                self.shelf_by_number.insert((row, location.shelf), id);
                tracing::debug!(%location, shelf = %id, "created shelf");
                id
            }
        }
    }

    /// Place `book` at `location` and append it to the catalog.
    pub fn add_book(&mut self, mut book: BookRecord, location: Location) -> BookId {
        book.shelf_id = Some(self.resolve_or_create_shelf(location));
        self.books.push(book);
        BookId(self.books.len() - 1)
    }

    /// Parse a record block and place every book at `location`.
    ///
    /// Nothing is added when the block is malformed.
    pub fn ingest(&mut self, input: &str, location: Location) -> Result<Vec<BookId>, FormatError> {
        let parsed = parse_books(input)?;
        let ids: Vec<BookId> = parsed
            .into_iter()
            .map(|book| self.add_book(book, location))
            .collect();
        tracing::info!(count = ids.len(), %location, "ingested books");
        Ok(ids)
    }

    /// First book in catalog order with the given ISBN.
    pub fn find_book_by_isbn(&self, isbn: &str) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    /// Books in a room, optionally narrowed to a row and then a shelf.
    pub fn inventory_list(&self, query: InventoryQuery) -> Result<Vec<&BookRecord>, InventoryError> {
        if query.shelf.is_some() && query.row.is_none() {
            return Err(InventoryError::ShelfWithoutRow);
        }

        let shelves = self.matching_shelves(query);
        let books = self.books_on_shelves(&shelves);
        tracing::debug!(
            room = query.room,
            row = ?query.row,
            shelf = ?query.shelf,
            shelves = shelves.len(),
            books = books.len(),
            "inventory list"
        );
        Ok(books)
    }

    fn matching_shelves(&self, query: InventoryQuery) -> HashSet<ShelfId> {
        let Some(&room) = self.room_by_number.get(&query.room) else {
            return HashSet::new();
        };

        let rows: Vec<RowId> = match query.row {
            Some(number) => self.row_by_number.get(&(room, number)).copied().into_iter().collect(),
            None => self.rows.iter().filter(|r| r.room == room).map(|r| r.id).collect(),
        };

        rows.into_iter()
            .flat_map(|row| match query.shelf {
                Some(number) => self
                    .shelf_by_number
                    .get(&(row, number))
                    .copied()
                    .into_iter()
                    .collect::<Vec<_>>(),
                None => self
                    .shelves
                    .iter()
                    .filter(|s| s.row == row)
                    .map(|s| s.id)
                    .collect(),
            })
            .collect()
    }

    /// Books placed on any of `shelves`, in catalog order. Each catalog entry
    /// appears at most once.
    pub fn books_on_shelves(&self, shelves: &HashSet<ShelfId>) -> Vec<&BookRecord> {
        self.books
            .iter()
            .filter(|b| b.shelf_id.is_some_and(|id| shelves.contains(&id)))
            .collect()
    }

    /// Run a wildcard query over the whole catalog.
    pub fn search(&self, expression: &str) -> Vec<&BookRecord> {
        crate::query::filter_books(&self.books, expression)
    }

    /// Run an already parsed query over the whole catalog.
    pub fn search_with(&self, query: &Query) -> Vec<&BookRecord> {
        query.filter(&self.books)
    }

    /// Room, row and shelf numbers of a known shelf.
    pub fn location_of(&self, shelf: ShelfId) -> Option<Location> {
        let shelf = self.shelves.get(index_of(shelf.get()))?;
        let row = self.rows.get(index_of(shelf.row.get()))?;
        let room = self.rooms.get(index_of(row.room.get()))?;
        Some(Location::new(room.number, row.number, shelf.number))
    }

    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.books.get(id.0)
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn shelves(&self) -> &[Shelf] {
        &self.shelves
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn info(&self) -> LibraryInfo {
        LibraryInfo {
            rooms: self.rooms.len(),
            rows: self.rows.len(),
            shelves: self.shelves.len(),
            books: self.books.len(),
        }
    }
}

/// Identifiers are allocated densely from 1, so entity `n` sits at index `n - 1`.
fn next_id<T>(len: usize, make: fn(u32) -> Option<T>) -> T {
    let raw = u32::try_from(len + 1).unwrap_or(u32::MAX);
    match make(raw) {
        Some(id) => id,
        None => unreachable!("len + 1 is never zero"),
    }
}

fn index_of(raw: u32) -> usize {
    raw as usize - 1
}
