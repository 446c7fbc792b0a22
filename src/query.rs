//! Wildcard search over book records.
//!
//! A query expression is a list of clauses joined by `" & "`. Each clause is a
//! pattern where `*` separates literal fragments. A clause matches a text when
//! every fragment occurs somewhere in it, ignoring case. Fragment order and
//! overlap are not checked, so this is looser than a shell glob:
//! `*20*peter*` matches `"Peter, 2020"`.
//!
//! A record matches an expression when every clause matches at least one of
//! its [searchable fields](crate::model::BookRecord::searchable_fields).

use crate::model::BookRecord;

/// Separator between AND-ed clauses.
pub const CLAUSE_DELIMITER: &str = " & ";
/// Wildcard marker inside a clause.
pub const WILDCARD: char = '*';

/// A compiled wildcard pattern. Reusable across any number of texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardMatcher {
    /// Lowercased, non-empty literal fragments.
    fragments: Vec<String>,
}

impl WildcardMatcher {
    pub fn compile(pattern: &str) -> Self {
        let fragments = pattern
            .trim_matches(WILDCARD)
            .split(WILDCARD)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { fragments }
    }

    /// Case-insensitive test: every fragment appears somewhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        if self.fragments.is_empty() {
            return true;
        }
        let text = text.to_lowercase();
        self.fragments.iter().all(|f| text.contains(f.as_str()))
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}

/// A parsed search expression: the AND of its clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    clauses: Vec<WildcardMatcher>,
}

impl Query {
    /// Split `expression` on `" & "` and compile each clause. Never fails.
    pub fn parse(expression: &str) -> Self {
        Self::from_clauses(
            expression
                .split(CLAUSE_DELIMITER)
                .map(WildcardMatcher::compile)
                .collect(),
        )
    }

    /// Build a query from already compiled clauses. With no clauses the query
    /// matches nothing.
    pub fn from_clauses(clauses: Vec<WildcardMatcher>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[WildcardMatcher] {
        &self.clauses
    }

    /// AND across clauses, OR across the book's searchable fields.
    pub fn matches(&self, book: &BookRecord) -> bool {
        !self.clauses.is_empty()
            && self
                .clauses
                .iter()
                .all(|clause| book.searchable_fields().any(|field| clause.is_match(&field)))
    }

    /// Books matching this query, in input order. Duplicates are kept.
    pub fn filter<'a, I>(&self, books: I) -> Vec<&'a BookRecord>
    where
        I: IntoIterator<Item = &'a BookRecord>,
    {
        books.into_iter().filter(|b| self.matches(b)).collect()
    }
}

/// Filter `books` by a query expression.
pub fn filter_books<'a>(books: &'a [BookRecord], expression: &str) -> Vec<&'a BookRecord> {
    let query = Query::parse(expression);
    let found = query.filter(books);
    tracing::debug!(
        expression,
        clauses = query.clauses.len(),
        candidates = books.len(),
        found = found.len(),
        "filtered books"
    );
    found
}
