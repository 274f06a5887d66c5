//! Database models for the book catalog
//!
//! # SQLite Adaptations
//! - `is_read` stored as INTEGER 0/1
//! - `title_key` stored alongside `title` so the store can order rows without
//!   per-query folding; it is derived state, never set directly by callers
//! - `shelf_location` holds the shelf name as a plain string with no foreign
//!   key; a book may keep naming a shelf that was later deleted

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lowercase-normalize a string for case-insensitive comparison.
///
/// This is the folding used for both the uniqueness key and live search.
pub fn fold(s: &str) -> String {
    s.to_lowercase()
}

// ============================================================================
// ENUMS
// ============================================================================

/// Sort order for the collection view
///
/// Persisted as the `layout_view` integer preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum SortMode {
    /// Folded-title order; the repository's canonical order
    ByTitle = 0,
    ByAuthor = 1,
    ByShelf = 2,
}

impl SortMode {
    /// Unknown or unset values fall back to the title ordering
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => SortMode::ByAuthor,
            2 => SortMode::ByShelf,
            _ => SortMode::ByTitle,
        }
    }
}

impl Default for SortMode {
    fn default() -> Self {
        SortMode::ByTitle
    }
}

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// Book entity - one row of `book_table`
///
/// `id` is assigned by the store on insert and immutable afterward.
/// `(title_key, author)` is unique across all rows on insert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Book {
    /// Primary key (auto-increment)
    pub id: i64,
    pub title: String,
    /// Folded form of `title`; recomputed whenever the title changes
    pub title_key: String,
    pub author: String,
    pub is_read: bool,
    /// Shelf name as stored; may be stale after a shelf is deleted
    pub shelf_location: String,
}

impl Book {
    /// Replace the title, keeping the derived key in sync
    pub fn set_title(&mut self, title: String) {
        self.title_key = fold(&title);
        self.title = title;
    }

    /// Whether this book matches a folded search query against title or author
    pub fn matches_query(&self, folded_query: &str) -> bool {
        fold(&self.title).contains(folded_query) || fold(&self.author).contains(folded_query)
    }
}

// ============================================================================
// NEW RECORD STRUCTS (for inserts)
// ============================================================================

/// New book record for insertion
///
/// The title key is computed at insert time; callers never supply it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub is_read: bool,
    pub shelf_location: String,
}

impl NewBook {
    /// Unread book on the "Default" shelf
    pub fn new(title: String, author: String) -> Self {
        Self {
            title,
            author,
            is_read: false,
            shelf_location: crate::shelves::DEFAULT_SHELF.to_string(),
        }
    }

    pub fn on_shelf(mut self, shelf: impl Into<String>) -> Self {
        self.shelf_location = shelf.into();
        self
    }

    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }

    /// Derived uniqueness/order key for this record
    pub fn title_key(&self) -> String {
        fold(&self.title)
    }
}

// ============================================================================
// DERIVED SUMMARIES
// ============================================================================

/// Aggregate read/unread counts over the whole catalog
///
/// `read_count + unread_count == total_count` always; the counts are
/// recomputed on each request, never maintained incrementally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_count: i64,
    pub read_count: i64,
    pub unread_count: i64,
}
