// BookKeeper Core - Personal Book Catalog for Mobile
// Copyright (C) 2025 BookKeeper contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Collection view engine
//!
//! Turns a snapshot of the full catalog into the visible set, given the
//! user's three independent controls: sort mode, live search text, and the
//! read/unread filter pair. [`apply`] is a pure function of its inputs —
//! every keystroke and toggle recomputes from the snapshot, with no hidden
//! state and no incremental diffing.

use crate::error::Result;
use crate::prefs::{PreferenceStore, KEY_LAYOUT_VIEW};
use crate::storage::models::{fold, Book, SortMode};

/// Compute the visible set for a snapshot of the catalog
///
/// - Sorting is stable; ties keep the snapshot's relative order. `ByTitle`
///   applies no re-sort since the repository already hands the snapshot over
///   in folded-title order. Author and shelf comparisons are case-sensitive.
/// - The search query is trimmed and folded, then substring-matched against
///   the folded title OR author; an empty query matches everything.
/// - A book passes the read filter iff `(include_read && read)` or
///   `(include_unread && unread)`; both flags false yields an empty result,
///   which is the intended filter behavior rather than a bug.
pub fn apply(
    all_books: &[Book],
    sort_mode: SortMode,
    query: &str,
    include_read: bool,
    include_unread: bool,
) -> Vec<Book> {
    let mut books: Vec<Book> = all_books.to_vec();
    match sort_mode {
        SortMode::ByTitle => {} // snapshot is already in repository order
        SortMode::ByAuthor => books.sort_by(|a, b| a.author.cmp(&b.author)),
        SortMode::ByShelf => books.sort_by(|a, b| a.shelf_location.cmp(&b.shelf_location)),
    }

    let folded_query = fold(query.trim());
    books
        .into_iter()
        .filter(|book| book.matches_query(&folded_query))
        .filter(|book| (include_read && book.is_read) || (include_unread && !book.is_read))
        .collect()
}

/// Read the persisted sort choice, defaulting to the title ordering
pub fn load_sort_mode(prefs: &impl PreferenceStore) -> SortMode {
    SortMode::from_i32(prefs.get_int(KEY_LAYOUT_VIEW).unwrap_or(-1))
}

/// Persist the sort choice
pub fn save_sort_mode(prefs: &mut impl PreferenceStore, mode: SortMode) -> Result<()> {
    prefs.put_int(KEY_LAYOUT_VIEW, mode as i32)
}
