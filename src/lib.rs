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


//! Local catalog core for a personal book-keeping app.
//!
//! This crate owns the data layer the mobile screens call into: the SQLite
//! store of book records with its schema migrations, the CRUD repository with
//! duplicate detection, the shelf-name registry backed by a key-value
//! preference store, the in-memory sort/search/filter engine, and the
//! statistics aggregation. Screen layout, navigation, and the remote sync
//! path live outside this crate; they consume the serializable models and
//! `Result` values exposed here.
//!
//! # Usage Example
//! ```no_run
//! use bookkeeper_core::storage::{queries, Database, NewBook};
//!
//! # async fn example() -> bookkeeper_core::Result<()> {
//! let db = Database::new("./books.db").await?;
//!
//! let id = queries::add_book(
//!     db.pool(),
//!     &NewBook::new("The Left Hand of Darkness".into(), "Ursula K. Le Guin".into()),
//! )
//! .await?;
//!
//! let shelf = queries::list_books(db.pool()).await?;
//! assert!(shelf.iter().any(|b| b.id == id));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod prefs;
pub mod shelves;
pub mod stats;
pub mod storage;
pub mod view;

pub use error::{CatalogError, Result};
pub use prefs::{JsonPreferences, MemoryPreferences, PreferenceStore};
pub use shelves::ShelfRegistry;
pub use stats::{group_by_shelf, summarize};
pub use storage::{Book, Database, NewBook, SortMode, StatsSummary};
pub use view::apply;
