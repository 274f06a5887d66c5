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


//! Database storage and models
//!
//! All durable book state lives in a single SQLite table, `book_table`,
//! reached through [`Database`]. The schema is versioned and evolves through
//! forward-only migrations in [`migrations`]; the repository functions in
//! [`queries`] are the only write path and enforce the
//! `(title_key, author)` uniqueness rule on insert.
//!
//! # Usage Example
//! ```no_run
//! use bookkeeper_core::storage::{queries, Database, NewBook};
//!
//! # async fn example() -> bookkeeper_core::Result<()> {
//! let db = Database::new("./books.db").await?;
//!
//! let book_id = queries::add_book(
//!     db.pool(),
//!     &NewBook::new("Piranesi".to_string(), "Susanna Clarke".to_string()),
//! )
//! .await?;
//!
//! let books = queries::list_books(db.pool()).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use models::{fold, Book, NewBook, SortMode, StatsSummary};
