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


//! Database migrations
//!
//! Schema evolution is forward-only and additive: each step may add columns or
//! tables but never drops or rewrites existing rows. Applied steps are tracked
//! in the `_migrations` table, so reopening an up-to-date store is a no-op.
//!
//! # Migration Strategy
//! Migrations are runtime SQL (no build-time database connection), keeping the
//! crate buildable for mobile targets.

use crate::error::Result;
use sqlx::{Executor, SqlitePool};

/// Current schema generation
///
/// Version 1 is the original five-column book table; version 2 adds
/// `shelf_location` with a literal `'Default'` backfill.
pub const SCHEMA_VERSION: i32 = 2;

struct Migration {
    version: i32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_book_table",
        sql: r#"
            CREATE TABLE IF NOT EXISTS book_table (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                title_key TEXT NOT NULL,
                author TEXT NOT NULL DEFAULT '',
                is_read INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_book_title_key ON book_table(title_key, author);
        "#,
    },
    Migration {
        version: 2,
        name: "add_shelf_location",
        sql: r#"
            ALTER TABLE book_table ADD COLUMN shelf_location TEXT NOT NULL DEFAULT 'Default';
        "#,
    },
];

/// Create migrations tracking table
async fn create_migrations_table(pool: &SqlitePool) -> Result<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .await?;

    Ok(())
}

/// Highest migration step recorded for this store
///
/// Zero for a store that has never been migrated.
pub async fn applied_version(pool: &SqlitePool) -> Result<i32> {
    create_migrations_table(pool).await?;

    let version: Option<i32> = sqlx::query_scalar("SELECT MAX(id) FROM _migrations")
        .fetch_one(pool)
        .await?;

    Ok(version.unwrap_or(0))
}

/// Apply every migration step in `(old_version, new_version]`
///
/// Invoked only meaningfully when `old_version < new_version`; equal or
/// descending version pairs perform no schema change and leave existing rows
/// untouched.
pub async fn migrate(pool: &SqlitePool, old_version: i32, new_version: i32) -> Result<()> {
    if old_version >= new_version {
        return Ok(());
    }

    create_migrations_table(pool).await?;

    for migration in MIGRATIONS {
        if migration.version <= old_version || migration.version > new_version {
            continue;
        }
        run_migration(pool, migration).await?;
    }

    Ok(())
}

/// Run a single migration if it hasn't been applied yet
async fn run_migration(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    let applied: Option<i32> = sqlx::query_scalar("SELECT id FROM _migrations WHERE id = ?")
        .bind(migration.version)
        .fetch_optional(pool)
        .await?;

    if applied.is_some() {
        return Ok(());
    }

    tracing::debug!(version = migration.version, name = migration.name, "applying migration");
    pool.execute(migration.sql).await?;

    sqlx::query("INSERT INTO _migrations (id, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}
