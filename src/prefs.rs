// BookKeeper Core - Personal Book Catalog for Mobile
// Copyright (C) 2025 BookKeeper contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.


//! Key-value preference storage
//!
//! The persistent map the app keeps small settings in, injected into the
//! components that need it rather than looked up through ambient state. Each
//! named group is an independent store; the core uses two:
//!
//! - [`SHELF_SETTINGS_GROUP`] — shelf names, last-used shelf, layout choice
//! - [`USER_SESSION_GROUP`] — signed-in user data consumed by the sync screens
//!
//! [`JsonPreferences`] persists one JSON object file per group and rewrites it
//! on every put; [`MemoryPreferences`] backs tests.

use crate::error::{CatalogError, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Preference group holding shelf names and view settings
pub const SHELF_SETTINGS_GROUP: &str = "shelves";
/// Preference group holding user/session data
pub const USER_SESSION_GROUP: &str = "user";

/// Ordered shelf names joined with the `@` delimiter
pub const KEY_SHELF_NAMES: &str = "shelf_names";
/// Most recently chosen shelf name
pub const KEY_LAST_SHELF: &str = "last_shelf";
/// Stored [`crate::storage::SortMode`] integer
pub const KEY_LAYOUT_VIEW: &str = "layout_view";
/// Server-side id of the signed-in user
pub const KEY_USER_ID: &str = "user_id";

/// A persistent string/int map scoped to one named preference group
pub trait PreferenceStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&mut self, key: &str, value: &str) -> Result<()>;
    fn get_int(&self, key: &str) -> Option<i32>;
    fn put_int(&mut self, key: &str, value: i32) -> Result<()>;
}

// ============================================================================
// FILE-BACKED STORE
// ============================================================================

/// Preference group persisted as a single JSON object file
#[derive(Debug)]
pub struct JsonPreferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonPreferences {
    /// Open (or create) the group file `<dir>/<group>.json`
    pub fn open<P: AsRef<Path>>(dir: P, group: &str) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)
            .map_err(|e| CatalogError::PreferenceIo(format!("create {}: {}", dir.display(), e)))?;
        let path = dir.join(format!("{group}.json"));

        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| CatalogError::PreferenceIo(format!("read {}: {}", path.display(), e)))?;
            serde_json::from_str(&raw)?
        } else {
            Map::new()
        };

        Ok(Self { path, values })
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&Value::Object(self.values.clone()))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| CatalogError::PreferenceIo(format!("write {}: {}", self.path.display(), e)))
    }
}

impl PreferenceStore for JsonPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(str::to_string)
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), Value::from(value));
        self.persist()
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        self.values.get(key)?.as_i64().map(|v| v as i32)
    }

    fn put_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.values.insert(key.to_string(), Value::from(value));
        self.persist()
    }
}

// ============================================================================
// IN-MEMORY STORE (tests)
// ============================================================================

/// Non-persistent store for tests
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key)?.as_str().map(str::to_string)
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), Value::from(value));
        Ok(())
    }

    fn get_int(&self, key: &str) -> Option<i32> {
        self.values.get(key)?.as_i64().map(|v| v as i32)
    }

    fn put_int(&mut self, key: &str, value: i32) -> Result<()> {
        self.values.insert(key.to_string(), Value::from(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_read_as_none() {
        let prefs = MemoryPreferences::new();
        assert_eq!(prefs.get_string(KEY_SHELF_NAMES), None);
        assert_eq!(prefs.get_int(KEY_LAYOUT_VIEW), None);
    }

    #[test]
    fn json_group_round_trips_across_reopen() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        {
            let mut prefs =
                JsonPreferences::open(dir.path(), SHELF_SETTINGS_GROUP).expect("open group");
            prefs.put_string(KEY_SHELF_NAMES, "Default@Office").expect("put string");
            prefs.put_int(KEY_LAYOUT_VIEW, 2).expect("put int");
        }

        let prefs = JsonPreferences::open(dir.path(), SHELF_SETTINGS_GROUP).expect("reopen group");
        assert_eq!(prefs.get_string(KEY_SHELF_NAMES).as_deref(), Some("Default@Office"));
        assert_eq!(prefs.get_int(KEY_LAYOUT_VIEW), Some(2));
    }

    #[test]
    fn groups_are_independent() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut shelves =
            JsonPreferences::open(dir.path(), SHELF_SETTINGS_GROUP).expect("open shelves");
        shelves.put_string(KEY_LAST_SHELF, "Office").expect("put");

        let user = JsonPreferences::open(dir.path(), USER_SESSION_GROUP).expect("open user");
        assert_eq!(user.get_string(KEY_LAST_SHELF), None);
    }

    #[test]
    fn overwrite_replaces_value() {
        let mut prefs = MemoryPreferences::new();
        prefs.put_int(KEY_USER_ID, 7).expect("put");
        prefs.put_int(KEY_USER_ID, 12).expect("put");
        assert_eq!(prefs.get_int(KEY_USER_ID), Some(12));
    }
}
