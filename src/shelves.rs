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


//! Shelf name registry
//!
//! The ordered, deduplicated list of user-defined shelf names behind the
//! add/edit/search pickers, persisted in the shelf preference group as a
//! single `@`-delimited string. Insertion order is kept so that positional
//! editing and last-used defaulting behave the way the user arranged them;
//! an unordered set representation would lose that.
//!
//! "Default" is the sentinel shelf: always present, never removable, and the
//! shelf new books land on when none is chosen.

use crate::error::Result;
use crate::prefs::{PreferenceStore, KEY_LAST_SHELF, KEY_SHELF_NAMES};
use tracing::{debug, warn};

/// The non-removable sentinel shelf
pub const DEFAULT_SHELF: &str = "Default";

/// Separator used in the persisted encoding. Shelf names containing it are
/// rejected at `add` rather than escaped.
const DELIMITER: char = '@';

/// Ordered registry of shelf names over an injected preference store
#[derive(Debug)]
pub struct ShelfRegistry<P: PreferenceStore> {
    prefs: P,
}

impl<P: PreferenceStore> ShelfRegistry<P> {
    pub fn new(prefs: P) -> Self {
        Self { prefs }
    }

    /// Persisted shelf names in insertion order
    ///
    /// Returns `["Default"]` when nothing is persisted. Empty entries from a
    /// damaged encoding are dropped, and "Default" is put back at the front
    /// if a stored encoding lost it.
    pub fn list(&self) -> Vec<String> {
        let stored = self.prefs.get_string(KEY_SHELF_NAMES).unwrap_or_default();
        if stored.is_empty() {
            return vec![DEFAULT_SHELF.to_string()];
        }

        let mut names: Vec<String> = stored
            .split(DELIMITER)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if !names.iter().any(|name| name == DEFAULT_SHELF) {
            names.insert(0, DEFAULT_SHELF.to_string());
        }
        names
    }

    /// Append a shelf name
    ///
    /// No-op (`Ok(false)`) for empty names, names containing the `@`
    /// delimiter, and names already present (case-sensitive match).
    pub fn add(&mut self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }
        if name.contains(DELIMITER) {
            warn!(name, "shelf name rejected: contains the delimiter");
            return Ok(false);
        }

        let mut names = self.list();
        if names.iter().any(|existing| existing == name) {
            return Ok(false);
        }

        debug!(name, "adding shelf");
        names.push(name.to_string());
        self.persist(&names)?;
        Ok(true)
    }

    /// Remove a shelf name
    ///
    /// Removing "Default" always fails; removing an unknown name reports
    /// `Ok(false)`. Books keep their stored shelf string after a removal.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if name == DEFAULT_SHELF {
            warn!("refusing to remove the Default shelf");
            return Ok(false);
        }

        let mut names = self.list();
        let Some(position) = names.iter().position(|existing| existing == name) else {
            return Ok(false);
        };

        names.remove(position);
        self.persist(&names)?;
        Ok(true)
    }

    /// Shelf to preselect on the add-book form
    ///
    /// The most recently chosen shelf, falling back to the first listed
    /// shelf when nothing was remembered or the remembered name no longer
    /// exists.
    pub fn last_used(&self) -> String {
        let names = self.list();
        match self.prefs.get_string(KEY_LAST_SHELF) {
            Some(last) if names.iter().any(|name| name == &last) => last,
            _ => names[0].clone(),
        }
    }

    /// Remember the shelf the user just picked
    pub fn set_last_used(&mut self, name: &str) -> Result<()> {
        self.prefs.put_string(KEY_LAST_SHELF, name)
    }

    fn persist(&mut self, names: &[String]) -> Result<()> {
        self.prefs.put_string(KEY_SHELF_NAMES, &names.join(&DELIMITER.to_string()))
    }
}
