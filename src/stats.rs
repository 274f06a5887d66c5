// BookKeeper Core - Personal Book Catalog for Mobile
// Copyright (C) 2025 BookKeeper contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.


//! Statistics aggregation
//!
//! Single-pass aggregates over a snapshot of the full catalog, recomputed on
//! each stats request. Nothing here is cached or maintained incrementally.

use crate::storage::models::{Book, StatsSummary};
use std::collections::HashMap;

/// Total, read, and unread counts for a snapshot
pub fn summarize(all_books: &[Book]) -> StatsSummary {
    let mut summary = StatsSummary {
        total_count: all_books.len() as i64,
        ..StatsSummary::default()
    };
    for book in all_books {
        if book.is_read {
            summary.read_count += 1;
        } else {
            summary.unread_count += 1;
        }
    }
    summary
}

/// Book count per shelf name
///
/// Groups by the literal stored `shelf_location` string. A book whose shelf
/// was deleted from the registry still counts under its stored name; shelf
/// existence is deliberately not validated here.
pub fn group_by_shelf(all_books: &[Book]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for book in all_books {
        *counts.entry(book.shelf_location.clone()).or_insert(0) += 1;
    }
    counts
}
