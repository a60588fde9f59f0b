//! SQLite schema for the favorites database.
//!
//! Each favorite is kept as a JSON document keyed by the event id, with the
//! creation stamp in its own column so listing can be ordered in SQL.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

const FAVORITES_TABLE_V1: Table = Table {
    name: "favorites",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true),
        sqlite_column!("document", &SqlType::Text, non_null = true),
        // Unix millis
        sqlite_column!("created_at", &SqlType::Integer, non_null = true),
    ],
    indices: &[("idx_favorites_created_at", "created_at")],
};

pub const FAVORITES_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[FAVORITES_TABLE_V1],
    migration: None,
}];
