use super::models::{Favorite, FavoriteDocument, FavoritesError, UpsertOutcome};
use super::schema::FAVORITES_VERSIONED_SCHEMAS;
use super::FavoritesStore;
use crate::sqlite_persistence::open_versioned;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

pub struct SqliteFavoritesStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFavoritesStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        info!("Opening favorites database at {:?}", path);

        let mut conn = Connection::open(path)
            .with_context(|| format!("Failed to open favorites database at {:?}", path))?;
        open_versioned(&mut conn, FAVORITES_VERSIONED_SCHEMAS, "favorites")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Favorites database lock poisoned"))
    }

    fn row_to_favorite(row: &rusqlite::Row) -> rusqlite::Result<(String, String, i64)> {
        Ok((row.get("id")?, row.get("document")?, row.get("created_at")?))
    }

    fn decode(id: String, document: &str, created_at_millis: i64) -> Result<Favorite> {
        let fields: Map<String, Value> = serde_json::from_str(document)
            .with_context(|| format!("Corrupted document for favorite {}", id))?;
        let created_at = DateTime::<Utc>::from_timestamp_millis(created_at_millis)
            .with_context(|| format!("Invalid creation time for favorite {}", id))?;
        Ok(Favorite {
            id,
            fields,
            created_at,
        })
    }
}

impl FavoritesStore for SqliteFavoritesStore {
    fn list(&self) -> Result<Vec<Favorite>, FavoritesError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, document, created_at FROM favorites
                 ORDER BY created_at ASC, rowid ASC",
            )
            .context("Failed to prepare favorites listing")?;

        let rows = stmt
            .query_map([], Self::row_to_favorite)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .context("Failed to read favorites")?;

        let favorites = rows
            .into_iter()
            .map(|(id, document, created_at)| Self::decode(id, &document, created_at))
            .collect::<Result<Vec<_>>>()?;
        Ok(favorites)
    }

    fn upsert(&self, document: FavoriteDocument) -> Result<UpsertOutcome, FavoritesError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().context("Failed to begin transaction")?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT document FROM favorites WHERE id = ?1",
                params![document.id],
                |row| row.get(0),
            )
            .optional()
            .context("Failed to look up favorite")?;

        let outcome = match existing {
            Some(stored) => {
                let mut merged: Map<String, Value> = serde_json::from_str(&stored)
                    .with_context(|| format!("Corrupted document for favorite {}", document.id))?;
                merged.extend(document.fields);
                let serialized =
                    serde_json::to_string(&merged).context("Failed to encode favorite")?;
                tx.execute(
                    "UPDATE favorites SET document = ?1 WHERE id = ?2",
                    params![serialized, document.id],
                )
                .context("Failed to update favorite")?;
                UpsertOutcome::Updated
            }
            None => {
                let serialized =
                    serde_json::to_string(&document.fields).context("Failed to encode favorite")?;
                let now = Utc::now().timestamp_millis();
                tx.execute(
                    "INSERT INTO favorites (id, document, created_at) VALUES (?1, ?2, ?3)",
                    params![document.id, serialized, now],
                )
                .context("Failed to insert favorite")?;
                UpsertOutcome::Inserted
            }
        };

        tx.commit().context("Failed to commit favorite")?;
        debug!("Favorite {} {}", document.id, outcome.as_str());
        Ok(outcome)
    }

    fn delete(&self, id: &str) -> Result<(), FavoritesError> {
        let conn = self.conn()?;
        let deleted = conn
            .execute("DELETE FROM favorites WHERE id = ?1", params![id])
            .context("Failed to delete favorite")?;
        if deleted == 0 {
            return Err(FavoritesError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
