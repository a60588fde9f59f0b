use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Fields owned by the store; a client-supplied value for any of these is dropped.
const RESERVED_FIELDS: &[&str] = &["id", "_id", "createdAt"];

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Missing event id in body")]
    MissingId,

    #[error("Favorite not found")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// A persisted favorite: the client's event projection plus the creation stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A validated upsert payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteDocument {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl FavoriteDocument {
    /// Validates a raw request body. The id must be a non-empty string or a
    /// number, numbers being kept in their decimal form.
    pub fn from_body(body: Value) -> Result<Self, FavoritesError> {
        let Value::Object(mut fields) = body else {
            return Err(FavoritesError::MissingId);
        };

        let id = match fields.get("id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Err(FavoritesError::MissingId),
        };

        for key in RESERVED_FIELDS {
            fields.remove(*key);
        }

        Ok(Self { id, fields })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl UpsertOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpsertOutcome::Inserted => "inserted",
            UpsertOutcome::Updated => "updated",
        }
    }
}
