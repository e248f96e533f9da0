use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Each entity kind has its own sequence.
pub type RecordId = u64;

/// A registered user. Never serialized: the password is held as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub id: RecordId,
    /// Free-form label such as "Week 12".
    pub week: String,
    pub title: String,
    pub description: String,
    /// Calendar date as entered; not used for ordering.
    pub date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressImage {
    pub id: RecordId,
    pub title: String,
    /// External image URL; images are never uploaded.
    pub url: String,
    /// `None` serializes as `null`, distinct from an empty description.
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
