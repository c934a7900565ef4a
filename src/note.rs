use crate::timefmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Errors shared by the note service and its stores.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("note already exists")]
    Exists,
    #[error("note not found")]
    NotFound,
    #[error("note id must not be an empty value")]
    NilId,
    #[error("store i/o failed")]
    Io(#[from] std::io::Error),
    #[error("store serialization failed")]
    Serde(#[from] serde_json::Error),
}

/// A note and its metadata.
///
/// Optional fields are omitted from JSON when unset, so the same shape
/// expresses both full notes and partial updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier. The nil UUID means "not yet assigned".
    #[serde(default, skip_serializing_if = "Uuid::is_nil")]
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// When the note was created (UTC, whole seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    /// When the note was last updated (UTC, whole seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl Note {
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = Some(favorite);
        self
    }

    /// Overwrite fields the patch provides; absent patch fields keep
    /// their current value.
    pub fn merge(&mut self, patch: &Note) {
        if patch.title.is_some() {
            self.title = patch.title.clone();
        }
        if patch.content.is_some() {
            self.content = patch.content.clone();
        }
        if patch.created_time.is_some() {
            self.created_time = patch.created_time;
        }
        if patch.updated_time.is_some() {
            self.updated_time = patch.updated_time;
        }
        if patch.is_favorite.is_some() {
            self.is_favorite = patch.is_favorite;
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID:       {}", self.id)?;
        writeln!(f, "Title:    {}", self.title.as_deref().unwrap_or(""))?;
        writeln!(f, "Content:  {}", self.content.as_deref().unwrap_or(""))?;
        writeln!(f, "Created:  {}", timefmt::format_display_opt(self.created_time))?;
        writeln!(f, "Updated:  {}", timefmt::format_display_opt(self.updated_time))?;
        write!(f, "Favorite: {}", self.is_favorite.unwrap_or(false))
    }
}
