use super::{paginate, FetchResult, Pagination, Store};
use crate::note::{Error, Note};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the data file kept under the store directory.
pub const DB_FILE_NAME: &str = "notes.json";

/// File-backed implementation of [`Store`].
///
/// Notes are kept in memory and mirrored to a single JSON document:
/// loaded on first use, rewritten in full after every mutation.
pub struct FileStore {
    path: PathBuf,
    state: RwLock<Option<HashMap<Uuid, Note>>>,
}

impl FileStore {
    /// Open a store rooted at `dir`. The data file is created lazily
    /// on the first mutation.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(DB_FILE_NAME),
            state: RwLock::new(None),
        }
    }
}

#[async_trait]
impl Store for FileStore {
    async fn insert(&self, note: &Note) -> Result<(), Error> {
        if note.id.is_nil() {
            return Err(Error::NilId);
        }

        let mut state = self.state.write().await;
        let notes = loaded(&mut state, &self.path)?;
        if notes.contains_key(&note.id) {
            return Err(Error::Exists);
        }
        notes.insert(note.id, note.clone());
        write_notes_file(&self.path, notes)
    }

    async fn update(&self, note: &Note) -> Result<Note, Error> {
        let mut state = self.state.write().await;
        let notes = loaded(&mut state, &self.path)?;
        let existing = notes.get_mut(&note.id).ok_or(Error::NotFound)?;
        existing.merge(note);
        let updated = existing.clone();
        write_notes_file(&self.path, notes)?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let notes = loaded(&mut state, &self.path)?;
        if notes.remove(&id).is_some() {
            write_notes_file(&self.path, notes)?;
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Note, Error> {
        let mut state = self.state.write().await;
        let notes = loaded(&mut state, &self.path)?;
        notes.get(&id).cloned().ok_or(Error::NotFound)
    }

    async fn fetch(&self, pagination: &Pagination) -> Result<FetchResult, Error> {
        let mut state = self.state.write().await;
        let notes = loaded(&mut state, &self.path)?;
        Ok(paginate(notes.values().cloned().collect(), pagination))
    }
}

/// Return the loaded note map, reading the data file on first access.
fn loaded<'a>(
    state: &'a mut Option<HashMap<Uuid, Note>>,
    path: &Path,
) -> Result<&'a mut HashMap<Uuid, Note>, Error> {
    if state.is_none() {
        *state = Some(read_notes_file(path)?);
    }
    Ok(state.get_or_insert_with(HashMap::new))
}

fn read_notes_file(path: &Path) -> Result<HashMap<Uuid, Note>, Error> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    let notes: Vec<Note> = serde_json::from_str(&content)?;
    Ok(notes.into_iter().map(|n| (n.id, n)).collect())
}

fn write_notes_file(path: &Path, notes: &HashMap<Uuid, Note>) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut all: Vec<&Note> = notes.values().collect();
    all.sort_by_key(|n| n.id);

    let json = serde_json::to_string_pretty(&all)?;
    std::fs::write(path, json)?;
    Ok(())
}
