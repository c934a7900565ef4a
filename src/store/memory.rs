use super::{paginate, FetchResult, Pagination, Store};
use crate::note::{Error, Note};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory implementation of [`Store`]. Safe for concurrent use.
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<Uuid, Note>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert(&self, note: &Note) -> Result<(), Error> {
        if note.id.is_nil() {
            return Err(Error::NilId);
        }

        let mut data = self.data.write().await;
        if data.contains_key(&note.id) {
            return Err(Error::Exists);
        }
        data.insert(note.id, note.clone());
        Ok(())
    }

    async fn update(&self, note: &Note) -> Result<Note, Error> {
        let mut data = self.data.write().await;
        let existing = data.get_mut(&note.id).ok_or(Error::NotFound)?;
        existing.merge(note);
        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.data.write().await.remove(&id);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Note, Error> {
        self.data
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn fetch(&self, pagination: &Pagination) -> Result<FetchResult, Error> {
        let notes: Vec<Note> = self.data.read().await.values().cloned().collect();
        Ok(paginate(notes, pagination))
    }
}
