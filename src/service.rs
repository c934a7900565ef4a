use crate::note::{Error, Note};
use crate::store::{FetchResult, Pagination, Store};
use crate::timefmt;
use std::sync::Arc;
use uuid::Uuid;

/// Business rules for notes on top of a [`Store`].
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn Store>,
}

impl Service {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a new note. The caller may pre-assign an id; a clash
    /// with an existing note is a conflict. Stamps the created time.
    pub async fn create(&self, note: &Note) -> Result<Note, Error> {
        let mut note = note.clone();

        if note.id.is_nil() {
            note.id = Uuid::new_v4();
        } else if self.exists(note.id).await? {
            return Err(Error::Exists);
        }

        note.created_time = Some(timefmt::now());
        self.store.insert(&note).await?;
        Ok(note)
    }

    /// Update an existing note, merging only the fields the patch
    /// provides. Stamps the updated time.
    pub async fn update(&self, note: &Note) -> Result<Note, Error> {
        if note.id.is_nil() {
            return Err(Error::NilId);
        }

        let mut patch = note.clone();
        patch.updated_time = Some(timefmt::now());
        self.store.update(&patch).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Note, Error> {
        if id.is_nil() {
            return Err(Error::NilId);
        }
        self.store.get(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        if id.is_nil() {
            return Err(Error::NilId);
        }
        self.store.delete(id).await
    }

    /// Fetch one page of notes, normalizing pagination defaults first.
    pub async fn fetch(&self, pagination: &Pagination) -> Result<FetchResult, Error> {
        let mut p = pagination.clone();
        p.normalize();
        self.store.fetch(&p).await
    }

    async fn exists(&self, id: Uuid) -> Result<bool, Error> {
        match self.store.get(id).await {
            Ok(_) => Ok(true),
            Err(Error::NotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
