use crate::note::{Error, Note};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Sort orders supported by fetch pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Id,
    Title,
    CreatedDate,
}

/// Pagination settings for fetching notes. Zero values take defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Page size; 0 takes the default of 25.
    #[serde(default)]
    pub size: u64,
    /// 1-based page number; 0 takes the default of 1.
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub sort_by: SortBy,
    /// Sort direction; defaults to ascending.
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            size: 0,
            page: 0,
            sort_by: SortBy::default(),
            ascending: true,
        }
    }
}

impl Pagination {
    pub const DEFAULT_SIZE: u64 = 25;

    /// Replace zero values with their defaults.
    pub fn normalize(&mut self) {
        if self.size == 0 {
            self.size = Self::DEFAULT_SIZE;
        }
        if self.page == 0 {
            self.page = 1;
        }
    }
}

/// One page of fetch results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    pub notes: Vec<Note>,
    pub total_count: u64,
    pub total_pages: u64,
}

/// Storage abstraction for notes. Drivers must be safe for
/// concurrent use.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new note. `Exists` when the id is taken, `NilId` when unset.
    async fn insert(&self, note: &Note) -> Result<(), Error>;

    /// Merge `note` into the stored entry and return the updated copy.
    /// `NotFound` when no entry has the note's id.
    async fn update(&self, note: &Note) -> Result<Note, Error>;

    /// Remove a note. Deleting an absent id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), Error>;

    /// Get a note by id. `NotFound` when absent.
    async fn get(&self, id: Uuid) -> Result<Note, Error>;

    /// Fetch one page of notes under the pagination settings.
    async fn fetch(&self, pagination: &Pagination) -> Result<FetchResult, Error>;
}

/// Sort and slice the full note set into one fetch page.
pub(crate) fn paginate(mut notes: Vec<Note>, pagination: &Pagination) -> FetchResult {
    let mut p = pagination.clone();
    p.normalize();

    match p.sort_by {
        SortBy::Id => notes.sort_by_key(|n| n.id),
        SortBy::Title => notes.sort_by(|a, b| a.title.cmp(&b.title)),
        SortBy::CreatedDate => notes.sort_by(|a, b| a.created_time.cmp(&b.created_time)),
    }
    if !p.ascending {
        notes.reverse();
    }

    let total_count = notes.len() as u64;
    let total_pages = total_count.div_ceil(p.size);
    let start = (p.page - 1).saturating_mul(p.size);
    let notes = notes
        .into_iter()
        .skip(start as usize)
        .take(p.size as usize)
        .collect();

    FetchResult {
        notes,
        total_count,
        total_pages,
    }
}
