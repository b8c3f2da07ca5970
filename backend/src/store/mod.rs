//! Note storage.
//!
//! The router only sees [`NoteStore`]; which implementation sits behind it
//! decides the deployment variant.

mod memory;
mod postgres;

pub(crate) use memory::IdMap;
pub use memory::MemoryNoteStore;
pub use postgres::PgNoteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("malformatted id")]
    MalformattedId,
    #[error("{0}")]
    Validation(String),
    #[error("operation not supported by this store: {0}")]
    Unsupported(&'static str),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A note that has passed request-level checks but has no id yet.
#[derive(Clone, Debug)]
pub struct NewNote {
    pub content: String,
    pub important: bool,
}

/// Replacement values for an existing note.
#[derive(Clone, Debug)]
pub struct NoteChanges {
    pub content: String,
    pub important: bool,
}

#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    async fn list(&self) -> Result<Vec<common::Note>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<common::Note>, StoreError>;

    async fn create(&self, note: NewNote) -> Result<common::Note, StoreError>;

    /// Returns `Ok(None)` when no note has the given id.
    async fn update(
        &self,
        _id: &str,
        _changes: NoteChanges,
    ) -> Result<Option<common::Note>, StoreError> {
        Err(StoreError::Unsupported("update"))
    }

    /// Deleting an id that does not exist is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    fn supports_update(&self) -> bool {
        false
    }
}
