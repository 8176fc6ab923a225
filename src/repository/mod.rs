mod embedded;
#[cfg(test)]
pub mod memory;
mod postgres;

pub use postgres::PgNoteStore;

use async_trait::async_trait;

use crate::models::{NewNote, Note, NotePatch};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no note matches the given id and owner")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[cfg(test)]
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("migration error: {0}")]
    Migration(#[from] refinery::Error),
}

/// Persistence for notes. Every operation is filtered by the owning user.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Notes owned by `user_id`, newest first.
    async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, StoreError>;

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no note matches `(id, user_id)`.
    async fn update_note(
        &self,
        id: i64,
        user_id: i64,
        patch: NotePatch,
    ) -> Result<Note, StoreError>;

    /// Fails with [`StoreError::NotFound`] when no note matches `(id, user_id)`.
    async fn delete_note(&self, id: i64, user_id: i64) -> Result<(), StoreError>;
}
