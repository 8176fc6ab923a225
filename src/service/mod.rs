use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::{NewNote, NotePatch},
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum NoteServiceError {
    #[error("title and content are required")]
    MissingFields,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

/// Empty strings count as "not provided".
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl NoteService {
    pub const fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub async fn list_notes(&self, user_id: i64) -> Result<Vec<NoteResponse>, StoreError> {
        self.store
            .list_notes(user_id)
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }

    pub async fn create_note(
        &self,
        user_id: i64,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, NoteServiceError> {
        let (Some(title), Some(content)) = (provided(request.title), provided(request.content))
        else {
            return Err(NoteServiceError::MissingFields);
        };

        let note = self
            .store
            .create_note(NewNote {
                title,
                content,
                user_id,
            })
            .await?;

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        user_id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, StoreError> {
        let patch = NotePatch {
            title: provided(request.title),
            content: provided(request.content),
        };

        self.store
            .update_note(id, user_id, patch)
            .await
            .map(NoteResponse::from)
    }

    pub async fn delete_note(&self, id: i64, user_id: i64) -> Result<(), StoreError> {
        self.store.delete_note(id, user_id).await
    }
}
