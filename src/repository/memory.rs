//! In-memory [`NoteStore`] for tests.
//!
//! Ids grow monotonically across users and every new note gets a
//! `created_at` strictly later than the previous one. The store counts
//! calls and can be switched into a failing mode to exercise error paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use super::{NoteStore, StoreError};
use crate::models::{NewNote, Note, NotePatch};

#[derive(Default)]
struct Inner {
    next_id: i64,
    last_created: Option<DateTime<Utc>>,
    notes: Vec<Note>,
}

#[derive(Default)]
pub struct MemoryNoteStore {
    inner: RwLock<Inner>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent operation fail with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn get(&self, id: i64) -> Option<Note> {
        self.inner
            .read()
            .await
            .notes
            .iter()
            .find(|note| note.id == id)
            .cloned()
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, StoreError> {
        self.enter()?;
        let inner = self.inner.read().await;

        let mut notes: Vec<Note> = inner
            .notes
            .iter()
            .filter(|note| note.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(notes)
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        self.enter()?;
        let mut inner = self.inner.write().await;

        let mut now = Utc::now();
        if let Some(last) = inner.last_created {
            if now <= last {
                now = last + TimeDelta::milliseconds(1);
            }
        }
        inner.last_created = Some(now);
        inner.next_id += 1;

        let stored = Note {
            id: inner.next_id,
            title: note.title,
            content: note.content,
            user_id: note.user_id,
            created_at: now,
            updated_at: now,
        };
        inner.notes.push(stored.clone());

        Ok(stored)
    }

    async fn update_note(
        &self,
        id: i64,
        user_id: i64,
        patch: NotePatch,
    ) -> Result<Note, StoreError> {
        self.enter()?;
        let mut inner = self.inner.write().await;

        let note = inner
            .notes
            .iter_mut()
            .find(|note| note.id == id && note.user_id == user_id)
            .ok_or(StoreError::NotFound)?;

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        note.updated_at = Utc::now().max(note.created_at);

        Ok(note.clone())
    }

    async fn delete_note(&self, id: i64, user_id: i64) -> Result<(), StoreError> {
        self.enter()?;
        let mut inner = self.inner.write().await;

        let position = inner
            .notes
            .iter()
            .position(|note| note.id == id && note.user_id == user_id)
            .ok_or(StoreError::NotFound)?;
        inner.notes.remove(position);

        Ok(())
    }
}
