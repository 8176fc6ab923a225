use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use super::{NoteStore, StoreError, embedded::migrations};
use crate::models::{NewNote, Note, NotePatch};

pub struct PgNoteStore {
    client: Client,
}

impl PgNoteStore {
    pub async fn new(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn list_notes(&self, user_id: i64) -> Result<Vec<Note>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, user_id, created_at, updated_at FROM notes \
                 WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
                &[&user_id],
            )
            .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO notes (title, content, user_id) VALUES ($1, $2, $3) \
                 RETURNING id, title, content, user_id, created_at, updated_at",
                &[&note.title, &note.content, &note.user_id],
            )
            .await?;

        Ok(note_from_row(&row))
    }

    async fn update_note(
        &self,
        id: i64,
        user_id: i64,
        patch: NotePatch,
    ) -> Result<Note, StoreError> {
        let row = self
            .client
            .query_opt(
                "UPDATE notes SET title = COALESCE($1, title), \
                 content = COALESCE($2, content), updated_at = now() \
                 WHERE id = $3 AND user_id = $4 \
                 RETURNING id, title, content, user_id, created_at, updated_at",
                &[&patch.title, &patch.content, &id, &user_id],
            )
            .await?;

        row.as_ref().map(note_from_row).ok_or(StoreError::NotFound)
    }

    async fn delete_note(&self, id: i64, user_id: i64) -> Result<(), StoreError> {
        let rows = self
            .client
            .execute(
                "DELETE FROM notes WHERE id = $1 AND user_id = $2",
                &[&id, &user_id],
            )
            .await?;

        if rows == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
