use crate::repositories::{parse_timestamp, parse_uuid};
use crate::Result as DbErrorResult;

use pt_core::Note;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "notes";

pub struct NoteRepository {
    pool: SqlitePool,
}

impl NoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, note: &Note) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO notes (id, user_id, problem_id, content, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(note.id.to_string())
        .bind(note.user_id.to_string())
        .bind(note.problem_id.to_string())
        .bind(&note.content)
        .bind(note.created_at.timestamp())
        .bind(note.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> DbErrorResult<Option<Note>> {
        let row = sqlx::query(
            r#"
              SELECT id, user_id, problem_id, content, created_at, updated_at
              FROM notes
              WHERE id = ? AND user_id = ?
              "#,
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    pub async fn find_by_problem(&self, problem_id: Uuid) -> DbErrorResult<Vec<Note>> {
        let rows = sqlx::query(
            r#"
              SELECT id, user_id, problem_id, content, created_at, updated_at
              FROM notes
              WHERE problem_id = ?
              ORDER BY created_at ASC
              "#,
        )
        .bind(problem_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(note_from_row).collect()
    }

    pub async fn update(&self, note: &Note) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              UPDATE notes
              SET content = ?, updated_at = ?
              WHERE id = ? AND user_id = ?
              "#,
        )
        .bind(&note.content)
        .bind(note.updated_at.timestamp())
        .bind(note.id.to_string())
        .bind(note.user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn note_from_row(row: &SqliteRow) -> DbErrorResult<Note> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let problem_id: String = row.try_get("problem_id")?;

    Ok(Note {
        id: parse_uuid(TABLE, &id)?,
        user_id: parse_uuid(TABLE, &user_id)?,
        problem_id: parse_uuid(TABLE, &problem_id)?,
        content: row.try_get("content")?,
        created_at: parse_timestamp(TABLE, row.try_get("created_at")?)?,
        updated_at: parse_timestamp(TABLE, row.try_get("updated_at")?)?,
    })
}
