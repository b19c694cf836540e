use crate::repositories::{parse_timestamp, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use pt_core::{Difficulty, Problem};

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "problems";

pub struct ProblemRepository {
    pool: SqlitePool,
}

impl ProblemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, problem: &Problem) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO problems (
                  id, user_id, title, description, difficulty,
                  solved_at, next_review_date, times_solved,
                  created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(problem.id.to_string())
        .bind(problem.user_id.to_string())
        .bind(&problem.title)
        .bind(&problem.description)
        .bind(problem.difficulty.as_str())
        .bind(problem.solved_at.timestamp())
        .bind(problem.next_review_date.timestamp())
        .bind(i64::from(problem.times_solved))
        .bind(problem.created_at.timestamp())
        .bind(problem.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up a problem only if it belongs to `user_id`
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> DbErrorResult<Option<Problem>> {
        let row = sqlx::query(
            r#"
              SELECT id, user_id, title, description, difficulty,
                     solved_at, next_review_date, times_solved,
                     created_at, updated_at
              FROM problems
              WHERE id = ? AND user_id = ?
              "#,
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(problem_from_row).transpose()
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> DbErrorResult<Vec<Problem>> {
        let rows = sqlx::query(
            r#"
              SELECT id, user_id, title, description, difficulty,
                     solved_at, next_review_date, times_solved,
                     created_at, updated_at
              FROM problems
              WHERE user_id = ?
              ORDER BY created_at ASC
              "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(problem_from_row).collect()
    }

    /// Problems whose review date is at or before `cutoff`
    pub async fn find_due(
        &self,
        user_id: Uuid,
        cutoff: DateTime<Utc>,
    ) -> DbErrorResult<Vec<Problem>> {
        let rows = sqlx::query(
            r#"
              SELECT id, user_id, title, description, difficulty,
                     solved_at, next_review_date, times_solved,
                     created_at, updated_at
              FROM problems
              WHERE user_id = ? AND next_review_date <= ?
              ORDER BY next_review_date ASC
              "#,
        )
        .bind(user_id.to_string())
        .bind(cutoff.timestamp())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(problem_from_row).collect()
    }

    /// Returns false when nothing owned by `user_id` matched
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM problems WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn problem_from_row(row: &SqliteRow) -> DbErrorResult<Problem> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let difficulty: String = row.try_get("difficulty")?;
    let times_solved: i64 = row.try_get("times_solved")?;

    Ok(Problem {
        id: parse_uuid(TABLE, &id)?,
        user_id: parse_uuid(TABLE, &user_id)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        difficulty: Difficulty::from_str(&difficulty).map_err(|e| DbError::decode(TABLE, e))?,
        solved_at: parse_timestamp(TABLE, row.try_get("solved_at")?)?,
        next_review_date: parse_timestamp(TABLE, row.try_get("next_review_date")?)?,
        times_solved: u32::try_from(times_solved).map_err(|e| DbError::decode(TABLE, e))?,
        created_at: parse_timestamp(TABLE, row.try_get("created_at")?)?,
        updated_at: parse_timestamp(TABLE, row.try_get("updated_at")?)?,
    })
}
