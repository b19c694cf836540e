//! Problem entity - a solved exercise scheduled for review.

use crate::Difficulty;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    /// Owning identity
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub solved_at: DateTime<Utc>,
    /// Supplied by the client; the review schedule is computed elsewhere
    pub next_review_date: DateTime<Utc>,
    pub times_solved: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    pub fn new(
        user_id: Uuid,
        title: String,
        description: String,
        difficulty: Difficulty,
        next_review_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            difficulty,
            solved_at: now,
            next_review_date,
            times_solved: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Due for review at or before `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}
