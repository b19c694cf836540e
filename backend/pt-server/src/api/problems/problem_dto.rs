use pt_core::Problem;

use serde::Serialize;

/// Problem DTO for JSON serialization. Dates are RFC 3339.
#[derive(Debug, Serialize)]
pub struct ProblemDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub solved_at: String,
    pub next_review_date: String,
    pub times_solved: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Problem> for ProblemDto {
    fn from(p: Problem) -> Self {
        Self {
            id: p.id.to_string(),
            difficulty: p.difficulty.as_str().to_string(),
            title: p.title,
            description: p.description,
            solved_at: p.solved_at.to_rfc3339(),
            next_review_date: p.next_review_date.to_rfc3339(),
            times_solved: p.times_solved,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}
