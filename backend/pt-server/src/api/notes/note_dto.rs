use pt_core::Note;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NoteDto {
    pub id: String,
    pub problem_id: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Note> for NoteDto {
    fn from(n: Note) -> Self {
        Self {
            id: n.id.to_string(),
            problem_id: n.problem_id.to_string(),
            content: n.content,
            created_at: n.created_at.to_rfc3339(),
            updated_at: n.updated_at.to_rfc3339(),
        }
    }
}
