use crate::NoteDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<NoteDto>,
}
