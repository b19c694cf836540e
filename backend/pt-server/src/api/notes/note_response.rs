use crate::NoteDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub note: NoteDto,
}
