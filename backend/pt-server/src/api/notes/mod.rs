pub mod create_note_request;
pub mod note_dto;
pub mod note_list_response;
pub mod note_response;
#[allow(clippy::module_inception)]
pub mod notes;
pub mod update_note_request;
