use crate::ProblemDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProblemListResponse {
    pub problems: Vec<ProblemDto>,
}
