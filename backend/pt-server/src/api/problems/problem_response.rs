use crate::ProblemDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub problem: ProblemDto,
}
