pub mod create_problem_request;
pub mod problem_dto;
pub mod problem_list_response;
pub mod problem_response;
#[allow(clippy::module_inception)]
pub mod problems;
