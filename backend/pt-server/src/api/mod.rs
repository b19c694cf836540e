pub mod auth;
pub mod error;
pub mod extractors;
pub mod message_response;
pub mod middleware;
pub mod notes;
pub mod problems;
pub mod validation;
