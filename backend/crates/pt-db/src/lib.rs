pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::{connect, migrate};
pub use error::{DbError, Result};
pub use repositories::identity_repository::IdentityRepository;
pub use repositories::note_repository::NoteRepository;
pub use repositories::oauth_state_repository::OAuthStateRepository;
pub use repositories::problem_repository::ProblemRepository;
