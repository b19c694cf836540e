use pt_core::{Difficulty, Note, PasswordDigest, Problem, ProviderProfile};

use chrono::{Duration, Utc};
use uuid::Uuid;

pub fn test_digest() -> PasswordDigest {
    PasswordDigest::from_phc("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
        .expect("fixture digest is PHC formatted")
}

/// Problem due for review `days_from_now` days out (negative = overdue)
pub fn create_test_problem(user_id: Uuid, days_from_now: i64) -> Problem {
    Problem::new(
        user_id,
        "Two Sum".to_string(),
        "Find two numbers that add up to target".to_string(),
        Difficulty::Easy,
        Utc::now() + Duration::days(days_from_now),
    )
}

pub fn create_test_note(user_id: Uuid, problem_id: Uuid) -> Note {
    Note::new(user_id, problem_id, "Use a hash map of complements".to_string())
}

pub fn create_test_profile(provider_id: &str, email: &str) -> ProviderProfile {
    ProviderProfile {
        provider_id: provider_id.to_string(),
        email: email.to_string(),
        display_name: "Federated User".to_string(),
    }
}
