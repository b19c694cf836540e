use crate::{Difficulty, Problem};

use chrono::{Duration, Utc};
use uuid::Uuid;

#[test]
fn test_problem_new() {
    let user_id = Uuid::new_v4();
    let review = Utc::now() + Duration::days(1);
    let problem = Problem::new(
        user_id,
        "Two Sum".to_string(),
        "Find indices adding to target".to_string(),
        Difficulty::Easy,
        review,
    );

    assert_eq!(problem.title, "Two Sum");
    assert_eq!(problem.times_solved, 0);
    assert_eq!(problem.next_review_date, review);
    assert!(problem.is_owned_by(user_id));
    assert!(!problem.is_owned_by(Uuid::new_v4()));
}

#[test]
fn test_problem_is_due() {
    let now = Utc::now();
    let mut problem = Problem::new(
        Uuid::new_v4(),
        "LRU Cache".to_string(),
        "Design an LRU cache".to_string(),
        Difficulty::Medium,
        now,
    );

    assert!(problem.is_due(now));

    problem.next_review_date = now + Duration::hours(2);
    assert!(!problem.is_due(now));
}
