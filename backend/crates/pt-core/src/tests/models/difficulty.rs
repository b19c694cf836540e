use crate::Difficulty;

use std::str::FromStr;

#[test]
fn test_difficulty_as_str() {
    assert_eq!(Difficulty::Easy.as_str(), "easy");
    assert_eq!(Difficulty::Medium.as_str(), "medium");
    assert_eq!(Difficulty::Hard.as_str(), "hard");
}

#[test]
fn test_difficulty_from_str() {
    assert_eq!(Difficulty::from_str("easy").unwrap(), Difficulty::Easy);
    assert_eq!(Difficulty::from_str("hard").unwrap(), Difficulty::Hard);
    assert!(Difficulty::from_str("Impossible").is_err());
}

#[test]
fn test_difficulty_from_str_ignores_case() {
    assert_eq!(Difficulty::from_str("Easy").unwrap(), Difficulty::Easy);
    assert_eq!(Difficulty::from_str("MEDIUM").unwrap(), Difficulty::Medium);
    assert_eq!(Difficulty::from_str(" Hard ").unwrap(), Difficulty::Hard);
}

#[test]
fn test_difficulty_round_trips_through_storage_form() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        assert_eq!(Difficulty::from_str(difficulty.as_str()).unwrap(), difficulty);
    }
}
