use super::support::{ACCESS_SECRET, REFRESH_SECRET, test_issuer};
use crate::{ACCESS_TOKEN_TTL_SECS, AuthError, Claims, REFRESH_TOKEN_TTL_SECS, TokenIssuer};

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

const NOW: i64 = 1_767_225_600; // 2026-01-01T00:00:00Z

fn create_test_token(claims: &Claims, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

#[test]
fn given_issued_pair_when_verified_then_both_resolve_to_same_identity() {
    let issuer = test_issuer();
    let identity_id = Uuid::new_v4();

    let pair = issuer.issue_at(identity_id, NOW).unwrap();

    assert_eq!(issuer.verify_access_at(&pair.access_token, NOW).unwrap(), identity_id);
    assert_eq!(issuer.verify_refresh_at(&pair.refresh_token, NOW).unwrap(), identity_id);
    assert!(!pair.access_token.is_empty());
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[test]
fn given_same_identity_when_issued_twice_in_same_second_then_tokens_differ() {
    let issuer = test_issuer();
    let identity_id = Uuid::new_v4();

    let first = issuer.issue_at(identity_id, NOW).unwrap();
    let second = issuer.issue_at(identity_id, NOW).unwrap();

    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.refresh_token, second.refresh_token);
}

#[test]
fn given_access_token_when_verified_exactly_at_expiry_then_still_valid() {
    let issuer = test_issuer();
    let identity_id = Uuid::new_v4();
    let pair = issuer.issue_at(identity_id, NOW).unwrap();

    let result = issuer.verify_access_at(&pair.access_token, NOW + ACCESS_TOKEN_TTL_SECS);

    assert_eq!(result.unwrap(), identity_id);
}

#[test]
fn given_access_token_when_verified_one_second_past_expiry_then_token_expired() {
    let issuer = test_issuer();
    let pair = issuer.issue_at(Uuid::new_v4(), NOW).unwrap();

    let result = issuer.verify_access_at(&pair.access_token, NOW + ACCESS_TOKEN_TTL_SECS + 1);

    assert!(matches!(result, Err(AuthError::TokenExpired { .. })));
}

#[test]
fn given_refresh_token_when_access_has_expired_then_refresh_still_valid_until_seven_days() {
    let issuer = test_issuer();
    let identity_id = Uuid::new_v4();
    let pair = issuer.issue_at(identity_id, NOW).unwrap();
    let later = NOW + ACCESS_TOKEN_TTL_SECS + 60;

    assert!(issuer.verify_access_at(&pair.access_token, later).is_err());
    assert_eq!(
        issuer.verify_refresh_at(&pair.refresh_token, later).unwrap(),
        identity_id
    );
    assert!(matches!(
        issuer.verify_refresh_at(&pair.refresh_token, NOW + REFRESH_TOKEN_TTL_SECS + 1),
        Err(AuthError::TokenExpired { .. })
    ));
}

#[test]
fn given_refresh_token_when_verified_as_access_then_invalid_token() {
    let issuer = test_issuer();
    let pair = issuer.issue_at(Uuid::new_v4(), NOW).unwrap();

    let as_access = issuer.verify_access_at(&pair.refresh_token, NOW);
    let as_refresh = issuer.verify_refresh_at(&pair.access_token, NOW);

    assert!(matches!(as_access, Err(AuthError::InvalidToken { .. })));
    assert!(matches!(as_refresh, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_wrong_secret_when_verified_then_invalid_token() {
    let issuer = test_issuer();
    let claims = Claims::new(Uuid::new_v4(), NOW, ACCESS_TOKEN_TTL_SECS);
    let token = create_test_token(&claims, b"wrong-secret-key-at-least-32-bytes!!");

    let result = issuer.verify_access_at(&token, NOW);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_tampered_token_when_verified_then_invalid_token() {
    let issuer = test_issuer();
    let pair = issuer.issue_at(Uuid::new_v4(), NOW).unwrap();
    let mut tampered = pair.access_token.clone();
    tampered.push('x');

    let result = issuer.verify_access_at(&tampered, NOW);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_garbage_when_verified_then_invalid_token() {
    let issuer = test_issuer();

    let result = issuer.verify_access_at("not-a-jwt", NOW);

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_non_uuid_subject_when_verified_then_invalid_claim() {
    let issuer = TokenIssuer::new(ACCESS_SECRET, REFRESH_SECRET);
    let claims = Claims {
        sub: "user-123".to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: NOW,
        exp: NOW + ACCESS_TOKEN_TTL_SECS,
    };
    let token = create_test_token(&claims, ACCESS_SECRET);

    let result = issuer.verify_access_at(&token, NOW);

    assert!(matches!(result, Err(AuthError::InvalidClaim { claim, .. }) if claim == "sub"));
}

#[test]
fn given_empty_subject_when_validated_then_invalid_claim() {
    let claims = Claims {
        sub: String::new(),
        jti: Uuid::new_v4().to_string(),
        iat: NOW,
        exp: NOW + 60,
    };

    assert!(matches!(
        claims.validate(),
        Err(AuthError::InvalidClaim { claim, .. }) if claim == "sub"
    ));
}
