use crate::{Identity, NewIdentity, PasswordDigest, ProviderProfile, normalize_email};

const SAMPLE_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$R6KYRe4pCm6GWpoX0nhDOKQ0cBYDh1qdWz2Xb9GVxfs";

fn profile() -> ProviderProfile {
    ProviderProfile {
        provider_id: "google-1234".to_string(),
        email: "Ada@Example.com".to_string(),
        display_name: "Ada Lovelace".to_string(),
    }
}

#[test]
fn test_normalize_email_trims_and_lowercases() {
    assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
}

#[test]
fn test_local_identity_has_digest_and_no_provider() {
    let digest = PasswordDigest::from_phc(SAMPLE_PHC).unwrap();
    let identity = Identity::from_new(NewIdentity::local(
        "Ada@Example.com",
        "Ada".to_string(),
        digest,
    ));

    assert_eq!(identity.email, "ada@example.com");
    assert!(identity.is_local());
    assert!(!identity.is_federated());
    assert!(identity.tokens.is_none());
    assert_eq!(identity.created_at, identity.updated_at);
}

#[test]
fn test_federated_identity_has_provider_and_no_digest() {
    let identity = Identity::from_new(NewIdentity::federated(&profile()));

    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.name, "Ada Lovelace");
    assert_eq!(identity.provider_id.as_deref(), Some("google-1234"));
    assert!(identity.password_digest.is_none());
    assert!(identity.is_federated());
    assert!(!identity.is_local());
}

#[test]
fn test_record_tokens_overwrites_snapshot() {
    let mut identity = Identity::from_new(NewIdentity::federated(&profile()));

    identity.record_tokens("a1".to_string(), "r1".to_string());
    identity.record_tokens("a2".to_string(), "r2".to_string());

    let snapshot = identity.tokens.unwrap();
    assert_eq!(snapshot.access_token, "a2");
    assert_eq!(snapshot.refresh_token, "r2");
}

#[test]
fn test_each_new_identity_gets_distinct_id() {
    let first = Identity::from_new(NewIdentity::federated(&profile()));
    let second = Identity::from_new(NewIdentity::federated(&profile()));

    assert_ne!(first.id, second.id);
}
