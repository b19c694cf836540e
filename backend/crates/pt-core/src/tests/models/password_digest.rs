use crate::{CoreError, PasswordDigest};

const SAMPLE_PHC: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$R6KYRe4pCm6GWpoX0nhDOKQ0cBYDh1qdWz2Xb9GVxfs";

#[test]
fn given_phc_string_when_wrapped_then_value_is_kept() {
    let digest = PasswordDigest::from_phc(SAMPLE_PHC).unwrap();

    assert_eq!(digest.as_str(), SAMPLE_PHC);
}

#[test]
fn given_plaintext_when_wrapped_then_rejected() {
    let result = PasswordDigest::from_phc("hunter22");

    assert!(matches!(
        result,
        Err(CoreError::InvalidPasswordDigest { .. })
    ));
}

#[test]
fn given_bare_prefix_when_wrapped_then_rejected() {
    assert!(PasswordDigest::from_phc("$argon2").is_err());
}

#[test]
fn given_digest_when_debug_formatted_then_hash_is_redacted() {
    let digest = PasswordDigest::from_phc(SAMPLE_PHC).unwrap();

    let rendered = format!("{:?}", digest);

    assert!(!rendered.contains("argon2id"));
    assert!(rendered.contains("redacted"));
}
