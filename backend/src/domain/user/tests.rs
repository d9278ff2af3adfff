//! Regression coverage for this module.

use rstest::rstest;
use serde_json::json;

use super::*;

#[test]
fn user_id_round_trips_through_display() {
    let id = UserId::random();
    let reparsed = UserId::parse(id.to_string()).expect("display form parses");
    assert_eq!(id, reparsed);
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
fn user_id_rejects_malformed_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::parse(raw), Err(expected));
}

#[rstest]
#[case("ada")]
#[case("ada.lovelace")]
#[case("ada_lovelace-1815")]
fn username_accepts_reasonable_names(#[case] raw: &str) {
    assert!(Username::new(raw).is_ok());
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
#[case("ada lovelace", UserValidationError::UsernameInvalidCharacters)]
#[case("ada!", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[test]
fn username_rejects_overlong_input() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
#[case("ada@example.com", true)]
#[case("a@b", true)]
#[case("missing-at-sign", false)]
#[case("@example.com", false)]
#[case("ada@", false)]
#[case("ada@x@y", false)]
fn email_validation(#[case] raw: &str, #[case] ok: bool) {
    assert_eq!(Email::new(raw).is_ok(), ok);
}

#[test]
fn serialized_user_omits_the_credential() {
    let user = User::new(
        UserId::random(),
        Username::new("ada").expect("valid username"),
        Email::new("ada@example.com").expect("valid email"),
        CredentialHash::new("salt$digest"),
    );
    let value = serde_json::to_value(&user).expect("user serializes");
    assert_eq!(value.get("username"), Some(&json!("ada")));
    assert!(value.get("credential").is_none());
}
