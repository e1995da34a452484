//! Tests for the user record model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const VALID_IDENTITY: &str = "482731904567";

#[fixture]
fn valid_id() -> UserId {
    UserId::parse(VALID_ID).expect("valid fixture id")
}

#[rstest]
fn user_id_round_trips_canonical_form(valid_id: UserId) {
    assert_eq!(valid_id.to_string(), VALID_ID);
    assert_eq!(valid_id.to_string().len(), 36);
}

#[rstest]
fn user_id_rejects_empty_input() {
    assert!(matches!(
        UserId::parse(""),
        Err(UserValidationError::EmptyId)
    ));
}

#[rstest]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6 ")]
fn user_id_rejects_malformed_input(#[case] raw: &str) {
    assert!(matches!(
        UserId::parse(raw),
        Err(UserValidationError::InvalidId)
    ));
}

#[rstest]
fn random_ids_are_distinct() {
    assert_ne!(UserId::random(), UserId::random());
}

#[rstest]
#[case("   ")]
#[case("")]
fn name_rejects_blank_input(#[case] raw: &str) {
    assert!(matches!(
        PersonName::new(raw),
        Err(UserValidationError::EmptyName)
    ));
}

#[rstest]
fn name_rejects_overlong_input() {
    let raw = "a".repeat(NAME_MAX + 1);
    assert!(matches!(
        PersonName::new(raw),
        Err(UserValidationError::NameTooLong { max }) if max == NAME_MAX
    ));
}

#[rstest]
fn name_accepts_maximum_length() {
    let raw = "a".repeat(NAME_MAX);
    let name = PersonName::new(raw.clone()).expect("name at boundary");
    assert_eq!(name.as_ref(), raw);
}

#[rstest]
#[case("")]
#[case("  ")]
fn identity_number_rejects_blank_input(#[case] raw: &str) {
    assert!(matches!(
        IdentityNumber::new(raw),
        Err(UserValidationError::EmptyIdentityNumber)
    ));
}

#[rstest]
fn identity_number_rejects_overlong_input() {
    let raw = "9".repeat(IDENTITY_NUMBER_MAX + 1);
    assert!(matches!(
        IdentityNumber::new(raw),
        Err(UserValidationError::IdentityNumberTooLong { max }) if max == IDENTITY_NUMBER_MAX
    ));
}

#[rstest]
fn try_from_strings_accepts_valid_inputs(valid_id: UserId) {
    let user = User::try_from_strings(VALID_ID, "Ada Lovelace", VALID_IDENTITY)
        .expect("valid inputs");
    assert_eq!(user.id(), &valid_id);
    assert_eq!(user.name().as_ref(), "Ada Lovelace");
    assert_eq!(user.identity_number().as_ref(), VALID_IDENTITY);
}

#[rstest]
fn serialises_to_camel_case() {
    let user = User::try_from_strings(VALID_ID, "Ada Lovelace", VALID_IDENTITY)
        .expect("valid inputs");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({
            "id": VALID_ID,
            "name": "Ada Lovelace",
            "identityNumber": VALID_IDENTITY,
        })
    );
}

#[rstest]
fn deserialisation_enforces_invariants() {
    let raw = json!({
        "id": VALID_ID,
        "name": "   ",
        "identityNumber": VALID_IDENTITY,
    });
    let result: Result<User, _> = serde_json::from_value(raw);
    assert!(result.is_err());
}
