//! Tests for registration field rules.

use super::*;
use rstest::rstest;

#[rstest]
#[case::national("0671234567")]
#[case::country_code("380671234567")]
#[case::international("+380671234567")]
#[case::formatted("+38 (067) 123-45-67")]
fn phone_inputs_normalise_to_canonical_form(#[case] raw: &str) {
    let normalised = PhoneNumber::normalize(raw);
    assert_eq!(normalised, "+380671234567");
    assert!(PhoneNumber::new(normalised).is_ok());
}

#[rstest]
#[case::too_few("06712345")]
#[case::country_code_only("380")]
#[case::empty("")]
#[case::letters("call me")]
fn short_phone_inputs_fail_validation(#[case] raw: &str) {
    let normalised = PhoneNumber::normalize(raw);
    assert_eq!(PhoneNumber::new(normalised), Err(FieldError::PhoneInvalid));
}

#[rstest]
fn long_phone_input_is_truncated_to_nine_digits() {
    assert_eq!(PhoneNumber::normalize("+3806712345678999"), "+380671234567");
}

#[rstest]
#[case::blank("", FieldError::PhoneRequired)]
#[case::missing_prefix("0671234567", FieldError::PhoneInvalid)]
#[case::ten_digits("+3806712345678", FieldError::PhoneInvalid)]
fn phone_rejects_non_canonical_values(#[case] value: &str, #[case] expected: FieldError) {
    assert_eq!(PhoneNumber::new(value), Err(expected));
}

#[rstest]
fn phone_messages_match_form_copy() {
    assert_eq!(FieldError::PhoneRequired.to_string(), "Phone is required");
    assert_eq!(
        FieldError::PhoneInvalid.to_string(),
        "Phone must match +380XXXXXXXXX"
    );
}

#[rstest]
fn name_accepts_boundaries() {
    let shortest = "a".repeat(NAME_MIN);
    let longest = "a".repeat(NAME_MAX);
    assert_eq!(PersonName::new(shortest.clone()).map(String::from), Ok(shortest));
    assert_eq!(PersonName::new(longest.clone()).map(String::from), Ok(longest));
}

#[rstest]
#[case::empty("", FieldError::NameRequired, "Name is required")]
#[case::whitespace("   ", FieldError::NameRequired, "Name is required")]
#[case::one_char("a", FieldError::NameTooShort { min: NAME_MIN }, "Name must be at least 2 characters")]
fn name_rejects_short_values(
    #[case] value: &str,
    #[case] expected: FieldError,
    #[case] message: &str,
) {
    let error = PersonName::new(value).expect_err("invalid name");
    assert_eq!(error, expected);
    assert_eq!(error.to_string(), message);
}

#[rstest]
fn name_rejects_long_values() {
    let error = PersonName::new("a".repeat(NAME_MAX + 1)).expect_err("too long");
    assert_eq!(error.to_string(), "Name must be at most 60 characters");
}

#[rstest]
fn name_length_counts_characters_not_bytes() {
    let cyrillic = "Я".repeat(NAME_MAX);
    assert!(PersonName::new(cyrillic).is_ok());
}

#[rstest]
#[case::plain("ada@example.com")]
#[case::padded("  ada@example.com  ")]
#[case::subdomain("ada.lovelace@mail.example.co.uk")]
fn email_accepts_basic_shape(#[case] value: &str) {
    let email = EmailAddress::new(value).expect("valid email");
    assert_eq!(email.as_ref(), value.trim());
}

#[rstest]
#[case::blank("  ", FieldError::EmailRequired)]
#[case::no_at("ada.example.com", FieldError::EmailInvalid)]
#[case::no_tld("ada@example", FieldError::EmailInvalid)]
#[case::inner_space("ada lovelace@example.com", FieldError::EmailInvalid)]
#[case::double_at("ada@@example.com", FieldError::EmailInvalid)]
fn email_rejects_malformed_values(#[case] value: &str, #[case] expected: FieldError) {
    assert_eq!(EmailAddress::new(value), Err(expected));
}

#[rstest]
fn text_rules_agree_with_constructors() {
    assert!(check_name("Ada").is_ok());
    assert_eq!(check_email("nope"), Err(FieldError::EmailInvalid));
    assert_eq!(check_phone("+380"), Err(FieldError::PhoneInvalid));
}

#[rstest]
fn photo_rejections_surface_their_own_message() {
    let error = FieldError::from(PhotoRejection::NotJpeg);
    assert_eq!(error.to_string(), "The photo format must be jpeg/jpg type.");
}
