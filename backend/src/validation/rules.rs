//! Field validation rules shared across request payloads. The client
//! mirrors each rule so inline feedback and server enforcement agree.

use validator::ValidationError;

const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

/// Validates email shape.
///
/// Requirements:
/// - No whitespace anywhere
/// - Exactly one `@` with a non-empty local part
/// - Domain containing an interior dot
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("email_contains_whitespace"));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = match parts.next() {
        Some(domain) => domain,
        None => return Err(ValidationError::new("email_missing_at")),
    };

    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::new("email_invalid_shape"));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::new("email_invalid_domain"));
    }

    Ok(())
}

/// Validates password strength.
///
/// Requirements:
/// - At least 8 characters
/// - At least one letter and one digit
/// - Restricted to letters, digits, and `@$!%*#?&`
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < 8 {
        return Err(ValidationError::new("password_too_short"));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::new("password_needs_letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("password_needs_digit"));
    }
    if !password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
    {
        return Err(ValidationError::new("password_invalid_characters"));
    }

    Ok(())
}

/// Validates a display name: letters and spaces, 2-50 characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let length = name.chars().count();
    if !(2..=50).contains(&length) {
        return Err(ValidationError::new("name_invalid_length"));
    }
    if !name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::new("name_invalid_characters"));
    }

    Ok(())
}

/// Validates a phone number: optional leading `+`, then digits, spaces,
/// hyphens, and parentheses; at least 10 characters in total.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.chars().count() < 10 {
        return Err(ValidationError::new("phone_too_short"));
    }
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return Err(ValidationError::new("phone_invalid_characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_standard_shape() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.co").is_ok());
    }

    #[test]
    fn email_rejects_whitespace() {
        assert!(validate_email("stu dent@example.com").is_err());
        assert!(validate_email(" student@example.com").is_err());
        assert!(validate_email("student@example.com ").is_err());
    }

    #[test]
    fn email_rejects_missing_at() {
        assert!(validate_email("student.example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn email_rejects_bad_domains() {
        assert!(validate_email("student@").is_err());
        assert!(validate_email("student@nodot").is_err());
        assert!(validate_email("student@.com").is_err());
        assert!(validate_email("student@com.").is_err());
        assert!(validate_email("@example.com").is_err());
    }

    #[test]
    fn password_accepts_letter_and_digit_mix() {
        assert!(validate_password("abc12345").is_ok());
        assert!(validate_password("p4ssw0rd!").is_ok());
    }

    #[test]
    fn password_rejects_short_values() {
        assert!(validate_password("a1b2c3d").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn password_rejects_missing_letter_or_digit() {
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("abcdefgh").is_err());
        assert!(validate_password("@$!%*#?&").is_err());
    }

    #[test]
    fn password_rejects_characters_outside_allowed_set() {
        assert!(validate_password("abc 1234").is_err());
        assert!(validate_password("abc12345^").is_err());
    }

    #[test]
    fn name_enforces_length_and_alphabet() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("Jo").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name(&"a".repeat(51)).is_err());
        assert!(validate_name("Ada42").is_err());
        assert!(validate_name("Ada_Lovelace").is_err());
    }

    #[test]
    fn phone_accepts_common_formats() {
        assert!(validate_phone("+1 (555) 867-5309").is_ok());
        assert!(validate_phone("0123456789").is_ok());
        assert!(validate_phone("555 867 5309").is_ok());
    }

    #[test]
    fn phone_rejects_short_or_alphabetic_values() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
        assert!(validate_phone("5558675309x").is_err());
    }
}
