//! Field validation mirrored from the backend rules so inline feedback
//! matches what the server will enforce.

const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

pub fn validate_email(value: &str) -> Result<(), String> {
    let shape_ok = !value.chars().any(char::is_whitespace) && {
        let mut parts = value.splitn(2, '@');
        let local = parts.next().unwrap_or_default();
        match parts.next() {
            Some(domain) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        }
    };
    if shape_ok {
        Ok(())
    } else {
        Err("Enter a valid email address".to_string())
    }
}

pub fn validate_password(value: &str) -> Result<(), String> {
    if value.chars().count() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if !value.chars().any(|c| c.is_ascii_alphabetic())
        || !value.chars().any(|c| c.is_ascii_digit())
    {
        return Err("Password needs at least one letter and one digit".to_string());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
    {
        return Err(format!("Only letters, digits, and {PASSWORD_SYMBOLS} are allowed"));
    }
    Ok(())
}

pub fn validate_name(value: &str) -> Result<(), String> {
    let length = value.chars().count();
    if !(2..=50).contains(&length) {
        return Err("Name must be 2-50 characters".to_string());
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err("Name may only contain letters and spaces".to_string());
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), String> {
    if value.chars().count() < 10 {
        return Err("Phone number must be at least 10 characters".to_string());
    }
    let rest = value.strip_prefix('+').unwrap_or(value);
    if !rest
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return Err("Enter a valid phone number".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_mirror_matches_server_rules() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email("stu dent@example.com").is_err());
        assert!(validate_email("student.example.com").is_err());
        assert!(validate_email("student@nodot").is_err());
    }

    #[test]
    fn password_mirror_matches_server_rules() {
        assert!(validate_password("abc12345").is_ok());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("abcdefgh").is_err());
        assert!(validate_password("a1").is_err());
        assert!(validate_password("abc12345^").is_err());
    }

    #[test]
    fn name_mirror_matches_server_rules() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name("Ada42").is_err());
    }

    #[test]
    fn phone_mirror_matches_server_rules() {
        assert!(validate_phone("+1 (555) 867-5309").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
    }
}
