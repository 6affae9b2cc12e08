use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

impl SameSite {
    /// Parses the config-file spelling of a SameSite policy.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "lax" => Some(SameSite::Lax),
            "strict" => Some(SameSite::Strict),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub secure: bool,
    pub same_site: SameSite,
}

pub const SESSION_COOKIE_NAME: &str = "session_id";
pub const REMEMBER_COOKIE_NAME: &str = "remember_token";
pub const SESSION_COOKIE_PATH: &str = "/";
pub const REMEMBER_COOKIE_PATH: &str = "/";

pub fn build_cookie(
    name: &str,
    value: &str,
    max_age: Duration,
    path: &str,
    options: CookieOptions,
) -> String {
    let mut cookie = format!(
        "{}={}; Path={}; Max-Age={}; HttpOnly; SameSite={}",
        name,
        value,
        path,
        max_age.as_secs(),
        same_site_value(options.same_site)
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn build_clear_cookie(name: &str, path: &str, options: CookieOptions) -> String {
    let mut cookie = format!(
        "{}=; Path={}; Max-Age=0; HttpOnly; SameSite={}",
        name,
        path,
        same_site_value(options.same_site)
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn extract_cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

fn same_site_value(same_site: SameSite) -> &'static str {
    match same_site {
        SameSite::Lax => "Lax",
        SameSite::Strict => "Strict",
        SameSite::None => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_cookie_includes_security_attributes() {
        let opts = CookieOptions {
            secure: true,
            same_site: SameSite::Lax,
        };
        let cookie = build_cookie(
            SESSION_COOKIE_NAME,
            "abc",
            Duration::from_secs(3600),
            SESSION_COOKIE_PATH,
            opts,
        );
        assert!(cookie.contains("session_id=abc"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn build_cookie_omits_secure_when_not_configured() {
        let opts = CookieOptions {
            secure: false,
            same_site: SameSite::Strict,
        };
        let cookie = build_cookie(
            REMEMBER_COOKIE_NAME,
            "tok",
            Duration::from_secs(60),
            REMEMBER_COOKIE_PATH,
            opts,
        );
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn build_clear_cookie_sets_max_age_zero() {
        let opts = CookieOptions {
            secure: false,
            same_site: SameSite::Strict,
        };
        let cookie = build_clear_cookie(REMEMBER_COOKIE_NAME, REMEMBER_COOKIE_PATH, opts);
        assert!(cookie.contains("remember_token="));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[test]
    fn extract_cookie_value_finds_matching_name() {
        let header = "a=1; session_id=sess-value; b=2";
        assert_eq!(
            extract_cookie_value(header, SESSION_COOKIE_NAME).as_deref(),
            Some("sess-value")
        );
        assert!(extract_cookie_value(header, "missing").is_none());
    }

    #[test]
    fn same_site_from_name_accepts_known_values() {
        assert!(matches!(SameSite::from_name("lax"), Some(SameSite::Lax)));
        assert!(matches!(
            SameSite::from_name("Strict"),
            Some(SameSite::Strict)
        ));
        assert!(matches!(SameSite::from_name("NONE"), Some(SameSite::None)));
        assert!(SameSite::from_name("other").is_none());
    }
}
