//! Models that represent user accounts and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::token;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a user credential record.
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Email address used for login; unique per account.
    pub email: String,
    /// Role describing the user's privileges.
    pub role: UserRole,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    /// SHA-256 hex digest of the active remember-me token, if any.
    pub remember_token: Option<String>,
    /// Expiry of the remember-me token; required for the token to count.
    pub remember_expires: Option<DateTime<Utc>>,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp for auditing.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::Type, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Standard learner account.
    #[default]
    Student,
    /// Administrator role with elevated permissions.
    Admin,
}

impl UserRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "student" => Ok(UserRole::Student),
            "admin" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["student", "admin"],
            )),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Payload submitted when creating a new account.
pub struct RegisterRequest {
    #[validate(custom(function = crate::validation::rules::validate_name))]
    pub full_name: String,
    #[validate(custom(function = crate::validation::rules::validate_email))]
    pub email: String,
    #[validate(custom(function = crate::validation::rules::validate_password))]
    pub password: String,
    #[validate(custom(function = crate::validation::rules::validate_phone))]
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
/// Credentials submitted by a user attempting to authenticate.
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// When set, a long-lived remember-me token is issued alongside the
    /// session.
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Deserialize)]
/// Payload submitted when a user requests to change their password.
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
/// Public-facing representation of a user returned by the API.
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role.as_str().to_string(),
            phone: user.phone,
        }
    }
}

impl User {
    /// Constructs a new user with a freshly generated identifier.
    pub fn new(
        full_name: String,
        email: String,
        role: UserRole,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            full_name,
            email,
            role,
            phone,
            password_hash,
            remember_token: None,
            remember_expires: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` when the user holds the `Admin` role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// A remember-me token only counts when both the digest and a future
    /// expiry are present. Anything else is treated as no token at all.
    pub fn has_valid_remember_token(&self, now: DateTime<Utc>) -> bool {
        match (&self.remember_token, self.remember_expires) {
            (Some(digest), Some(expires)) => !digest.is_empty() && expires > now,
            _ => false,
        }
    }

    /// Compares a presented raw token against the stored digest without the
    /// timing of the comparison tracking byte position.
    pub fn remember_token_matches(&self, raw_token: &str) -> bool {
        self.remember_token
            .as_deref()
            .map(|stored| token::fixed_time_eq(stored, &token::digest(raw_token)))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::Value;

    fn test_user() -> User {
        User::new(
            "Ada Lovelace".to_string(),
            "ada@example.com".to_string(),
            UserRole::Student,
            None,
            "hash".to_string(),
        )
    }

    #[test]
    fn user_role_serde_uses_snake_case() {
        let s: UserRole = serde_json::from_str("\"student\"").unwrap();
        let a: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert!(matches!(s, UserRole::Student));
        assert!(matches!(a, UserRole::Admin));

        assert_eq!(
            serde_json::to_value(UserRole::Student).unwrap(),
            Value::String("student".into())
        );
        assert!(serde_json::from_str::<UserRole>("\"mentor\"").is_err());
    }

    #[test]
    fn user_response_omits_credential_fields() {
        let response: UserResponse = test_user().into();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["role"], "student");
        assert!(value.get("password_hash").is_none());
        assert!(value.get("remember_token").is_none());
    }

    #[test]
    fn remember_token_roundtrip_matches_issued_token() {
        let raw = token::generate();
        let mut user = test_user();
        user.remember_token = Some(token::digest(&raw));
        user.remember_expires = Some(Utc::now() + Duration::days(30));

        assert!(user.has_valid_remember_token(Utc::now()));
        assert!(user.remember_token_matches(&raw));
        assert!(!user.remember_token_matches("somebody-elses-token"));
    }

    #[test]
    fn expired_remember_token_is_treated_as_absent() {
        let raw = token::generate();
        let mut user = test_user();
        user.remember_token = Some(token::digest(&raw));
        user.remember_expires = Some(Utc::now() - Duration::hours(1));
        assert!(!user.has_valid_remember_token(Utc::now()));
    }

    #[test]
    fn remember_token_without_expiry_is_invalid() {
        let mut user = test_user();
        user.remember_token = Some(token::digest("tok"));
        user.remember_expires = None;
        assert!(!user.has_valid_remember_token(Utc::now()));
    }
}
