use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The `{success, data, message}` shape every backend endpoint answers
/// with; `data` is `null` on acknowledgements and errors.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub user: UserResponse,
    pub csrf_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeData {
    pub user: UserResponse,
    pub authenticated_via: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CsrfData {
    pub csrf_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadData {
    pub file_name: String,
    pub size: u64,
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("{0}")]
    Server(String),
    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_with_data_deserializes() {
        let body = r#"{"success":true,"data":{"user":{"id":"u1","full_name":"Ada","email":"ada@example.com","role":"student"},"csrf_token":"tok"},"message":"Logged in"}"#;
        let envelope: ApiEnvelope<LoginData> = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.user.id, "u1");
        assert_eq!(data.csrf_token, "tok");
    }

    #[test]
    fn envelope_with_null_data_deserializes() {
        let body = r#"{"success":false,"data":null,"message":"Invalid CSRF token"}"#;
        let envelope: ApiEnvelope<UploadData> = serde_json::from_str(body).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message, "Invalid CSRF token");
    }
}
