//! Auth DTOs

use serde::{Deserialize, Serialize};

/// Login request body for `POST /user/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data (inside the envelope).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Persisted user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl From<&LoginResponse> for UserProfile {
    fn from(res: &LoginResponse) -> Self {
        Self {
            user_name: res.user_name.clone(),
            email: res.email.clone(),
            role: res.role.clone(),
        }
    }
}
