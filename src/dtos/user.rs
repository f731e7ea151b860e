use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub user_id: i64,
    // only required for ADMIN accounts
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in_seconds: usize,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Minimal user shape for pickers and admin views.
#[derive(Serialize, sqlx::FromRow)]
pub struct UserLite {
    pub id: i64,
    pub name: String,
    pub role: String,
}
