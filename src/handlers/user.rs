use bcrypt::verify;

use crate::dtos::user::{LoginRequest, LoginResponse, UserLite, UserResponse};
use crate::auth::jwt::sign_token;
use crate::error::AppError;
use crate::models::user::User;
use axum::{extract::State, Json};
use crate::state::AppState;
use crate::middleware::auth::{AuthContext, ROLE_ADMIN};
use axum::extract::Extension;

/// Kiosk-style login for an internal tool: regular staff authenticate by
/// picking their account; only ADMIN accounts require a password.
pub async fn login_user(
    State(AppState { db_pool, .. }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, role, is_active, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(payload.user_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    authorize_login(&user, payload.password.as_deref())?;

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.role, &user.name, &secret)?;

    // 8 hours = 28800 seconds
    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: 8 * 60 * 60,
    }))
}

/// Active users for the login picker and admin selectors.
pub async fn list_users(
    State(AppState { db_pool, .. }): State<AppState>,
) -> Result<Json<Vec<UserLite>>, AppError> {
    let users = sqlx::query_as::<_, UserLite>(
        "SELECT id, name, role FROM users WHERE is_active = TRUE ORDER BY name ASC",
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(users))
}

pub async fn get_me(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserResponse>, AppError> {
    let rec = sqlx::query_as::<_, User>(
        "SELECT id, name, email, role, is_active, password_hash, created_at FROM users WHERE id = $1",
    )
    .bind(auth.user_id)
    .fetch_one(&db_pool)
    .await?;

    Ok(Json(UserResponse {
        id: rec.id,
        name: rec.name,
        role: rec.role,
        is_active: rec.is_active,
        created_at: rec.created_at,
    }))
}

/// A deactivated account is indistinguishable from an unknown one; only
/// ADMIN accounts carry a password.
fn authorize_login(user: &User, password: Option<&str>) -> Result<(), AppError> {
    if !user.is_active {
        return Err(AppError::not_found("User not found"));
    }

    if user.role == ROLE_ADMIN {
        let password = password.unwrap_or("");
        if password.is_empty() {
            return Err(AppError::validation("Password required"));
        }

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::internal("Admin user has no password hash"))?;

        let ok = verify(password, hash)
            .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

        if !ok {
            return Err(AppError::unauthorized("Invalid credentials"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcrypt::hash;
    use chrono::Utc;

    fn user(role: &str, is_active: bool, password_hash: Option<String>) -> User {
        User {
            id: 1,
            name: "Manon".into(),
            email: "manon@leie-autos.be".into(),
            role: role.into(),
            is_active,
            password_hash,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn deactivated_user_is_reported_as_not_found() {
        let err = authorize_login(&user("SALES", false, None), None).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn regular_user_logs_in_without_a_password() {
        assert!(authorize_login(&user("SALES", true, None), None).is_ok());
    }

    #[test]
    fn admin_requires_a_matching_password() {
        // minimum bcrypt cost to keep the test fast
        let hashed = hash("ChangeMe123!", 4).unwrap();
        let admin = user("ADMIN", true, Some(hashed));

        assert!(matches!(
            authorize_login(&admin, None).unwrap_err(),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            authorize_login(&admin, Some("wrong")).unwrap_err(),
            AppError::Unauthorized(_)
        ));
        assert!(authorize_login(&admin, Some("ChangeMe123!")).is_ok());
    }
}
