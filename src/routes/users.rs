use axum::{Router, routing::{post, get}, middleware};
use crate::state::AppState;
use crate::handlers::user::{login_user, list_users, get_me};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    // The user directory is open: it feeds the login picker.
    let open = Router::new()
        .route("/users", get(list_users))
        .route("/users/login", post(login_user));

    let protected = Router::new()
        .route("/users/me", get(get_me))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
