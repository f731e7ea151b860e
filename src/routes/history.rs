use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::history::get_history;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/history", get(get_history))
        .layer(middleware::from_fn(require_auth))
}
