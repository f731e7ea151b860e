use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::category::list_categories;
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .layer(middleware::from_fn(require_auth))
}
