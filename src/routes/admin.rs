use axum::{Router, routing::get, middleware};
use crate::state::AppState;
use crate::handlers::admin::{live_sessions, week_view};
use crate::middleware::auth::require_auth;

// Role enforcement happens in the handlers; the middleware only establishes
// identity.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/live", get(live_sessions))
        .route("/admin/week", get(week_view))
        .layer(middleware::from_fn(require_auth))
}
