use axum::{Router, routing::{post, get}, middleware};
use crate::state::AppState;
use crate::handlers::session::{start_session, switch_session, stop_session, get_current_session};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/start", post(start_session))
        .route("/sessions/switch", post(switch_session))
        .route("/sessions/stop", post(stop_session))
        .route("/sessions/current", get(get_current_session))
        .layer(middleware::from_fn(require_auth))
}
