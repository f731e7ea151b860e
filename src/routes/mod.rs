pub mod users;
pub mod categories;
pub mod sessions;
pub mod history;
pub mod admin;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(categories::routes())
        .merge(sessions::routes())
        .merge(history::routes())
        .merge(admin::routes())
}
