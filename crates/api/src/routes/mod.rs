pub mod gifts;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /gifts          list, create
/// /gifts/{id}     get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/gifts", gifts::router())
}
