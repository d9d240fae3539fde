use axum::Router;

pub mod donors;
pub mod inventory;
pub mod requests;
pub mod system;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(inventory::router())
        .merge(donors::router())
        .merge(requests::router())
}
