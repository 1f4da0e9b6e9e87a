//! Order API module
//!
//! Public side: guests submit a cart against a restaurant slug.
//! Staff side: list, status transitions and revenue statistics.

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", routes())
        .route("/api/public/orders/{slug}", post(handler::submit))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/stats", get(handler::stats))
        .route("/{id}/status", put(handler::set_status))
}
