//! Waiter Call API module

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/waiter-calls", routes())
        .route("/api/public/waiter-calls/{slug}", post(handler::submit))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}/acknowledge", put(handler::acknowledge))
}
