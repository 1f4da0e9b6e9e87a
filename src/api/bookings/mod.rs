//! Booking API module

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/bookings", routes())
        .route("/api/public/bookings/{slug}", post(handler::submit))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", axum::routing::delete(handler::delete))
        .route("/{id}/status", put(handler::set_status))
}
