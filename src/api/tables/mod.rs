//! Dining Table API module

mod handler;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/tables", routes())
        .route(
            "/api/public/tables/{slug}/{table_id}",
            get(handler::public_lookup),
        )
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
}
