//! Order API module

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update_status)
                .delete(handler::delete),
        )
        .route("/{id}/items", post(handler::add_items))
        .route(
            "/{id}/kot",
            get(handler::kot_ticket).put(handler::mark_kot_printed),
        )
}
