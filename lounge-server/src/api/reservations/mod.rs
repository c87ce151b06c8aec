//! Reservation API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::permissions::RESERVATIONS_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", post(handler::create));

    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id).patch(handler::update_status))
        .layer(middleware::from_fn(require_permission(RESERVATIONS_MANAGE)));

    public_routes.merge(manage_routes)
}
