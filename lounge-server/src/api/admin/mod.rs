//! Admin dashboard & statistics API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::REPORTS_VIEW;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin-dashboard", get(handler::dashboard))
        .nest("/api/admin", routes())
        .layer(middleware::from_fn(require_permission(REPORTS_VIEW)))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders/stats", get(handler::order_stats))
        .route("/reservations/stats", get(handler::reservation_stats))
        .route("/menu/stats", get(handler::menu_stats))
        .route("/events/analytics", get(handler::event_analytics))
        .route("/analytics", get(handler::analytics))
}
