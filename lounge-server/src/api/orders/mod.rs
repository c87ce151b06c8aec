//! Order API 模块

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::ORDERS_MANAGE;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    // 顾客结账 - 公开
    let checkout_routes = Router::new().route("/", axum::routing::post(handler::checkout));

    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update_status)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn(require_permission(ORDERS_MANAGE)));

    checkout_routes.merge(manage_routes)
}
