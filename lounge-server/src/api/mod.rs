//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录 / 当前用户
//! - [`menu_items`] - 菜单
//! - [`orders`] - 结账与订单管理
//! - [`tables`] - 桌台与空闲查询
//! - [`reservations`] - 预订
//! - [`events`] - 活动
//! - [`policy`] - 最低消费规则
//! - [`admin`] - 后台统计
//! - [`staff`] - 员工管理

pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod policy;
pub mod reservations;
pub mod staff;
pub mod tables;

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());
    response
}

/// Build a router with all routes registered (no middleware)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public
        .merge(health::router())
        .merge(policy::router())
        // Mixed: customer-facing reads/submissions are public, management needs permissions
        .merge(auth::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .merge(tables::router())
        .merge(reservations::router())
        .merge(events::router())
        // Back office
        .merge(admin::router())
        .merge(staff::router())
}

/// Build a fully configured application with all middleware and state
///
/// Used by both the HTTP server and in-process tests.
pub fn build_app(state: ServerState) -> Router {
    let max_connections = state.config.max_connections.max(1);

    build_router()
        // Get user context (JWT authentication) - injects CurrentUser before routes run
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(ConcurrencyLimitLayer::new(max_connections))
        .with_state(state)
}
