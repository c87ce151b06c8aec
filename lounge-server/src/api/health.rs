//! 健康检查
//!
//! `/health` 供负载均衡探活; `/health/detailed` 附带运行时长和数据量。
//! 两者都不需要登录。

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use shared::client::HealthResponse;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/detailed", get(detailed_health))
}

#[derive(Serialize)]
pub struct DetailedHealth {
    #[serde(flatten)]
    base: HealthResponse,
    uptime_seconds: u64,
    environment: String,
    menu_items: usize,
    tables: usize,
    orders: usize,
}

fn status() -> HealthResponse {
    HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(status())
}

pub async fn detailed_health(State(state): State<ServerState>) -> Json<DetailedHealth> {
    Json(DetailedHealth {
        base: status(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        environment: state.config.environment.clone(),
        menu_items: state.catalog.count(),
        tables: state.reservations.list_tables().len(),
        orders: state.orders.all().len(),
    })
}
