//! Admin statistics handlers
//!
//! Recomputed from store snapshots on every request.

use axum::extract::State;
use chrono::Utc;
use shared::models::{
    AdminDashboardStats, Analytics, EventAnalytics, MenuStats, OrderStats, ReservationStats,
};

use crate::admin::{analytics as reports, kpi};
use crate::core::ServerState;
use crate::utils::{ApiResult, ok};

/// GET /api/admin-dashboard
pub async fn dashboard(State(state): State<ServerState>) -> ApiResult<AdminDashboardStats> {
    let now = Utc::now();
    Ok(ok(kpi::dashboard(
        &state.orders.all(),
        state.catalog.count(),
        &state.reservations.all(now),
        &state.reservations.list_tables(),
        now.date_naive(),
    )))
}

/// GET /api/admin/orders/stats
pub async fn order_stats(State(state): State<ServerState>) -> ApiResult<OrderStats> {
    Ok(ok(kpi::order_stats(&state.orders.all())))
}

/// GET /api/admin/reservations/stats
pub async fn reservation_stats(State(state): State<ServerState>) -> ApiResult<ReservationStats> {
    Ok(ok(kpi::reservation_stats(&state.reservations.all(Utc::now()))))
}

/// GET /api/admin/menu/stats
pub async fn menu_stats(State(state): State<ServerState>) -> ApiResult<MenuStats> {
    Ok(ok(kpi::menu_stats(&state.catalog.all())))
}

/// GET /api/admin/events/analytics
pub async fn event_analytics(State(state): State<ServerState>) -> ApiResult<EventAnalytics> {
    Ok(ok(kpi::event_analytics(&state.events.list())))
}

/// GET /api/admin/analytics
pub async fn analytics(State(state): State<ServerState>) -> ApiResult<Analytics> {
    Ok(ok(reports::analytics(&state.orders.all())))
}
