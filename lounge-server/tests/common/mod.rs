// lounge-server/tests/common/mod.rs
// 集成测试公共工具: 内存状态 + oneshot 请求

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use lounge_server::api::build_app;
use lounge_server::catalog::default_menu;
use lounge_server::{Config, ServerState};
use shared::models::{StaffCreate, StaffRole};

pub const ADMIN_EMAIL: &str = "admin@lounge.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

fn test_config() -> Config {
    let mut config = Config::with_overrides(0, ADMIN_EMAIL, ADMIN_PASSWORD);
    config.bar_minimum_spend = 2500.0;
    config.event_multiplier = 1.5;
    config.reservation_ttl_minutes = 15;
    config.default_page_size = 6;
    config
}

/// Fully seeded state (menu, tables, events, admin)
pub fn seeded_state() -> ServerState {
    ServerState::initialize(&test_config()).unwrap()
}

/// Menu and admin only; tests add the tables they need
pub fn bare_state() -> ServerState {
    let config = test_config();
    let state = ServerState::new(&config).unwrap();
    for item in default_menu() {
        state.catalog.create(item).unwrap();
    }
    state.staff.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    state
}

/// Mint a token directly, skipping the fixed login delay
pub fn token_for(state: &ServerState, role: StaffRole) -> String {
    let email = format!("{}@lounge.test", role.as_str().to_lowercase());
    let staff = match role {
        StaffRole::Admin => state.staff.seed_admin(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap(),
        StaffRole::Staff => state
            .staff
            .create(StaffCreate {
                name: "Floor Staff".into(),
                email,
                password: "floor-password".into(),
                role,
            })
            .unwrap(),
    };
    state
        .get_jwt_service()
        .issue(&staff)
        .unwrap()
}

pub fn app(state: &ServerState) -> Router {
    build_app(state.clone())
}

/// Send one request and decode the JSON envelope
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
