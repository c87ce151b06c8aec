// lounge-server/tests/api_flow.rs
// 集成测试: 顾客下单、预订、后台统计

mod common;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, app, bare_state, seeded_state, send, token_for};
use chrono::Utc;
use http::{Method, StatusCode};
use serde_json::json;
use shared::models::{StaffRole, TableCreate, TableType};

#[tokio::test]
async fn test_health_is_public() {
    let app = app(&seeded_state());
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (_, body) = send(&app, Method::GET, "/health/detailed", None, None).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["menu_items"], 9);
    assert_eq!(body["orders"], 0);
}

#[tokio::test]
async fn test_menu_is_public_and_filterable() {
    let app = app(&seeded_state());

    let (status, body) = send(&app, Method::GET, "/api/menu-items", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"].as_array().unwrap().len(), 9);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/menu-items?category=cocktails&search=moj",
        None,
        None,
    )
    .await;
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Mojito");
}

#[tokio::test]
async fn test_menu_management_requires_permission() {
    let state = seeded_state();
    let app = app(&state);
    let staff = token_for(&state, StaffRole::Staff);
    let admin = token_for(&state, StaffRole::Admin);
    let payload = json!({
        "name": "Nyama Choma",
        "price": 950.0,
        "category": "Grills",
        "section": "KITCHEN"
    });

    let (status, _) = send(&app, Method::POST, "/api/menu-items", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) =
        send(&app, Method::POST, "/api/menu-items", Some(&staff), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, body) = send(&app, Method::POST, "/api/menu-items", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/menu-items/{}/availability", id),
        Some(&admin),
        Some(json!({ "is_available": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_available"], false);
}

#[tokio::test]
async fn test_checkout_then_status_flow() {
    let state = seeded_state();
    let app = app(&state);
    let staff = token_for(&state, StaffRole::Staff);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(json!({
            "table_name": "VIP Table 01",
            "payment_method": "MOBILE",
            "items": [
                { "menu_item_id": 1, "quantity": 2 },
                { "menu_item_id": 5, "quantity": 1 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order = &body["data"];
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["total"], 330.0);
    let id = order["id"].as_i64().unwrap();

    let uri = format!("/api/orders/{}", id);
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&staff), Some(json!({"status": "PAID"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) =
        send(&app, Method::PATCH, &uri, Some(&staff), Some(json!({"status": "PENDING"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4002);

    let (_, body) = send(&app, Method::GET, "/api/admin-dashboard", Some(&staff), None).await;
    assert_eq!(body["data"]["totalOrders"], 1);
    assert_eq!(body["data"]["totalRevenue"], 330.0);
    assert_eq!(body["data"]["totalMenuItems"], 9);

    let (_, body) = send(&app, Method::GET, "/api/orders?status=PAID", Some(&staff), None).await;
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_empty_checkout_rejected() {
    let app = app(&seeded_state());
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        None,
        Some(json!({ "payment_method": "CASH", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);
}

#[tokio::test]
async fn test_bar_reservation_below_minimum() {
    let app = app(&seeded_state());

    // Moët 1500 + 20 x Club Beer 25 = 2000
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reservations",
        None,
        Some(json!({
            "table_type": "LOUNGE",
            "customer_name": "Wanjiru",
            "phone": "0712345678",
            "reservation_date": "2026-12-24",
            "time_slot": "21:00",
            "mode": "BAR",
            "pre_order": [
                { "menu_item_id": 8, "quantity": 1 },
                { "menu_item_id": 9, "quantity": 20 }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5010);
    assert_eq!(body["details"]["required"], 2500.0);
    assert_eq!(body["details"]["current"], 2000.0);
    assert_eq!(body["details"]["shortfall"], 500.0);
}

#[tokio::test]
async fn test_single_table_slot_taken_once() {
    let state = bare_state();
    state
        .reservations
        .create_table(
            TableCreate {
                name: "VIP Table 01".into(),
                table_type: TableType::Vip,
                minimum_spend: 10_000.0,
            },
            Utc::now(),
        )
        .unwrap();
    let app = app(&state);
    let request = json!({
        "table_type": "VIP",
        "customer_name": "Otieno",
        "phone": "0722000000",
        "reservation_date": "2026-12-24",
        "time_slot": "19:00"
    });

    let (status, body) =
        send(&app, Method::POST, "/api/reservations", None, Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["table_name"], "VIP Table 01");
    assert_eq!(body["data"]["deposit"], 5000.0);

    let (status, body) = send(&app, Method::POST, "/api/reservations", None, Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7002);
    assert_eq!(body["details"]["table_type"], "VIP");
    assert_eq!(body["details"]["time_slot"], "19:00");
    assert!(body["message"].as_str().unwrap().contains("2026-12-24 19:00"));

    let tables = state.reservations.list_tables();
    assert_eq!(tables[0].reserved_slots.len(), 1);
}

#[tokio::test]
async fn test_waitlist_then_admin_expiry_promotes() {
    let state = bare_state();
    state
        .reservations
        .create_table(
            TableCreate {
                name: "Grill Terrace 01".into(),
                table_type: TableType::Grill,
                minimum_spend: 3_000.0,
            },
            Utc::now(),
        )
        .unwrap();
    let app = app(&state);
    let staff = token_for(&state, StaffRole::Staff);
    let mut request = json!({
        "table_type": "GRILL",
        "customer_name": "Kamau",
        "phone": "0733000000",
        "reservation_date": "2026-12-24",
        "time_slot": "18:00"
    });

    let (_, body) = send(&app, Method::POST, "/api/reservations", None, Some(request.clone())).await;
    let holder = body["data"]["id"].as_i64().unwrap();

    request["customer_name"] = json!("Achieng");
    request["join_waitlist"] = json!(true);
    let (status, body) = send(&app, Method::POST, "/api/reservations", None, Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "WAITLISTED");
    assert_eq!(body["message"], "Added to waitlist");
    let waiting = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/reservations/{}", holder),
        Some(&staff),
        Some(json!({ "status": "EXPIRED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/reservations?search=achieng",
        Some(&staff),
        None,
    )
    .await;
    let promoted = &body["data"]["items"][0];
    assert_eq!(promoted["id"], waiting);
    assert_eq!(promoted["status"], "PENDING");
    assert_eq!(promoted["table_name"], "Grill Terrace 01");
}

#[tokio::test]
async fn test_blank_time_slot_rejected() {
    let app = app(&seeded_state());
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/reservations",
        None,
        Some(json!({
            "table_type": "VIP",
            "customer_name": "Otieno",
            "phone": "0722000000",
            "reservation_date": "2026-12-24"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7103);
}

#[tokio::test]
async fn test_policy_endpoint() {
    let app = app(&seeded_state());
    let (status, body) = send(&app, Method::GET, "/api/policy/minimum-spend", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bar_threshold"], 2500.0);
    assert_eq!(body["data"]["event_multiplier"], 1.5);
}

#[tokio::test]
async fn test_staff_management_is_admin_only() {
    let state = seeded_state();
    let app = app(&state);
    let staff = token_for(&state, StaffRole::Staff);
    let admin = token_for(&state, StaffRole::Admin);

    let (status, _) = send(&app, Method::GET, "/api/staff", Some(&staff), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/api/staff", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 2);
    assert!(body["data"]["items"][0].get("password_hash").is_none());

    let (_, body) = send(&app, Method::GET, "/api/auth/me", Some(&admin), None).await;
    let admin_id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/staff/{}", admin_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 8003);
}

#[tokio::test]
async fn test_login_round_trip() {
    let app = app(&seeded_state());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "ADMIN");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_event_analytics_over_seeded_events() {
    let state = seeded_state();
    let app = app(&state);
    let staff = token_for(&state, StaffRole::Staff);

    let (status, body) =
        send(&app, Method::GET, "/api/admin/events/analytics", Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_events"], 3);
    assert_eq!(body["data"]["events"][0]["insights"][0], "TOP_REVENUE");
}
