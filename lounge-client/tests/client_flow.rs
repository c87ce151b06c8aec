// lounge-client/tests/client_flow.rs
// 集成测试: OneshotHttpClient 直连 lounge-server Router

use chrono::{NaiveDate, Utc};
use lounge_client::{
    AuthState, CacheTag, ClientError, CustomerSession, HttpClient, LoungeClient,
    NotificationKind, OneshotHttpClient, PersistedAuthStore, ReservationDraft,
};
use lounge_server::api::build_app;
use lounge_server::{Config, ServerState};
use shared::ErrorCode;
use shared::models::{
    MenuQuery, OrderStatus, PaymentMethod, ReservationMode, ReservationQuery, ReservationStatus,
    TableType,
};
use tempfile::TempDir;

const ADMIN_EMAIL: &str = "admin@lounge.test";
const ADMIN_PASSWORD: &str = "admin-password";

fn server() -> ServerState {
    let mut config = Config::with_overrides(0, ADMIN_EMAIL, ADMIN_PASSWORD);
    config.bar_minimum_spend = 2500.0;
    config.event_multiplier = 1.5;
    config.reservation_ttl_minutes = 15;
    config.default_page_size = 6;
    ServerState::initialize(&config).unwrap()
}

fn client(state: &ServerState) -> LoungeClient<OneshotHttpClient> {
    LoungeClient::new(OneshotHttpClient::new(build_app(state.clone())))
}

fn draft(mode: ReservationMode) -> ReservationDraft {
    ReservationDraft {
        table_type: TableType::Vip,
        customer_name: "Ama Owusu".into(),
        phone: "0244123456".into(),
        reservation_date: NaiveDate::from_ymd_opt(2026, 11, 7).unwrap(),
        time_slot: "22:00".into(),
        mode,
        event_id: None,
        join_waitlist: false,
    }
}

#[tokio::test]
async fn test_login_persists_and_logout_purges() {
    let state = server();
    let dir = TempDir::new().unwrap();
    let store = PersistedAuthStore::new(dir.path());

    let first = client(&state).with_auth_store(store.clone()).unwrap();
    assert!(!first.is_authenticated());
    let login = first.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(store.hydrate().unwrap().token, Some(login.token.clone()));

    // a fresh client picks the session up from disk
    let second = client(&state).with_auth_store(store.clone()).unwrap();
    assert!(second.is_authenticated());
    assert_eq!(second.me().await.unwrap().email, ADMIN_EMAIL);

    second.logout().unwrap();
    assert_eq!(store.hydrate().unwrap(), AuthState::default());
    assert!(second.http().token().is_none());
}

#[tokio::test]
async fn test_wrong_password_keeps_signed_out() {
    let state = server();
    let client = client(&state);
    let err = client.login(ADMIN_EMAIL, "not-it").await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidCredentials));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_rejected_token_signs_out() {
    let state = server();
    let dir = TempDir::new().unwrap();
    let store = PersistedAuthStore::new(dir.path());
    store
        .save(&AuthState {
            token: Some("not-a-jwt".into()),
            user: None,
            is_authenticated: true,
        })
        .unwrap();

    let client = client(&state).with_auth_store(store.clone()).unwrap();
    assert!(client.is_authenticated());

    let err = client.dashboard().await.unwrap_err();
    assert!(err.is_auth_failure());
    assert!(!client.is_authenticated());
    assert_eq!(store.hydrate().unwrap(), AuthState::default());
}

#[tokio::test]
async fn test_menu_cache_served_until_invalidated() {
    let state = server();
    let client = client(&state);
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let menu = client.menu_items(&MenuQuery::default()).await.unwrap();
    assert_eq!(menu.len(), 9);
    assert!(menu.iter().all(|m| m.is_available));

    // changed behind the client's back: the cached list still answers
    state.catalog.set_availability(1, false).unwrap();
    let cached = client.menu_items(&MenuQuery::default()).await.unwrap();
    assert!(cached.iter().find(|m| m.id == 1).unwrap().is_available);

    // any MenuItems mutation drops the entry
    client.set_menu_item_popular(2, true).await.unwrap();
    let fresh = client.menu_items(&MenuQuery::default()).await.unwrap();
    assert!(!fresh.iter().find(|m| m.id == 1).unwrap().is_available);
    assert!(fresh.iter().find(|m| m.id == 2).unwrap().popular);
}

#[tokio::test]
async fn test_filtered_menu_cached_per_query() {
    let state = server();
    let client = client(&state);

    let all = client.menu_items(&MenuQuery::default()).await.unwrap();
    let search = MenuQuery {
        category: None,
        search: Some("moj".into()),
    };
    let mojito = client.menu_items(&search).await.unwrap();
    assert_eq!(mojito.len(), 1);
    assert_eq!(mojito[0].name, "Mojito");
    assert!(all.len() > mojito.len());
    assert_eq!(client.cache().len(), 2);

    assert_eq!(client.cache().invalidate_tags(&[CacheTag::MenuItems]), 2);
}

#[tokio::test]
async fn test_place_order_clears_cart_and_refreshes_dashboard() {
    let state = server();
    let client = client(&state);
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let before = client.dashboard().await.unwrap();

    let mut session = CustomerSession::new();
    let jollof = client.menu_item(1).await.unwrap();
    let suya = client.menu_item(3).await.unwrap();
    session.add_item(&jollof).unwrap();
    session.add_item(&jollof).unwrap();
    session.add_item(&suya).unwrap();

    let order = client
        .place_order(&mut session, PaymentMethod::Mobile, Some("VIP 1".into()))
        .await
        .unwrap();
    assert_eq!(order.total, jollof.price * 2.0 + suya.price);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(session.cart().is_empty());
    let last = session.drain_notifications().pop().unwrap();
    assert_eq!(last.kind, NotificationKind::Success);
    assert_eq!(last.message, format!("Order #{} placed", order.id));

    let after = client.dashboard().await.unwrap();
    assert_eq!(after.total_orders, before.total_orders + 1);

    let paid = client.update_order_status(order.id, OrderStatus::Paid).await.unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
    assert_eq!(client.order(order.id).await.unwrap().status, OrderStatus::Paid);
}

#[tokio::test]
async fn test_empty_cart_never_reaches_server() {
    let state = server();
    let client = client(&state);
    let mut session = CustomerSession::new();

    let err = client
        .place_order(&mut session, PaymentMethod::Cash, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::OrderEmpty));
    assert!(state.orders.all().is_empty());
}

#[tokio::test]
async fn test_bar_reservation_checked_before_submit() {
    let state = server();
    let client = client(&state);
    let moet = client.menu_item(8).await.unwrap();

    let mut session = CustomerSession::new();
    session.add_item(&moet).unwrap();
    let err = client
        .reserve(&mut session, draft(ReservationMode::Bar))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));
    assert_eq!(err.code(), Some(ErrorCode::MinimumSpendNotMet));
    let shortfall = 2500.0 - moet.price;
    assert_eq!(err.detail("shortfall").and_then(|v| v.as_f64()), Some(shortfall));
    assert!(state.reservations.all(Utc::now()).is_empty());
    assert_eq!(session.cart().item_count(), 1);

    session.add_item(&moet).unwrap();
    let reservation = client
        .reserve(&mut session, draft(ReservationMode::Bar))
        .await
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Pending);
    assert_eq!(reservation.table_type, TableType::Vip);
    assert_eq!(reservation.pre_order[0].quantity, 2);
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn test_reservation_list_refreshes_after_status_change() {
    let state = server();
    let client = client(&state);
    client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

    let mut session = CustomerSession::new();
    let reservation = client
        .reserve(&mut session, draft(ReservationMode::Table))
        .await
        .unwrap();

    let query = ReservationQuery::default();
    let page = client.reservations(&query).await.unwrap();
    assert_eq!(page.items[0].status, ReservationStatus::Pending);

    client
        .update_reservation_status(reservation.id, ReservationStatus::Confirmed)
        .await
        .unwrap();
    let page = client.reservations(&query).await.unwrap();
    assert_eq!(page.items[0].status, ReservationStatus::Confirmed);
}

#[tokio::test]
async fn test_server_rejection_queued_as_error_notice() {
    let state = server();
    let client = client(&state);
    let mut session = CustomerSession::new();

    let mut attempts = 0;
    let err = loop {
        attempts += 1;
        assert!(attempts <= 20, "VIP slot never filled up");
        match client.reserve(&mut session, draft(ReservationMode::Table)).await {
            Ok(_) => continue,
            Err(e) => break e,
        }
    };
    assert_eq!(err.code(), Some(ErrorCode::NoTableAvailable));

    let notices = session.drain_notifications();
    assert_eq!(notices.len(), attempts);
    let last = notices.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert!(last.message.contains("VIP"));
    assert!(last.message.contains("22:00"));
    assert!(
        notices[..attempts - 1]
            .iter()
            .all(|n| n.kind == NotificationKind::Success)
    );
}

#[tokio::test]
async fn test_unavailable_item_checkout_queued_as_error_notice() {
    let state = server();
    let client = client(&state);
    let mut session = CustomerSession::new();
    session.add_item(&client.menu_item(1).await.unwrap()).unwrap();
    session.drain_notifications();

    state.catalog.set_availability(1, false).unwrap();
    let err = client
        .place_order(&mut session, PaymentMethod::Cash, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::MenuItemUnavailable));

    let notices = session.drain_notifications();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NotificationKind::Error);
    assert_eq!(notices[0].message, err.user_message());
    assert_eq!(session.cart().item_count(), 1);
}
