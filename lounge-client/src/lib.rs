//! Lounge Client - typed client for the lounge server
//!
//! - [`LoungeClient`]: query methods cached by key and tag, mutations that
//!   invalidate their tags, single-flight submissions
//! - [`PersistedAuthStore`]: login state kept across restarts
//! - [`CustomerSession`]: cart and notices for one visit
//!
//! Transport is pluggable through [`HttpClient`]: [`NetworkHttpClient`] over
//! reqwest, or [`OneshotHttpClient`] calling an in-process axum router.

pub mod auth_store;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod inflight;
pub mod oneshot;
pub mod session;

pub use auth_store::{AuthState, PersistedAuthStore};
pub use cache::{CacheTag, QueryCache};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use inflight::InFlight;
pub use oneshot::OneshotHttpClient;
pub use session::{CustomerSession, Notification, NotificationKind, ReservationDraft};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
pub use shared::{ApiResponse, MinimumSpendPolicy};

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::{
    AdminDashboardStats, Analytics, AvailabilityQuery, AvailabilityUpdate, Event, EventAnalytics,
    EventCreate, MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery, MenuStats, Order,
    OrderQuery, OrderStats, OrderStatus, OrderStatusUpdate, Page, PageQuery, PaymentMethod,
    PopularUpdate, Reservation, ReservationQuery, ReservationStats, ReservationStatus,
    ReservationStatusUpdate, Staff, StaffCreate, StaffRole, StaffRoleUpdate, Table,
    TableAvailability, TableCreate,
};

use CacheTag::{DashboardData, MenuItems, Orders, Reservations};

/// Unwrap the success envelope
fn into_data<T>(response: ApiResponse<T>) -> ClientResult<T> {
    response
        .data
        .ok_or_else(|| ClientError::InvalidResponse(format!("Missing data: {}", response.message)))
}

/// Cache key for a path plus its query parameters
fn cache_key<Q: Serialize>(path: &str, query: &Q) -> ClientResult<String> {
    Ok(format!("{}?{}", path, serde_json::to_string(query)?))
}

pub struct LoungeClient<C: HttpClient> {
    http: C,
    cache: QueryCache,
    inflight: InFlight,
    auth: RwLock<AuthState>,
    store: Option<PersistedAuthStore>,
}

impl LoungeClient<NetworkHttpClient> {
    /// Network client from configuration, hydrating auth from `storage_dir`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(config)?;
        let client = Self::new(http);
        match &config.storage_dir {
            Some(dir) => client.with_auth_store(PersistedAuthStore::new(dir)),
            None => Ok(client),
        }
    }
}

impl<C: HttpClient> LoungeClient<C> {
    pub fn new(http: C) -> Self {
        let auth = match http.token() {
            Some(token) => AuthState {
                token: Some(token),
                user: None,
                is_authenticated: true,
            },
            None => AuthState::default(),
        };
        Self {
            http,
            cache: QueryCache::new(),
            inflight: InFlight::new(),
            auth: RwLock::new(auth),
            store: None,
        }
    }

    /// Attach a persisted store and restore the session it holds
    pub fn with_auth_store(mut self, store: PersistedAuthStore) -> ClientResult<Self> {
        let state = store.hydrate()?;
        if state.is_authenticated {
            tracing::info!(user = ?state.user.as_ref().map(|u| &u.email), "Session restored");
            self.http.set_token(state.token.clone());
            *self.auth.write() = state;
        }
        self.store = Some(store);
        Ok(self)
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn auth_state(&self) -> AuthState {
        self.auth.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.read().is_authenticated
    }

    fn set_auth(&self, state: AuthState) -> ClientResult<()> {
        self.http.set_token(state.token.clone());
        if let Some(store) = &self.store {
            if state.is_authenticated {
                store.save(&state)?;
            } else {
                store.purge()?;
            }
        }
        *self.auth.write() = state;
        Ok(())
    }

    /// Drop the session when the server rejects the token
    fn check_auth<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            if e.is_auth_failure() && self.is_authenticated() {
                tracing::warn!(error = %e, "Session rejected by server, signing out");
                if let Err(purge_err) = self.set_auth(AuthState::default()) {
                    tracing::error!(error = %purge_err, "Failed to purge auth state");
                }
                self.cache.clear();
            }
        }
        result
    }

    // ========== Plumbing ==========

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let result = self.http.get::<ApiResponse<T>>(path).await;
        into_data(self.check_auth(result)?)
    }

    async fn fetch_with_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let result = self.http.get_with_query::<ApiResponse<T>, Q>(path, query).await;
        into_data(self.check_auth(result)?)
    }

    /// Serve from cache, or fetch and remember under `tags`
    async fn cached<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        tags: &[CacheTag],
    ) -> ClientResult<T> {
        let key = cache_key(path, query)?;
        if let Some(value) = self.cache.get(&key) {
            return Ok(serde_json::from_value(value)?);
        }
        let value: Value = self.fetch_with_query(path, query).await?;
        self.cache.insert(key, tags, value.clone());
        Ok(serde_json::from_value(value)?)
    }

    async fn post_data<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let result = self.http.post::<ApiResponse<T>, B>(path, body).await;
        into_data(self.check_auth(result)?)
    }

    async fn put_data<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let result = self.http.put::<ApiResponse<T>, B>(path, body).await;
        into_data(self.check_auth(result)?)
    }

    async fn patch_data<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let result = self.http.patch::<ApiResponse<T>, B>(path, body).await;
        into_data(self.check_auth(result)?)
    }

    async fn delete_data<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let result = self.http.delete::<ApiResponse<T>>(path).await;
        into_data(self.check_auth(result)?)
    }

    fn invalidate(&self, tags: &[CacheTag]) {
        self.cache.invalidate_tags(tags);
    }

    // ========== Auth ==========

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let _guard = self.inflight.begin("auth:login")?;
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: ApiResponse<LoginResponse> = self.http.post("/api/auth/login", &request).await?;
        let login = into_data(response)?;

        self.set_auth(AuthState::signed_in(login.token.clone(), login.user.clone()))?;
        self.cache.clear();
        tracing::info!(user = %login.user.email, "Signed in");
        Ok(login)
    }

    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.fetch("/api/auth/me").await
    }

    /// Forget the token locally and purge the persisted state
    pub fn logout(&self) -> ClientResult<()> {
        self.set_auth(AuthState::default())?;
        self.cache.clear();
        tracing::info!("Signed out");
        Ok(())
    }

    // ========== Menu ==========

    pub async fn menu_items(&self, query: &MenuQuery) -> ClientResult<Vec<MenuItem>> {
        self.cached("/api/menu-items", query, &[MenuItems]).await
    }

    pub async fn menu_item(&self, id: i64) -> ClientResult<MenuItem> {
        self.cached(&format!("/api/menu-items/{}", id), &(), &[MenuItems])
            .await
    }

    pub async fn create_menu_item(&self, payload: &MenuItemCreate) -> ClientResult<MenuItem> {
        let item = self.post_data("/api/menu-items", payload).await?;
        self.invalidate(&[MenuItems, DashboardData]);
        Ok(item)
    }

    pub async fn update_menu_item(&self, id: i64, payload: &MenuItemUpdate) -> ClientResult<MenuItem> {
        let item = self.put_data(&format!("/api/menu-items/{}", id), payload).await?;
        self.invalidate(&[MenuItems, DashboardData]);
        Ok(item)
    }

    pub async fn delete_menu_item(&self, id: i64) -> ClientResult<MenuItem> {
        let item = self.delete_data(&format!("/api/menu-items/{}", id)).await?;
        self.invalidate(&[MenuItems, DashboardData]);
        Ok(item)
    }

    pub async fn set_menu_item_availability(&self, id: i64, is_available: bool) -> ClientResult<MenuItem> {
        let item = self
            .patch_data(
                &format!("/api/menu-items/{}/availability", id),
                &AvailabilityUpdate { is_available },
            )
            .await?;
        self.invalidate(&[MenuItems, DashboardData]);
        Ok(item)
    }

    pub async fn set_menu_item_popular(&self, id: i64, popular: bool) -> ClientResult<MenuItem> {
        let item = self
            .patch_data(&format!("/api/menu-items/{}/popular", id), &PopularUpdate { popular })
            .await?;
        self.invalidate(&[MenuItems]);
        Ok(item)
    }

    // ========== Orders ==========

    /// Submit the session's cart; the cart is cleared once the order lands.
    /// Any failure is also queued on the session as an error notice.
    pub async fn place_order(
        &self,
        session: &mut CustomerSession,
        payment_method: PaymentMethod,
        table_name: Option<String>,
    ) -> ClientResult<Order> {
        let _guard = self.inflight.begin("orders:checkout")?;
        let result = match session.order_request(payment_method, table_name) {
            Ok(payload) => self.post_data::<Order, _>("/api/orders", &payload).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(order) => {
                self.invalidate(&[Orders, DashboardData]);
                session.clear_cart();
                session.notify(
                    NotificationKind::Success,
                    format!("Order #{} placed", order.id),
                );
                Ok(order)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Checkout failed");
                session.notify(NotificationKind::Error, e.user_message());
                Err(e)
            }
        }
    }

    pub async fn orders(&self, query: &OrderQuery) -> ClientResult<Page<Order>> {
        self.cached("/api/orders", query, &[Orders]).await
    }

    pub async fn order(&self, id: i64) -> ClientResult<Order> {
        self.cached(&format!("/api/orders/{}", id), &(), &[Orders]).await
    }

    pub async fn update_order_status(&self, id: i64, status: OrderStatus) -> ClientResult<Order> {
        let order = self
            .patch_data(&format!("/api/orders/{}", id), &OrderStatusUpdate { status })
            .await?;
        self.invalidate(&[Orders, DashboardData]);
        Ok(order)
    }

    pub async fn delete_order(&self, id: i64) -> ClientResult<Order> {
        let order = self.delete_data(&format!("/api/orders/{}", id)).await?;
        self.invalidate(&[Orders, DashboardData]);
        Ok(order)
    }

    // ========== Tables & reservations ==========

    pub async fn tables(&self) -> ClientResult<Vec<Table>> {
        self.cached("/api/tables", &(), &[Reservations]).await
    }

    pub async fn table_availability(&self, query: &AvailabilityQuery) -> ClientResult<TableAvailability> {
        self.fetch_with_query("/api/tables/availability", query).await
    }

    pub async fn create_table(&self, payload: &TableCreate) -> ClientResult<Table> {
        let table = self.post_data("/api/tables", payload).await?;
        self.invalidate(&[Reservations, DashboardData]);
        Ok(table)
    }

    pub async fn minimum_spend_policy(&self) -> ClientResult<MinimumSpendPolicy> {
        self.fetch("/api/policy/minimum-spend").await
    }

    /// Book a table with the session's cart as pre-order
    ///
    /// Bar bookings are checked against the server's policy before anything
    /// is submitted. Failures land on the session as error notices.
    pub async fn reserve(
        &self,
        session: &mut CustomerSession,
        draft: ReservationDraft,
    ) -> ClientResult<Reservation> {
        let _guard = self.inflight.begin("reservations:create")?;
        match self.submit_reservation(session, draft).await {
            Ok((reservation, message)) => {
                self.invalidate(&[Reservations, DashboardData]);
                session.clear_cart();
                session.notify(NotificationKind::Success, message);
                Ok(reservation)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Reservation failed");
                session.notify(NotificationKind::Error, e.user_message());
                Err(e)
            }
        }
    }

    async fn submit_reservation(
        &self,
        session: &CustomerSession,
        draft: ReservationDraft,
    ) -> ClientResult<(Reservation, String)> {
        let policy = self.minimum_spend_policy().await?;
        let payload = session.reservation_request(draft, &policy)?;
        let result = self
            .http
            .post::<ApiResponse<Reservation>, _>("/api/reservations", &payload)
            .await;
        let response = self.check_auth(result)?;
        let message = response.message.clone();
        Ok((into_data(response)?, message))
    }

    pub async fn reservations(&self, query: &ReservationQuery) -> ClientResult<Page<Reservation>> {
        self.cached("/api/reservations", query, &[Reservations]).await
    }

    pub async fn reservation(&self, id: i64) -> ClientResult<Reservation> {
        self.cached(&format!("/api/reservations/{}", id), &(), &[Reservations])
            .await
    }

    pub async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> ClientResult<Reservation> {
        let reservation = self
            .patch_data(
                &format!("/api/reservations/{}", id),
                &ReservationStatusUpdate { status },
            )
            .await?;
        self.invalidate(&[Reservations, DashboardData]);
        Ok(reservation)
    }

    // ========== Events ==========

    pub async fn events(&self) -> ClientResult<Vec<Event>> {
        self.fetch("/api/events").await
    }

    pub async fn create_event(&self, payload: &EventCreate) -> ClientResult<Event> {
        let event = self.post_data("/api/events", payload).await?;
        self.invalidate(&[DashboardData]);
        Ok(event)
    }

    // ========== Admin reports ==========

    pub async fn dashboard(&self) -> ClientResult<AdminDashboardStats> {
        self.cached("/api/admin-dashboard", &(), &[DashboardData]).await
    }

    pub async fn order_stats(&self) -> ClientResult<OrderStats> {
        self.cached("/api/admin/orders/stats", &(), &[Orders, DashboardData])
            .await
    }

    pub async fn reservation_stats(&self) -> ClientResult<ReservationStats> {
        self.cached(
            "/api/admin/reservations/stats",
            &(),
            &[Reservations, DashboardData],
        )
        .await
    }

    pub async fn menu_stats(&self) -> ClientResult<MenuStats> {
        self.cached("/api/admin/menu/stats", &(), &[MenuItems, DashboardData])
            .await
    }

    pub async fn event_analytics(&self) -> ClientResult<EventAnalytics> {
        self.cached("/api/admin/events/analytics", &(), &[DashboardData])
            .await
    }

    pub async fn analytics(&self) -> ClientResult<Analytics> {
        self.cached("/api/admin/analytics", &(), &[Orders, DashboardData])
            .await
    }

    // ========== Staff ==========

    pub async fn staff(&self, query: &PageQuery) -> ClientResult<Page<Staff>> {
        self.fetch_with_query("/api/staff", query).await
    }

    pub async fn create_staff(&self, payload: &StaffCreate) -> ClientResult<Staff> {
        self.post_data("/api/staff", payload).await
    }

    pub async fn update_staff_role(&self, id: i64, role: StaffRole) -> ClientResult<Staff> {
        self.patch_data(&format!("/api/staff/{}/role", id), &StaffRoleUpdate { role })
            .await
    }

    pub async fn delete_staff(&self, id: i64) -> ClientResult<Staff> {
        self.delete_data(&format!("/api/staff/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::StaffRole;
    use tempfile::TempDir;

    #[test]
    fn test_config_token_counts_as_signed_in() {
        let config = ClientConfig::new("http://lounge.local:8080/")
            .with_token("jwt")
            .with_timeout(5);
        let client = LoungeClient::from_config(&config).unwrap();
        assert_eq!(client.http().base_url(), "http://lounge.local:8080");
        assert!(client.is_authenticated());
        assert_eq!(client.auth_state().token.as_deref(), Some("jwt"));
        assert!(client.auth_state().user.is_none());
    }

    #[test]
    fn test_storage_dir_restores_session() {
        let dir = TempDir::new().unwrap();
        let user = UserInfo {
            id: 3,
            name: "Kofi".into(),
            email: "kofi@lounge.test".into(),
            role: StaffRole::Staff,
            permissions: vec![],
        };
        PersistedAuthStore::new(dir.path())
            .save(&AuthState::signed_in("stored".into(), user.clone()))
            .unwrap();

        let config = ClientConfig::default().with_storage_dir(dir.path());
        let client = LoungeClient::from_config(&config).unwrap();
        assert_eq!(client.http().token().as_deref(), Some("stored"));
        assert_eq!(client.auth_state().user, Some(user));
    }
}
