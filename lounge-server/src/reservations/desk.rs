//! Reservation desk
//!
//! Owns the table book and the reservations behind one lock so a booking,
//! its slot and any waitlist promotion always change together.
//!
//! Pending reservations expire after the configured TTL. Expiry is evaluated
//! on read: every list/get first runs [`DeskState::expire_stale`] with the
//! caller's `now`.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use shared::models::{
    AvailabilityQuery, Page, Reservation, ReservationCreate, ReservationMode, ReservationQuery,
    ReservationStatus, SlotKey, Table, TableAvailability, TableCreate, TableType,
};
use shared::{Cart, MinimumSpendPolicy};

use super::table_book::{TableBook, TableError};
use crate::admin::{filters, paginate};
use crate::catalog::MenuCatalog;
use crate::events::EventBoard;
use crate::utils::validation::validate_payload;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Time slot labels are short ("19:00", "Late")
const MAX_TIME_SLOT_LEN: usize = 32;
const DEFAULT_TTL_MINUTES: i64 = 15;

#[derive(Debug, Clone)]
struct Booking {
    reservation: Reservation,
    /// Themed event night, so the multiplier applies on promotion too
    themed: bool,
}

impl Booking {
    fn slot(&self) -> SlotKey {
        SlotKey::new(
            self.reservation.reservation_date,
            self.reservation.time_slot.clone(),
        )
    }
}

#[derive(Debug)]
struct DeskState {
    tables: TableBook,
    bookings: Vec<Booking>,
    next_id: i64,
}

impl DeskState {
    /// Expire PENDING bookings older than `ttl`, then refill freed slots
    fn expire_stale(&mut self, now: DateTime<Utc>, ttl: Duration, policy: &MinimumSpendPolicy) {
        let mut freed = Vec::new();
        for booking in &mut self.bookings {
            let r = &mut booking.reservation;
            if r.status == ReservationStatus::Pending && now - r.created_at > ttl {
                r.status = ReservationStatus::Expired;
                tracing::info!(reservation_id = r.id, "Pending reservation expired");
                if let Some(table_id) = r.table_id {
                    let slot = SlotKey::new(r.reservation_date, r.time_slot.clone());
                    freed.push((table_id, r.table_type, slot));
                }
            }
        }

        for (table_id, table_type, slot) in freed {
            self.release_and_promote(table_id, table_type, &slot, now, policy);
        }
    }

    fn release_and_promote(
        &mut self,
        table_id: i64,
        table_type: TableType,
        slot: &SlotKey,
        now: DateTime<Utc>,
        policy: &MinimumSpendPolicy,
    ) {
        if let Err(e) = self.tables.release(table_id, slot) {
            tracing::warn!(table_id, error = %e, "Release of expired slot failed");
            return;
        }
        self.promote_waitlisted(table_type, slot, now, policy);
    }

    /// Seat the oldest WAITLISTED booking for this type and slot, if a table is free
    fn promote_waitlisted(
        &mut self,
        table_type: TableType,
        slot: &SlotKey,
        now: DateTime<Utc>,
        policy: &MinimumSpendPolicy,
    ) -> bool {
        let next = self
            .bookings
            .iter()
            .enumerate()
            .filter(|(_, b)| {
                b.reservation.status == ReservationStatus::Waitlisted
                    && b.reservation.table_type == table_type
                    && b.slot() == *slot
            })
            .min_by_key(|(_, b)| (b.reservation.created_at, b.reservation.id))
            .map(|(idx, _)| idx);

        let Some(idx) = next else {
            return false;
        };
        let table = match self.tables.reserve(table_type, slot) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "Waitlist promotion found no table");
                return false;
            }
        };

        let booking = &mut self.bookings[idx];
        let minimum = policy.table_minimum(table.minimum_spend, booking.themed);
        let r = &mut booking.reservation;
        r.table_id = Some(table.id);
        r.table_name = Some(table.name.clone());
        r.minimum_spend = minimum;
        r.deposit = policy.deposit(minimum);
        r.status = ReservationStatus::Pending;
        r.created_at = now;
        tracing::info!(
            reservation_id = r.id,
            table = %table.name,
            slot = %slot,
            "Waitlisted reservation promoted"
        );
        true
    }

    /// Slots with someone waiting for `table_type`, oldest waiter first
    fn waitlisted_slots(&self, table_type: TableType) -> Vec<SlotKey> {
        let mut waiting: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| {
                b.reservation.status == ReservationStatus::Waitlisted
                    && b.reservation.table_type == table_type
            })
            .collect();
        waiting.sort_by_key(|b| (b.reservation.created_at, b.reservation.id));

        let mut slots: Vec<SlotKey> = Vec::new();
        for booking in waiting {
            let slot = booking.slot();
            if !slots.contains(&slot) {
                slots.push(slot);
            }
        }
        slots
    }

    fn find_mut(&mut self, id: i64) -> AppResult<&mut Booking> {
        self.bookings
            .iter_mut()
            .find(|b| b.reservation.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn snapshot(&self) -> Vec<Reservation> {
        self.bookings.iter().map(|b| b.reservation.clone()).collect()
    }
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ReservationNotFound,
        format!("Reservation {} not found", id),
    )
    .with_detail("id", id)
}

#[derive(Debug)]
pub struct ReservationDesk {
    state: RwLock<DeskState>,
    policy: MinimumSpendPolicy,
    ttl: Duration,
}

impl ReservationDesk {
    pub fn new(policy: MinimumSpendPolicy, ttl_minutes: i64) -> Self {
        Self {
            state: RwLock::new(DeskState {
                tables: TableBook::new(),
                bookings: Vec::new(),
                next_id: 1,
            }),
            policy,
            ttl: Duration::try_minutes(ttl_minutes.max(1)).unwrap_or_else(|| {
                tracing::warn!(ttl_minutes, "Reservation TTL out of range, using default");
                Duration::minutes(DEFAULT_TTL_MINUTES)
            }),
        }
    }

    pub fn policy(&self) -> &MinimumSpendPolicy {
        &self.policy
    }

    // ========== Tables ==========

    /// Add a table; people already waiting for its type get it before new requests
    pub fn create_table(&self, payload: TableCreate, now: DateTime<Utc>) -> AppResult<Table> {
        validate_payload(&payload)?;
        let mut state = self.state.write();
        let table = state.tables.add_table(payload)?;
        tracing::info!(id = table.id, name = %table.name, table_type = %table.table_type, "Table created");

        let mut promoted = 0;
        for slot in state.waitlisted_slots(table.table_type) {
            if state.promote_waitlisted(table.table_type, &slot, now, &self.policy) {
                promoted += 1;
            }
        }
        if promoted > 0 {
            tracing::info!(table_id = table.id, promoted, "Waitlist seated at new table");
        }

        Ok(state.tables.get(table.id).cloned().unwrap_or(table))
    }

    pub fn list_tables(&self) -> Vec<Table> {
        self.state.read().tables.tables().to_vec()
    }

    pub fn availability(&self, query: AvailabilityQuery, now: DateTime<Utc>) -> AppResult<TableAvailability> {
        let time_slot = require_time_slot(&query.time_slot)?;
        let mut state = self.state.write();
        state.expire_stale(now, self.ttl, &self.policy);
        Ok(state
            .tables
            .availability(query.table_type, SlotKey::new(query.date, time_slot)))
    }

    // ========== Reservations ==========

    /// Book a table for the requested type and slot
    ///
    /// BAR mode must pre-order at least the bar threshold in drinks. When no
    /// table is free the request fails, unless it opted into the waitlist.
    pub fn create(
        &self,
        payload: ReservationCreate,
        catalog: &MenuCatalog,
        events: &EventBoard,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        validate_payload(&payload)?;
        let time_slot = require_time_slot(&payload.time_slot)?;

        let themed = match payload.event_id {
            Some(id) => {
                let event = events.get(id)?;
                if event.date != payload.reservation_date {
                    return Err(AppError::validation(format!(
                        "{} is on {}, not {}",
                        event.title, event.date, payload.reservation_date
                    ))
                    .with_detail("field", "event_id")
                    .with_detail("event_date", event.date.to_string()));
                }
                event.themed
            }
            None => false,
        };

        let mut cart = Cart::new();
        for line in &payload.pre_order {
            let item = catalog.get(line.menu_item_id)?;
            cart.add_quantity(&item, line.quantity)?;
        }
        if payload.mode == ReservationMode::Bar {
            self.policy.check_bar(cart.drink_total())?;
        }

        let slot = SlotKey::new(payload.reservation_date, time_slot);
        let mut state = self.state.write();
        state.expire_stale(now, self.ttl, &self.policy);

        let (table, status) = match state.tables.reserve(payload.table_type, &slot) {
            Ok(table) => (Some(table), ReservationStatus::Pending),
            Err(TableError::NoAvailability { .. }) if payload.join_waitlist => {
                (None, ReservationStatus::Waitlisted)
            }
            Err(e) => {
                tracing::info!(table_type = %payload.table_type, slot = %slot, "No table available");
                return Err(e.into());
            }
        };

        let base = match &table {
            Some(t) => t.minimum_spend,
            None => state
                .tables
                .first_of_type(payload.table_type)
                .map_or(0.0, |t| t.minimum_spend),
        };
        let minimum_spend = self.policy.table_minimum(base, themed);

        let reservation = Reservation {
            id: state.next_id,
            table_id: table.as_ref().map(|t| t.id),
            table_name: table.map(|t| t.name),
            table_type: payload.table_type,
            customer_name: payload.customer_name.trim().to_string(),
            phone: payload.phone.trim().to_string(),
            reservation_date: payload.reservation_date,
            time_slot: slot.time_slot.clone(),
            mode: payload.mode,
            event_id: payload.event_id,
            minimum_spend,
            deposit: self.policy.deposit(minimum_spend),
            pre_order: cart.into_lines(),
            status,
            created_at: now,
        };
        state.next_id += 1;
        state.bookings.push(Booking {
            reservation: reservation.clone(),
            themed,
        });

        tracing::info!(
            reservation_id = reservation.id,
            status = ?reservation.status,
            table_type = %reservation.table_type,
            slot = %slot,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Snapshot of every reservation after expiry, in creation order
    pub fn all(&self, now: DateTime<Utc>) -> Vec<Reservation> {
        let mut state = self.state.write();
        state.expire_stale(now, self.ttl, &self.policy);
        state.snapshot()
    }

    /// Newest first, filtered by status and search, paginated
    pub fn list(&self, query: &ReservationQuery, default_page_size: u32, now: DateTime<Utc>) -> Page<Reservation> {
        let mut list =
            filters::filter_reservations(&self.all(now), query.status, query.search.as_deref());
        list.reverse();
        paginate(list, query.page, query.page_size, default_page_size)
    }

    pub fn get(&self, id: i64, now: DateTime<Utc>) -> AppResult<Reservation> {
        let mut state = self.state.write();
        state.expire_stale(now, self.ttl, &self.policy);
        state.find_mut(id).map(|b| b.reservation.clone())
    }

    /// Admin status change; expiring a booking frees its slot for the waitlist
    pub fn update_status(
        &self,
        id: i64,
        next: ReservationStatus,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let mut state = self.state.write();
        state.expire_stale(now, self.ttl, &self.policy);

        let booking = state.find_mut(id)?;
        let current = booking.reservation.status;
        if !current.can_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::ReservationInvalidTransition,
                format!("Cannot move reservation {} from {:?} to {:?}", id, current, next),
            )
            .with_detail("from", format!("{:?}", current).to_uppercase())
            .with_detail("to", format!("{:?}", next).to_uppercase()));
        }

        booking.reservation.status = next;
        let release = match booking.reservation.table_id {
            Some(table_id) if current.holds_slot() && !next.holds_slot() => {
                Some((table_id, booking.reservation.table_type, booking.slot()))
            }
            _ => None,
        };
        tracing::info!(reservation_id = id, from = ?current, to = ?next, "Reservation status changed");

        if let Some((table_id, table_type, slot)) = release {
            state.release_and_promote(table_id, table_type, &slot, now, &self.policy);
        }
        state.find_mut(id).map(|b| b.reservation.clone())
    }
}

fn require_time_slot(time_slot: &str) -> AppResult<String> {
    let trimmed = time_slot.trim();
    if trimmed.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::TimeSlotRequired,
            "Please select a time slot",
        )
        .with_detail("field", "time_slot"));
    }
    if trimmed.len() > MAX_TIME_SLOT_LEN {
        return Err(AppError::validation(format!(
            "time_slot is too long (max {} chars)",
            MAX_TIME_SLOT_LEN
        ))
        .with_detail("field", "time_slot"));
    }
    Ok(trimmed.to_string())
}
