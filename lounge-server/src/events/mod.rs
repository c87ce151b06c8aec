//! Event listings (活动)

use chrono::{Days, NaiveDate};
use parking_lot::RwLock;
use shared::models::{Event, EventCreate};
use shared::money;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug)]
pub struct EventBoard {
    events: RwLock<Vec<Event>>,
    next_id: AtomicI64,
}

impl EventBoard {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Events ordered by date, then creation
    pub fn list(&self) -> Vec<Event> {
        let mut events = self.events.read().clone();
        events.sort_by_key(|e| (e.date, e.id));
        events
    }

    pub fn get(&self, id: i64) -> AppResult<Event> {
        self.events
            .read()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::EventNotFound, format!("Event {} not found", id))
                    .with_detail("id", id)
            })
    }

    pub fn create(&self, payload: EventCreate) -> AppResult<Event> {
        money::require_finite(payload.revenue, "revenue")?;
        if payload.revenue < 0.0 {
            return Err(AppError::validation("revenue must not be negative")
                .with_detail("field", "revenue"));
        }
        if payload.tickets_sold > payload.capacity {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!(
                    "tickets_sold ({}) exceeds capacity ({})",
                    payload.tickets_sold, payload.capacity
                ),
            )
            .with_detail("field", "tickets_sold"));
        }

        let event = Event {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: payload.title.trim().to_string(),
            date: payload.date,
            description: payload.description,
            image_url: payload.image_url,
            themed: payload.themed,
            capacity: payload.capacity,
            tickets_sold: payload.tickets_sold,
            revenue: payload.revenue,
        };
        self.events.write().push(event.clone());
        tracing::info!(id = event.id, title = %event.title, date = %event.date, "Event created");
        Ok(event)
    }
}

impl Default for EventBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Upcoming nights seeded relative to `today`
pub fn default_events(today: NaiveDate) -> Vec<EventCreate> {
    let on = |days: u64| today.checked_add_days(Days::new(days)).unwrap_or(today);
    vec![
        EventCreate {
            title: "Afrobeats Friday".into(),
            date: on(4),
            description: "Resident DJs till late".into(),
            image_url: None,
            themed: true,
            capacity: 200,
            tickets_sold: 182,
            revenue: 364_000.0,
        },
        EventCreate {
            title: "Jazz & Grill Sunday".into(),
            date: on(6),
            description: "Live quartet on the terrace".into(),
            image_url: None,
            themed: false,
            capacity: 120,
            tickets_sold: 64,
            revenue: 96_000.0,
        },
        EventCreate {
            title: "Karaoke Night".into(),
            date: on(9),
            description: "Open mic, bottle specials".into(),
            image_url: None,
            themed: true,
            capacity: 80,
            tickets_sold: 58,
            revenue: 87_000.0,
        },
    ]
}
