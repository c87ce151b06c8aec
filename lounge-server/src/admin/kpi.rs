//! KPI reductions for the admin overview cards
//!
//! All functions are pure folds over snapshots taken from the stores, so a
//! request always sees numbers consistent with the lists it just loaded.

use chrono::NaiveDate;
use shared::models::{
    AdminDashboardStats, CategoryCount, Event, EventAnalytics, EventInsight, EventPerformance,
    MenuItem, MenuStats, Order, OrderStats, OrderStatus, Reservation, ReservationStats,
    ReservationStatus, Table,
};
use shared::money;

/// Attendance at or above this percentage is tagged High Attendance
pub const HIGH_ATTENDANCE_PCT: f64 = 85.0;
/// Attendance below this percentage is tagged Low Conversion
pub const LOW_CONVERSION_PCT: f64 = 60.0;

pub fn order_stats(orders: &[Order]) -> OrderStats {
    let mut stats = OrderStats {
        total: orders.len(),
        ..Default::default()
    };
    for order in orders {
        match order.status {
            OrderStatus::Pending => stats.pending += 1,
            OrderStatus::Paid => stats.paid += 1,
            OrderStatus::Completed => stats.completed += 1,
            OrderStatus::Cancelled => stats.cancelled += 1,
        }
    }
    stats.revenue = settled_revenue(orders);
    stats
}

/// Revenue over PAID and COMPLETED orders
pub fn settled_revenue(orders: &[Order]) -> f64 {
    money::sum(
        orders
            .iter()
            .filter(|o| o.status.is_settled())
            .map(|o| o.total),
    )
}

pub fn reservation_stats(reservations: &[Reservation]) -> ReservationStats {
    let mut stats = ReservationStats {
        total: reservations.len(),
        ..Default::default()
    };
    for r in reservations {
        match r.status {
            ReservationStatus::Pending => stats.pending += 1,
            ReservationStatus::Confirmed => stats.confirmed += 1,
            ReservationStatus::Expired => stats.expired += 1,
            ReservationStatus::Waitlisted => stats.waitlisted += 1,
        }
    }
    stats
}

/// Menu counts; categories keep the order they first appear in
pub fn menu_stats(items: &[MenuItem]) -> MenuStats {
    let mut categories: Vec<CategoryCount> = Vec::new();
    for item in items {
        match categories.iter_mut().find(|c| c.category == item.category) {
            Some(entry) => entry.count += 1,
            None => categories.push(CategoryCount {
                category: item.category.clone(),
                count: 1,
            }),
        }
    }

    let available = items.iter().filter(|i| i.is_available).count();
    MenuStats {
        total: items.len(),
        available,
        unavailable: items.len() - available,
        popular: items.iter().filter(|i| i.popular).count(),
        categories,
    }
}

/// Overview numbers; a table is active when it holds a slot on `today`
pub fn dashboard(
    orders: &[Order],
    menu_items: usize,
    reservations: &[Reservation],
    tables: &[Table],
    today: NaiveDate,
) -> AdminDashboardStats {
    AdminDashboardStats {
        total_orders: orders.len(),
        total_revenue: settled_revenue(orders),
        total_menu_items: menu_items,
        total_reservations: reservations.len(),
        active_tables: tables
            .iter()
            .filter(|t| t.reserved_slots.iter().any(|s| s.date == today))
            .count(),
        total_tables: tables.len(),
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        0.0
    } else {
        (part / whole * 100.0).round()
    }
}

/// Event performance with insight tags
pub fn event_analytics(events: &[Event]) -> EventAnalytics {
    if events.is_empty() {
        return EventAnalytics::default();
    }

    let peak_revenue = events.iter().map(|e| e.revenue).fold(0.0_f64, f64::max);
    let peak_tickets = events.iter().map(|e| e.tickets_sold).max().unwrap_or(0);
    let total_tickets: u64 = events.iter().map(|e| u64::from(e.tickets_sold)).sum();
    let total_capacity: u64 = events.iter().map(|e| u64::from(e.capacity)).sum();

    let rows = events
        .iter()
        .map(|e| {
            let attendance_pct = percent(f64::from(e.tickets_sold), f64::from(e.capacity));
            let revenue_vs_peak_pct = if peak_revenue > 0.0 {
                ((e.revenue - peak_revenue) / peak_revenue * 100.0).round()
            } else {
                0.0
            };

            let mut insights = Vec::new();
            if peak_revenue > 0.0 && money::money_eq(e.revenue, peak_revenue) {
                insights.push(EventInsight::TopRevenue);
            }
            if peak_tickets > 0 && e.tickets_sold == peak_tickets {
                insights.push(EventInsight::MostTickets);
            }
            if attendance_pct >= HIGH_ATTENDANCE_PCT {
                insights.push(EventInsight::HighAttendance);
            } else if attendance_pct < LOW_CONVERSION_PCT {
                insights.push(EventInsight::LowConversion);
            }

            EventPerformance {
                event_id: e.id,
                title: e.title.clone(),
                date: e.date,
                capacity: e.capacity,
                tickets_sold: e.tickets_sold,
                revenue: e.revenue,
                attendance_pct,
                revenue_vs_peak_pct,
                insights,
            }
        })
        .collect();

    EventAnalytics {
        total_events: events.len(),
        total_tickets,
        total_revenue: money::sum(events.iter().map(|e| e.revenue)),
        average_attendance_pct: percent(total_tickets as f64, total_capacity as f64),
        events: rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::test_support::{event, menu_item, order, reservation, table};
    use shared::models::SlotKey;

    #[test]
    fn test_order_stats_revenue_counts_settled_only() {
        let orders = vec![
            order(1, 100.0, OrderStatus::Paid),
            order(2, 50.5, OrderStatus::Completed),
            order(3, 70.0, OrderStatus::Pending),
            order(4, 999.0, OrderStatus::Cancelled),
        ];
        let stats = order_stats(&orders);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.paid, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.revenue, 150.5);
    }

    #[test]
    fn test_reservation_stats() {
        let list = vec![
            reservation(1, "A", "VIP 1", "1", ReservationStatus::Pending),
            reservation(2, "B", "VIP 2", "2", ReservationStatus::Pending),
            reservation(3, "C", "VIP 3", "3", ReservationStatus::Waitlisted),
            reservation(4, "D", "VIP 4", "4", ReservationStatus::Expired),
        ];
        let stats = reservation_stats(&list);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.confirmed, 0);
        assert_eq!(stats.waitlisted, 1);
        assert_eq!(stats.expired, 1);
    }

    #[test]
    fn test_menu_stats_categories_first_seen() {
        let mut items = vec![
            menu_item(1, "Mojito", "Cocktails"),
            menu_item(2, "Jollof", "Mains"),
            menu_item(3, "Negroni", "Cocktails"),
        ];
        items[1].is_available = false;
        items[2].popular = true;

        let stats = menu_stats(&items);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.available, 2);
        assert_eq!(stats.unavailable, 1);
        assert_eq!(stats.popular, 1);
        assert_eq!(stats.categories[0].category, "Cocktails");
        assert_eq!(stats.categories[0].count, 2);
        assert_eq!(stats.categories[1].category, "Mains");
    }

    #[test]
    fn test_dashboard_active_tables() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let tomorrow = today.succ_opt().unwrap();
        let mut busy = table(1, "VIP 1");
        busy.reserved_slots.push(SlotKey::new(today, "19:00"));
        let mut later = table(2, "VIP 2");
        later.reserved_slots.push(SlotKey::new(tomorrow, "19:00"));
        let tables = vec![busy, later, table(3, "VIP 3")];

        let orders = vec![order(1, 100.0, OrderStatus::Paid), order(2, 30.0, OrderStatus::Pending)];
        let stats = dashboard(&orders, 9, &[], &tables, today);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 100.0);
        assert_eq!(stats.total_menu_items, 9);
        assert_eq!(stats.active_tables, 1);
        assert_eq!(stats.total_tables, 3);

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json.get("activeTables").is_some());
    }

    #[test]
    fn test_event_analytics() {
        let events = vec![
            event(1, "Afro Night", 200, 180, 40_000.0),
            event(2, "Jazz Evening", 100, 50, 10_000.0),
            event(3, "Karaoke", 100, 70, 20_000.0),
        ];
        let analytics = event_analytics(&events);

        assert_eq!(analytics.total_events, 3);
        assert_eq!(analytics.total_tickets, 300);
        assert_eq!(analytics.total_revenue, 70_000.0);
        assert_eq!(analytics.average_attendance_pct, 75.0);

        let top = &analytics.events[0];
        assert_eq!(top.attendance_pct, 90.0);
        assert_eq!(top.revenue_vs_peak_pct, 0.0);
        assert_eq!(
            top.insights,
            vec![
                EventInsight::TopRevenue,
                EventInsight::MostTickets,
                EventInsight::HighAttendance
            ]
        );

        let jazz = &analytics.events[1];
        assert_eq!(jazz.revenue_vs_peak_pct, -75.0);
        assert_eq!(jazz.insights, vec![EventInsight::LowConversion]);

        assert!(analytics.events[2].insights.is_empty());
    }

    #[test]
    fn test_event_analytics_empty() {
        let analytics = event_analytics(&[]);
        assert_eq!(analytics.total_events, 0);
        assert!(analytics.events.is_empty());
    }
}
