//! Revenue trend and section split

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use shared::models::{Analytics, DailyRevenue, MenuSection, Order, OrderStatus, SectionCount};
use shared::money;

/// Daily revenue (settled orders, oldest day first) plus order counts per
/// section (cancelled orders excluded)
pub fn analytics(orders: &[Order]) -> Analytics {
    let mut by_day: BTreeMap<_, (Decimal, usize)> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.status.is_settled()) {
        let entry = by_day
            .entry(order.created_at.date_naive())
            .or_insert((Decimal::ZERO, 0));
        entry.0 += money::to_decimal(order.total);
        entry.1 += 1;
    }
    let settled: usize = by_day.values().map(|(_, n)| n).sum();
    let revenue: Decimal = by_day.values().map(|(r, _)| *r).sum();

    let revenue_by_day = by_day
        .into_iter()
        .map(|(date, (revenue, orders))| DailyRevenue {
            date,
            revenue: money::to_f64(revenue),
            orders,
        })
        .collect();

    let live = orders.iter().filter(|o| o.status != OrderStatus::Cancelled);
    let (mut kitchen, mut bar) = (0, 0);
    for order in live {
        match order.section() {
            MenuSection::Kitchen => kitchen += 1,
            MenuSection::Bar => bar += 1,
        }
    }

    let average_order_value = if settled == 0 {
        0.0
    } else {
        money::to_f64(revenue / Decimal::from(settled))
    };

    Analytics {
        revenue_by_day,
        orders_by_section: vec![
            SectionCount {
                section: MenuSection::Kitchen.label().to_string(),
                orders: kitchen,
            },
            SectionCount {
                section: MenuSection::Bar.label().to_string(),
                orders: bar,
            },
        ],
        average_order_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::test_support::order;
    use chrono::Duration;

    #[test]
    fn test_revenue_grouped_by_day() {
        let mut a = order(1, 100.0, OrderStatus::Paid);
        let mut b = order(2, 50.0, OrderStatus::Completed);
        let c = order(3, 25.0, OrderStatus::Paid);
        let d = order(4, 500.0, OrderStatus::Cancelled);
        a.created_at -= Duration::days(1);
        b.created_at -= Duration::days(1);

        let result = analytics(&[c.clone(), a, b, d]);
        assert_eq!(result.revenue_by_day.len(), 2);
        assert_eq!(result.revenue_by_day[0].revenue, 150.0);
        assert_eq!(result.revenue_by_day[0].orders, 2);
        assert_eq!(result.revenue_by_day[1].date, c.created_at.date_naive());
        assert_eq!(result.revenue_by_day[1].revenue, 25.0);
        assert_eq!(result.average_order_value, 58.33);
    }

    #[test]
    fn test_section_split() {
        let mut drinks = order(1, 90.0, OrderStatus::Pending);
        drinks.items[0].section = MenuSection::Bar;
        let food = order(2, 120.0, OrderStatus::Paid);
        let cancelled = order(3, 10.0, OrderStatus::Cancelled);

        let result = analytics(&[drinks, food, cancelled]);
        assert_eq!(result.orders_by_section[0].section, "Kitchen");
        assert_eq!(result.orders_by_section[0].orders, 1);
        assert_eq!(result.orders_by_section[1].section, "Bar");
        assert_eq!(result.orders_by_section[1].orders, 1);
    }

    #[test]
    fn test_no_orders() {
        let result = analytics(&[]);
        assert!(result.revenue_by_day.is_empty());
        assert_eq!(result.average_order_value, 0.0);
    }
}
