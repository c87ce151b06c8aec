//! Order-preserving list filters for the back-office screens

use shared::models::{
    MenuItem, Order, OrderFilter, Reservation, ReservationFilter,
};

fn normalized(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Category filter (`All` or blank means no filter) plus case-insensitive
/// name search
pub fn filter_menu(items: &[MenuItem], category: Option<&str>, search: Option<&str>) -> Vec<MenuItem> {
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
    let search = normalized(search);

    items
        .iter()
        .filter(|i| category.is_none_or(|c| i.category.eq_ignore_ascii_case(c)))
        .filter(|i| {
            search
                .as_deref()
                .is_none_or(|s| i.name.to_lowercase().contains(s))
        })
        .cloned()
        .collect()
}

pub fn filter_orders(orders: &[Order], filter: OrderFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| filter.matches(o.status))
        .cloned()
        .collect()
}

/// Status filter plus search over customer name, table name (both
/// case-insensitive) and phone (substring)
pub fn filter_reservations(
    reservations: &[Reservation],
    filter: ReservationFilter,
    search: Option<&str>,
) -> Vec<Reservation> {
    let raw = search.map(str::trim).filter(|s| !s.is_empty());
    let lowered = normalized(search);

    reservations
        .iter()
        .filter(|r| filter.matches(r.status))
        .filter(|r| match (raw, lowered.as_deref()) {
            (Some(raw), Some(q)) => {
                r.customer_name.to_lowercase().contains(q)
                    || r.table_name
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(q))
                    || r.phone.contains(raw)
            }
            _ => true,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::test_support::{menu_item, order, reservation};
    use shared::models::{OrderStatus, ReservationStatus};

    #[test]
    fn test_menu_filter_preserves_order() {
        let items = vec![
            menu_item(1, "Mojito", "Cocktails"),
            menu_item(2, "Jollof", "Mains"),
            menu_item(3, "Mango Mojito", "Cocktails"),
        ];

        let result = filter_menu(&items, Some("cocktails"), None);
        assert_eq!(result.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);

        let result = filter_menu(&items, Some("All"), Some("  MOJ "));
        assert_eq!(result.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);

        let result = filter_menu(&items, None, Some(""));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_order_filter() {
        let orders = vec![
            order(1, 100.0, OrderStatus::Paid),
            order(2, 50.0, OrderStatus::Completed),
            order(3, 70.0, OrderStatus::Paid),
        ];
        let paid = filter_orders(&orders, OrderFilter::Paid);
        assert_eq!(paid.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(filter_orders(&orders, OrderFilter::All).len(), 3);
    }

    #[test]
    fn test_reservation_search() {
        let list = vec![
            reservation(1, "Ama Mensah", "VIP 1", "0244123456", ReservationStatus::Pending),
            reservation(2, "Kofi Boateng", "Lounge 2", "0209998888", ReservationStatus::Confirmed),
            reservation(3, "Akua", "VIP 2", "0551112222", ReservationStatus::Expired),
        ];

        let by_name = filter_reservations(&list, ReservationFilter::All, Some("ama"));
        assert_eq!(by_name.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1]);

        let by_table = filter_reservations(&list, ReservationFilter::All, Some("vip"));
        assert_eq!(by_table.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);

        let by_phone = filter_reservations(&list, ReservationFilter::All, Some("9998"));
        assert_eq!(by_phone.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2]);

        let combined = filter_reservations(&list, ReservationFilter::Expired, Some("vip"));
        assert_eq!(combined.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
    }
}
