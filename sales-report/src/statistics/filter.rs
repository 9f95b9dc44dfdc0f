//! Filter stage
//!
//! Selects the orders matching a [`SalesQuery`]: a conjunction of the
//! order-type predicate and the local business-date predicate. Input
//! order is preserved; downstream stages sort explicitly.

use shared::models::{Order, ReportCalendar, SalesQuery};

/// Filtered orders plus what the date predicate dropped for lack of a timestamp
#[derive(Debug, Clone, Default)]
pub struct Filtered<'a> {
    pub orders: Vec<&'a Order>,
    pub excluded_without_timestamp: u64,
}

/// Orders matching `query`, in input order
pub fn filter<'a>(orders: &'a [Order], query: &SalesQuery, calendar: &ReportCalendar) -> Vec<&'a Order> {
    filter_with_stats(orders, query, calendar).orders
}

/// Like [`filter`], also counting undated orders rejected by the date predicate
///
/// The date predicate is only active when the query has a date bound. A
/// type-only query therefore keeps undated orders: they count toward the
/// totals but can never appear in a time bucket.
pub fn filter_with_stats<'a>(
    orders: &'a [Order],
    query: &SalesQuery,
    calendar: &ReportCalendar,
) -> Filtered<'a> {
    let date_bounded = query.has_date_bounds();
    let mut excluded_without_timestamp = 0;

    let orders = orders
        .iter()
        .filter(|order| query.order_type_filter.matches(order.order_type))
        .filter(|order| {
            if !date_bounded {
                return true;
            }
            match order.business_date(calendar.day_cutoff) {
                Some(date) => query.contains_date(date),
                None => {
                    excluded_without_timestamp += 1;
                    false
                }
            }
        })
        .collect();

    Filtered {
        orders,
        excluded_without_timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use chrono_tz::Europe::Warsaw;
    use shared::models::{OrderType, OrderTypeFilter};

    fn order(id: &str, order_type: OrderType, local: Option<(u32, u32, u32, u32)>) -> Order {
        Order {
            id: id.to_string(),
            order_type,
            created_at: local.map(|(d, h, m, s)| Warsaw.with_ymd_and_hms(2024, 5, d, h, m, s).unwrap()),
            total_amount: 10.0,
            ..Default::default()
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn ids(orders: &[&Order]) -> Vec<String> {
        orders.iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_date_end_is_inclusive_in_local_time() {
        let orders = vec![
            order("last-second", OrderType::DineIn, Some((10, 23, 59, 59))),
            order("next-midnight", OrderType::DineIn, Some((11, 0, 0, 0))),
            order("day-before", OrderType::DineIn, Some((9, 23, 59, 59))),
        ];
        let query = SalesQuery::for_day(date(10));
        let calendar = ReportCalendar::new(Warsaw);

        assert_eq!(ids(&filter(&orders, &query, &calendar)), vec!["last-second"]);
    }

    #[test]
    fn test_type_predicate() {
        let orders = vec![
            order("a", OrderType::Delivery, Some((10, 12, 0, 0))),
            order("b", OrderType::Takeaway, Some((10, 12, 0, 0))),
            order("c", OrderType::Delivery, Some((10, 13, 0, 0))),
        ];
        let query = SalesQuery::for_day(date(10)).with_order_type(OrderTypeFilter::Delivery);
        let calendar = ReportCalendar::new(Warsaw);

        assert_eq!(ids(&filter(&orders, &query, &calendar)), vec!["a", "c"]);
    }

    #[test]
    fn test_undated_orders_excluded_from_date_bounded_query() {
        let orders = vec![
            order("dated", OrderType::DineIn, Some((10, 12, 0, 0))),
            order("undated", OrderType::DineIn, None),
        ];
        let calendar = ReportCalendar::new(Warsaw);

        let bounded = filter_with_stats(&orders, &SalesQuery::for_day(date(10)), &calendar);
        assert_eq!(ids(&bounded.orders), vec!["dated"]);
        assert_eq!(bounded.excluded_without_timestamp, 1);

        let type_only = filter_with_stats(&orders, &SalesQuery::default(), &calendar);
        assert_eq!(ids(&type_only.orders), vec!["dated", "undated"]);
        assert_eq!(type_only.excluded_without_timestamp, 0);
    }

    #[test]
    fn test_type_mismatch_not_counted_as_undated_exclusion() {
        let orders = vec![order("undated", OrderType::Takeaway, None)];
        let query = SalesQuery::for_day(date(10)).with_order_type(OrderTypeFilter::Delivery);
        let result = filter_with_stats(&orders, &query, &ReportCalendar::new(Warsaw));

        assert!(result.orders.is_empty());
        assert_eq!(result.excluded_without_timestamp, 0);
    }

    #[test]
    fn test_business_day_cutoff_moves_early_hours_back() {
        let orders = vec![
            order("late-night", OrderType::DineIn, Some((11, 1, 30, 0))),
            order("morning", OrderType::DineIn, Some((11, 9, 0, 0))),
        ];
        let calendar =
            ReportCalendar::new(Warsaw).with_cutoff(NaiveTime::from_hms_opt(2, 0, 0).unwrap());

        let day10 = filter(&orders, &SalesQuery::for_day(date(10)), &calendar);
        assert_eq!(ids(&day10), vec!["late-night"]);
        let day11 = filter(&orders, &SalesQuery::for_day(date(11)), &calendar);
        assert_eq!(ids(&day11), vec!["morning"]);
    }

    #[test]
    fn test_preserves_input_order() {
        let orders = vec![
            order("3", OrderType::DineIn, Some((10, 15, 0, 0))),
            order("1", OrderType::DineIn, Some((10, 9, 0, 0))),
            order("2", OrderType::DineIn, Some((10, 12, 0, 0))),
        ];
        let result = filter(&orders, &SalesQuery::default(), &ReportCalendar::new(Warsaw));
        assert_eq!(ids(&result), vec!["3", "1", "2"]);
    }
}
