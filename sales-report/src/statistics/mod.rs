//! Statistics 模块 (销售统计)
//!
//! Pipeline: raw records → [`normalize`] → [`filter`] → [`aggregate`].
//! Every stage is a pure function; the caller re-runs the whole pipeline
//! whenever the order set or the query changes.

mod aggregate;
mod filter;
mod normalize;

pub use aggregate::{AggregateOptions, DEFAULT_TOP_PRODUCTS, aggregate};
pub use filter::{Filtered, filter, filter_with_stats};
pub use normalize::{NormalizeOptions, normalize, normalize_all};

use shared::models::{AggregateResult, Order, ReportCalendar, SalesQuery};

/// Filter + aggregate in one call
///
/// The calendar's cutoff drives both the date predicate and the daily
/// series, so the two never disagree about which day an order belongs to.
pub fn build_report(
    orders: &[Order],
    query: &SalesQuery,
    calendar: &ReportCalendar,
    options: &AggregateOptions,
) -> AggregateResult {
    let filtered = filter_with_stats(orders, query, calendar);
    let options = AggregateOptions {
        day_cutoff: calendar.day_cutoff,
        ..*options
    };

    let mut result = aggregate(filtered.orders.iter().copied(), &options);
    result.data_quality.excluded_without_timestamp = filtered.excluded_without_timestamp;

    tracing::debug!(
        input = orders.len(),
        matched = result.summary.order_count,
        excluded_without_timestamp = filtered.excluded_without_timestamp,
        "Sales report built"
    );
    result
}
