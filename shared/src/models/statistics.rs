//! Sales Statistics Model (销售统计)
//!
//! Output value objects of the aggregation stage. Fully derived from the
//! filtered orders; recomputed on every query change.

use serde::{Deserialize, Serialize};

use super::order::{OrderType, PaymentMethod};

/// Headline numbers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub order_count: u64,
    pub total_revenue: f64,
    /// 0 when there are no orders
    pub average_order_value: f64,
    pub cash_revenue: f64,
    pub card_revenue: f64,
    pub split_revenue: f64,
    pub total_tips: f64,
    pub total_discounts: f64,
}

/// One row of the product ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSales {
    pub name: String,
    pub quantity: u64,
    pub revenue: f64,
}

/// Orders and revenue within one local clock hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourBucket {
    /// 0-23
    pub hour: u32,
    pub order_count: u64,
    pub revenue: f64,
}

/// Orders and revenue on one business date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    /// Business date (YYYY-MM-DD format)
    pub date: String,
    pub revenue: f64,
    pub order_count: u64,
}

/// Order type breakdown row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTypeSales {
    pub order_type: OrderType,
    pub order_count: u64,
    pub revenue: f64,
    /// Percent of total revenue (0-100)
    pub revenue_share: f64,
}

/// Payment method breakdown row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodSales {
    pub method: PaymentMethod,
    pub order_count: u64,
    pub revenue: f64,
    /// Percent of total revenue (0-100)
    pub revenue_share: f64,
}

/// Order count per payment status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStatusBreakdown {
    pub paid: u64,
    pub pending: u64,
    pub cancelled: u64,
    pub unspecified: u64,
}

/// Known source inconsistencies, counted instead of hidden
///
/// - `excluded_without_timestamp`: dropped by a date-bounded query
/// - `included_without_timestamp`: counted in totals of a query with no
///   date bound, but absent from the hourly and daily views
/// - `clamped_amounts` / `adjusted_quantities`: orders whose values were
///   capped or rounded while normalizing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQuality {
    pub excluded_without_timestamp: u64,
    pub included_without_timestamp: u64,
    pub amount_fallbacks: u64,
    pub amount_conflicts: u64,
    #[serde(default)]
    pub clamped_amounts: u64,
    #[serde(default)]
    pub adjusted_quantities: u64,
}

/// Full aggregation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub summary: SalesSummary,
    pub product_ranking: Vec<ProductSales>,
    pub hourly_distribution: Vec<HourBucket>,
    pub daily_revenue_series: Vec<DailyRevenue>,
    pub order_type_breakdown: Vec<OrderTypeSales>,
    pub payment_method_breakdown: Vec<PaymentMethodSales>,
    pub payment_status_breakdown: PaymentStatusBreakdown,
    pub data_quality: DataQuality,
}
