//! Aggregation stage
//!
//! Turns the filtered orders into an [`AggregateResult`] in a single pass.
//! Pure and total: no error conditions, no NaN/Infinity in the output, and
//! identical input always yields identical output. Sums saturate at the
//! `Decimal` range instead of overflowing.
//!
//! Product grouping uses an explicit name → accumulator index over an
//! insertion-ordered vector, so the tie-break (first-seen product wins) is
//! carried by a stable sort and never by hash-map iteration order.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use shared::models::{
    AggregateResult, DailyRevenue, DataQuality, HourBucket, HourlyMode, Order, OrderType,
    OrderTypeSales, PaymentMethod, PaymentMethodSales, PaymentStatus, PaymentStatusBreakdown,
    ProductSales, RankingKey, SalesSummary,
};
use shared::util::DATE_FORMAT;

use crate::order_money::{percentage, safe_div, to_decimal, to_f64, top_n};

const HOURS_PER_DAY: usize = 24;

/// Default ranking length used by the dashboard
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Aggregation settings chosen by the call site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub ranking_key: RankingKey,
    pub top_n: usize,
    pub hourly_mode: HourlyMode,
    /// Business-day boundary for the daily series
    pub day_cutoff: NaiveTime,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            ranking_key: RankingKey::Revenue,
            top_n: DEFAULT_TOP_PRODUCTS,
            hourly_mode: HourlyMode::Dense,
            day_cutoff: NaiveTime::MIN,
        }
    }
}

impl AggregateOptions {
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_ranking_key(mut self, key: RankingKey) -> Self {
        self.ranking_key = key;
        self
    }

    pub fn with_hourly_mode(mut self, mode: HourlyMode) -> Self {
        self.hourly_mode = mode;
        self
    }
}

/// Aggregate the (already filtered) orders
pub fn aggregate<'a, I>(orders: I, options: &AggregateOptions) -> AggregateResult
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut acc = SalesAccumulator::default();
    for order in orders {
        acc.add(order, options.day_cutoff);
    }
    acc.finish(options)
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    order_count: u64,
    revenue: Decimal,
}

impl Bucket {
    fn add(&mut self, amount: Decimal) {
        self.order_count += 1;
        self.revenue = self.revenue.saturating_add(amount);
    }
}

#[derive(Debug, Clone)]
struct ProductAccumulator {
    name: String,
    quantity: u64,
    revenue: Decimal,
}

#[derive(Debug, Default)]
struct SalesAccumulator {
    order_count: u64,
    total_revenue: Decimal,
    total_tips: Decimal,
    total_discounts: Decimal,
    // Indexed by enum discriminant, declaration order
    by_type: [Bucket; 3],
    by_method: [Bucket; 4],
    statuses: PaymentStatusBreakdown,
    // First-seen order; `product_index` maps name → position
    products: Vec<ProductAccumulator>,
    product_index: HashMap<String, usize>,
    hours: [Bucket; HOURS_PER_DAY],
    days: BTreeMap<NaiveDate, Bucket>,
    quality: DataQuality,
}

impl SalesAccumulator {
    fn add(&mut self, order: &Order, day_cutoff: NaiveTime) {
        let amount = to_decimal(order.total_amount).max(Decimal::ZERO);

        self.order_count += 1;
        self.total_revenue = self.total_revenue.saturating_add(amount);
        self.total_tips = self
            .total_tips
            .saturating_add(to_decimal(order.tip_amount).max(Decimal::ZERO));
        self.total_discounts = self
            .total_discounts
            .saturating_add(to_decimal(order.discount_amount).max(Decimal::ZERO));

        self.by_type[order.order_type as usize].add(amount);
        self.by_method[order.payment_method as usize].add(amount);

        match order.payment_status {
            Some(PaymentStatus::Paid) => self.statuses.paid += 1,
            Some(PaymentStatus::Pending) => self.statuses.pending += 1,
            Some(PaymentStatus::Cancelled) => self.statuses.cancelled += 1,
            None => self.statuses.unspecified += 1,
        }

        for item in &order.items {
            let line = to_decimal(item.price)
                .saturating_mul(Decimal::from(item.quantity))
                .max(Decimal::ZERO);
            let idx = match self.product_index.get(&item.name) {
                Some(&idx) => idx,
                None => {
                    self.products.push(ProductAccumulator {
                        name: item.name.clone(),
                        quantity: 0,
                        revenue: Decimal::ZERO,
                    });
                    let idx = self.products.len() - 1;
                    self.product_index.insert(item.name.clone(), idx);
                    idx
                }
            };
            let product = &mut self.products[idx];
            product.quantity = product.quantity.saturating_add(u64::from(item.quantity));
            product.revenue = product.revenue.saturating_add(line);
        }

        match (order.local_hour(), order.business_date(day_cutoff)) {
            (Some(hour), Some(date)) => {
                if let Some(bucket) = self.hours.get_mut(hour as usize) {
                    bucket.add(amount);
                }
                self.days.entry(date).or_default().add(amount);
            }
            _ => self.quality.included_without_timestamp += 1,
        }

        if order.flags.amount_fallback {
            self.quality.amount_fallbacks += 1;
        }
        if order.flags.amount_conflict {
            self.quality.amount_conflicts += 1;
        }
        if order.flags.amount_clamped {
            self.quality.clamped_amounts += 1;
        }
        if order.flags.quantity_adjusted {
            self.quality.adjusted_quantities += 1;
        }
    }

    fn finish(self, options: &AggregateOptions) -> AggregateResult {
        let total = self.total_revenue;
        let method_revenue = |method: PaymentMethod| to_f64(self.by_method[method as usize].revenue);

        let summary = SalesSummary {
            order_count: self.order_count,
            total_revenue: to_f64(total),
            average_order_value: to_f64(safe_div(total, Decimal::from(self.order_count))),
            cash_revenue: method_revenue(PaymentMethod::Cash),
            card_revenue: method_revenue(PaymentMethod::Card),
            split_revenue: method_revenue(PaymentMethod::Split),
            total_tips: to_f64(self.total_tips),
            total_discounts: to_f64(self.total_discounts),
        };

        let order_type_breakdown = OrderType::ALL
            .iter()
            .map(|&order_type| {
                let bucket = self.by_type[order_type as usize];
                OrderTypeSales {
                    order_type,
                    order_count: bucket.order_count,
                    revenue: to_f64(bucket.revenue),
                    revenue_share: percentage(bucket.revenue, total),
                }
            })
            .collect();

        let payment_method_breakdown = PaymentMethod::ALL
            .iter()
            .map(|&method| {
                let bucket = self.by_method[method as usize];
                PaymentMethodSales {
                    method,
                    order_count: bucket.order_count,
                    revenue: to_f64(bucket.revenue),
                    revenue_share: percentage(bucket.revenue, total),
                }
            })
            .collect();

        let hourly_distribution = self
            .hours
            .iter()
            .enumerate()
            .filter(|(_, bucket)| options.hourly_mode == HourlyMode::Dense || bucket.order_count > 0)
            .map(|(hour, bucket)| HourBucket {
                hour: hour as u32,
                order_count: bucket.order_count,
                revenue: to_f64(bucket.revenue),
            })
            .collect();

        // BTreeMap iteration is ascending by date
        let daily_revenue_series = self
            .days
            .iter()
            .map(|(date, bucket)| DailyRevenue {
                date: date.format(DATE_FORMAT).to_string(),
                revenue: to_f64(bucket.revenue),
                order_count: bucket.order_count,
            })
            .collect();

        AggregateResult {
            summary,
            product_ranking: rank_products(self.products, options),
            hourly_distribution,
            daily_revenue_series,
            order_type_breakdown,
            payment_method_breakdown,
            payment_status_breakdown: self.statuses,
            data_quality: self.quality,
        }
    }
}

/// Sort descending by the requested key and keep the top N
///
/// `sort_by` is stable, so equal keys keep first-seen order.
fn rank_products(mut products: Vec<ProductAccumulator>, options: &AggregateOptions) -> Vec<ProductSales> {
    match options.ranking_key {
        RankingKey::Revenue => products.sort_by(|a, b| b.revenue.cmp(&a.revenue)),
        RankingKey::Quantity => products.sort_by(|a, b| b.quantity.cmp(&a.quantity)),
    }

    top_n(products, options.top_n)
        .into_iter()
        .map(|p| ProductSales {
            name: p.name,
            quantity: p.quantity,
            revenue: to_f64(p.revenue),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
