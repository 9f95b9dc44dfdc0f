//! Report Query Model
//!
//! Value objects describing *what* to aggregate. The caller owns their
//! lifecycle and rebuilds the report whenever one of them changes.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::order::OrderType;
use crate::error::{AppError, AppResult};
use crate::util;

/// Order type filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderTypeFilter {
    #[default]
    All,
    DineIn,
    Takeaway,
    Delivery,
}

impl OrderTypeFilter {
    pub fn matches(&self, order_type: OrderType) -> bool {
        match self {
            OrderTypeFilter::All => true,
            OrderTypeFilter::DineIn => order_type == OrderType::DineIn,
            OrderTypeFilter::Takeaway => order_type == OrderType::Takeaway,
            OrderTypeFilter::Delivery => order_type == OrderType::Delivery,
        }
    }
}

impl FromStr for OrderTypeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(OrderTypeFilter::All),
            "dine_in" => Ok(OrderTypeFilter::DineIn),
            "takeaway" => Ok(OrderTypeFilter::Takeaway),
            "delivery" => Ok(OrderTypeFilter::Delivery),
            other => Err(AppError::validation(format!("Unknown order type filter: {}", other))),
        }
    }
}

/// Sales query: inclusive local-date range plus order type
///
/// A missing bound leaves that side of the range open. With both bounds
/// missing the date predicate is off entirely, so orders without a usable
/// timestamp take part in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesQuery {
    pub date_start: Option<NaiveDate>,
    pub date_end: Option<NaiveDate>,
    #[serde(default)]
    pub order_type_filter: OrderTypeFilter,
}

impl SalesQuery {
    /// Query covering a single local day
    pub fn for_day(date: NaiveDate) -> Self {
        Self {
            date_start: Some(date),
            date_end: Some(date),
            order_type_filter: OrderTypeFilter::All,
        }
    }

    pub fn with_order_type(mut self, filter: OrderTypeFilter) -> Self {
        self.order_type_filter = filter;
        self
    }

    /// Whether any date bound is set
    pub fn has_date_bounds(&self) -> bool {
        self.date_start.is_some() || self.date_end.is_some()
    }

    /// Inclusive range check on a business date
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_start.is_none_or(|start| start <= date)
            && self.date_end.is_none_or(|end| date <= end)
    }

    /// Reject a range whose start lies after its end
    pub fn validate(&self) -> AppResult<()> {
        match (self.date_start, self.date_end) {
            (Some(start), Some(end)) if start > end => Err(AppError::validation(format!(
                "Date range start {} is after end {}",
                start, end
            ))
            .with_detail("date_start", start.to_string())
            .with_detail("date_end", end.to_string())),
            _ => Ok(()),
        }
    }

    /// Date a single-file export is named after
    ///
    /// The start bound, else the end bound, else the business date of `now`.
    pub fn report_date(&self, calendar: &ReportCalendar, now: DateTime<Utc>) -> NaiveDate {
        self.date_start.or(self.date_end).unwrap_or_else(|| {
            let local = now.with_timezone(&calendar.timezone);
            util::business_date(local.naive_local(), calendar.day_cutoff)
        })
    }
}

/// Report calendar: what "local" means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCalendar {
    pub timezone: Tz,
    /// Business-day boundary; `00:00` means plain calendar days
    pub day_cutoff: NaiveTime,
}

impl ReportCalendar {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            day_cutoff: NaiveTime::MIN,
        }
    }

    pub fn with_cutoff(mut self, cutoff: NaiveTime) -> Self {
        self.day_cutoff = cutoff;
        self
    }
}

impl Default for ReportCalendar {
    fn default() -> Self {
        Self::new(chrono_tz::UTC)
    }
}

/// Which raw monetary field is canonical for `total_amount`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    #[default]
    TotalAmount,
    TotalPrice,
}

impl FromStr for AmountField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total_amount" | "totalamount" => Ok(AmountField::TotalAmount),
            "total_price" | "totalprice" => Ok(AmountField::TotalPrice),
            other => Err(AppError::validation(format!("Unknown amount field: {}", other))),
        }
    }
}

/// Product ranking metric
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankingKey {
    #[default]
    Revenue,
    Quantity,
}

impl FromStr for RankingKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revenue" => Ok(RankingKey::Revenue),
            "quantity" => Ok(RankingKey::Quantity),
            other => Err(AppError::validation(format!("Unknown ranking key: {}", other))),
        }
    }
}

/// Hourly distribution layout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HourlyMode {
    /// All 24 buckets, zero-filled (fixed length for charts)
    #[default]
    Dense,
    /// Only hours with at least one order
    Sparse,
}
