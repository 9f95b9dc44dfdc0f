//! Order Model
//!
//! Canonical (normalized) order shape. Raw records of any spelling are
//! mapped onto these types by the normalizer; nothing downstream ever sees
//! a raw field name.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::util;

/// Order type (normalized)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

impl OrderType {
    /// Declaration order, used for fixed-order breakdowns
    pub const ALL: [OrderType; 3] = [OrderType::DineIn, OrderType::Takeaway, OrderType::Delivery];

    /// Map a raw order-type spelling onto the canonical enum
    ///
    /// | raw | canonical |
    /// |-----|-----------|
    /// | `nowe`, `namiejscu`, `dine_in` | dine_in |
    /// | `odbior`, `takeaway` | takeaway |
    /// | `dostawa`, `delivery` | delivery |
    ///
    /// Anything else is `dine_in`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dostawa" | "delivery" => OrderType::Delivery,
            "odbior" | "takeaway" => OrderType::Takeaway,
            "nowe" | "namiejscu" | "dine_in" => OrderType::DineIn,
            _ => OrderType::DineIn,
        }
    }
}

/// Payment method (normalized)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Split,
    #[default]
    Unknown,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Split,
        PaymentMethod::Unknown,
    ];

    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "card" => PaymentMethod::Card,
            "split" => PaymentMethod::Split,
            _ => PaymentMethod::Unknown,
        }
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Cancelled,
}

impl PaymentStatus {
    /// Unrecognized spellings yield `None` (status is optional)
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            "cancelled" | "canceled" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }
}

/// Order item (one product line)
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub name: String,
    /// Always >= 1 and bounded
    pub quantity: u32,
    /// Unit price in currency unit, always >= 0 and bounded
    pub price: f64,
}

/// Data-quality markers recorded while normalizing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFlags {
    /// `createdAt` missing or unparsable
    pub invalid_timestamp: bool,
    /// Declared amount field absent, the alternate field was read
    pub amount_fallback: bool,
    /// `total_amount` and `total_price` both present and different
    pub amount_conflict: bool,
    /// A total, tip, discount or unit price was above its limit and capped
    pub amount_clamped: bool,
    /// An item quantity was not a whole number within 1..=limit
    pub quantity_adjusted: bool,
}

/// Order entity (normalized, read-only)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id: String,
    pub order_number: Option<String>,
    /// Creation instant in the report timezone
    pub created_at: Option<DateTime<Tz>>,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub payment_status: Option<PaymentStatus>,
    /// Total amount in currency unit, >= 0
    pub total_amount: f64,
    /// Tip amount in currency unit, >= 0
    pub tip_amount: f64,
    /// Discount amount in currency unit, >= 0
    pub discount_amount: f64,
    pub items: Vec<OrderItem>,
    pub flags: OrderFlags,
}

impl Order {
    /// Human-facing number, falling back to the id
    pub fn display_number(&self) -> &str {
        self.order_number.as_deref().unwrap_or(&self.id)
    }

    /// Business date in the report calendar, `None` without a timestamp
    pub fn business_date(&self, cutoff: NaiveTime) -> Option<NaiveDate> {
        self.created_at
            .as_ref()
            .map(|dt| util::business_date(dt.naive_local(), cutoff))
    }

    /// Local clock hour (0-23)
    pub fn local_hour(&self) -> Option<u32> {
        self.created_at.as_ref().map(|dt| dt.hour())
    }
}
