//! Order normalizer
//!
//! Maps heterogeneous raw order records (JSON values) onto [`Order`].
//! Never fails: every missing or malformed field resolves to its
//! documented default, so historical records with odd shapes never abort
//! a report.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde_json::{Map, Value};
use shared::models::{
    AmountField, Order, OrderFlags, OrderItem, OrderType, PaymentMethod, PaymentStatus,
    ReportCalendar,
};
use shared::util;

use crate::order_money::{MAX_ORDER_AMOUNT, MAX_PRICE, MAX_QUANTITY};

// Accepted field spellings, first present non-null key wins
const ID_KEYS: &[&str] = &["id", "_id", "orderId", "order_id"];
const ORDER_NUMBER_KEYS: &[&str] = &["orderNumber", "order_number", "number"];
const CREATED_AT_KEYS: &[&str] = &["createdAt", "created_at", "date"];
const ORDER_TYPE_KEYS: &[&str] = &["orderType", "order_type", "type"];
const PAYMENT_METHOD_KEYS: &[&str] = &["paymentMethod", "payment_method"];
const PAYMENT_STATUS_KEYS: &[&str] = &["paymentStatus", "payment_status", "status"];
const TOTAL_AMOUNT_KEYS: &[&str] = &["totalAmount", "total_amount"];
const TOTAL_PRICE_KEYS: &[&str] = &["totalPrice", "total_price"];
const TIP_KEYS: &[&str] = &["tipAmount", "tip_amount", "tip"];
const DISCOUNT_KEYS: &[&str] = &["discountAmount", "discount_amount", "discount"];
const ITEMS_KEYS: &[&str] = &["items", "orderItems", "order_items"];

const ITEM_NAME_KEYS: &[&str] = &["name", "productName", "product_name"];
const ITEM_QUANTITY_KEYS: &[&str] = &["quantity", "qty"];
const ITEM_PRICE_KEYS: &[&str] = &["price", "unitPrice", "unit_price"];

/// Naive timestamp layouts, read in the report timezone
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalization settings
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Canonical monetary field for `total_amount`
    pub amount_field: AmountField,
    /// Timezone for naive timestamps and for the stored instant
    pub calendar: ReportCalendar,
}

/// Normalize one raw record
pub fn normalize(raw: &Value, options: &NormalizeOptions) -> Order {
    let Some(obj) = raw.as_object() else {
        tracing::debug!("Raw order is not a JSON object, using defaults");
        return Order {
            flags: OrderFlags {
                invalid_timestamp: true,
                ..Default::default()
            },
            ..Default::default()
        };
    };

    let mut flags = OrderFlags::default();
    let tz = options.calendar.timezone;

    let id = field(obj, ID_KEYS).and_then(text).unwrap_or_default();
    let order_number = field(obj, ORDER_NUMBER_KEYS).and_then(text);

    let created_at = field(obj, CREATED_AT_KEYS).and_then(|v| parse_timestamp(v, tz));
    flags.invalid_timestamp = created_at.is_none();

    let order_type = field(obj, ORDER_TYPE_KEYS)
        .and_then(text)
        .map(|s| OrderType::from_raw(&s))
        .unwrap_or_default();
    let payment_method = field(obj, PAYMENT_METHOD_KEYS)
        .and_then(text)
        .map(|s| PaymentMethod::from_raw(&s))
        .unwrap_or_default();
    let payment_status = field(obj, PAYMENT_STATUS_KEYS)
        .and_then(text)
        .and_then(|s| PaymentStatus::from_raw(&s));

    let total_amount = resolve_total(obj, options.amount_field, &mut flags);

    Order {
        id,
        order_number,
        created_at,
        order_type,
        payment_method,
        payment_status,
        total_amount,
        tip_amount: money(field(obj, TIP_KEYS), MAX_ORDER_AMOUNT, &mut flags),
        discount_amount: money(field(obj, DISCOUNT_KEYS), MAX_ORDER_AMOUNT, &mut flags),
        items: items(obj, &mut flags),
        flags,
    }
}

/// Normalize a sequence, preserving order
pub fn normalize_all(raws: &[Value], options: &NormalizeOptions) -> Vec<Order> {
    let orders: Vec<Order> = raws.iter().map(|raw| normalize(raw, options)).collect();

    let undated = orders.iter().filter(|o| o.flags.invalid_timestamp).count();
    if undated > 0 {
        tracing::debug!(
            total = orders.len(),
            undated,
            "Some orders have no usable timestamp"
        );
    }
    orders
}

/// Resolve the order total from the declared canonical field
///
/// The alternate field is only read when the declared one is absent; both
/// situations that make the choice matter are flagged on the order.
fn resolve_total(obj: &Map<String, Value>, declared: AmountField, flags: &mut OrderFlags) -> f64 {
    let total_amount = field(obj, TOTAL_AMOUNT_KEYS).and_then(number);
    let total_price = field(obj, TOTAL_PRICE_KEYS).and_then(number);

    if let (Some(a), Some(b)) = (total_amount, total_price)
        && a != b
    {
        flags.amount_conflict = true;
    }

    let (primary, alternate) = match declared {
        AmountField::TotalAmount => (total_amount, total_price),
        AmountField::TotalPrice => (total_price, total_amount),
    };

    let value = match (primary, alternate) {
        (Some(v), _) => v,
        (None, Some(v)) => {
            flags.amount_fallback = true;
            v
        }
        (None, None) => 0.0,
    };
    cap(value.max(0.0), MAX_ORDER_AMOUNT, flags)
}

fn items(obj: &Map<String, Value>, flags: &mut OrderFlags) -> Vec<OrderItem> {
    let Some(Value::Array(raw_items)) = field(obj, ITEMS_KEYS) else {
        return Vec::new();
    };
    // Non-object entries carry no product, skip them
    raw_items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| normalize_item(item, flags))
        .collect()
}

fn normalize_item(obj: &Map<String, Value>, flags: &mut OrderFlags) -> OrderItem {
    // Names are kept verbatim: grouping is exact-match
    let name = match field(obj, ITEM_NAME_KEYS) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let quantity = match field(obj, ITEM_QUANTITY_KEYS) {
        None => 1,
        Some(raw) => item_quantity(raw, flags),
    };

    OrderItem {
        name,
        quantity,
        price: money(field(obj, ITEM_PRICE_KEYS), MAX_PRICE, flags),
    }
}

/// Whole quantity in `1..=MAX_QUANTITY`
///
/// Anything else is clamped into range, fractions truncated (`2.5` → 2),
/// and flagged.
fn item_quantity(raw: &Value, flags: &mut OrderFlags) -> u32 {
    let max = f64::from(MAX_QUANTITY);
    match number(raw) {
        Some(q) if q.fract() == 0.0 && (1.0..=max).contains(&q) => q as u32,
        parsed => {
            flags.quantity_adjusted = true;
            parsed.map(|q| q.clamp(1.0, max) as u32).unwrap_or(1)
        }
    }
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Trimmed non-empty string; numbers are stringified
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Finite number from a JSON number or numeric string (`"12.50"`, `"12,50"`)
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Money value in `0..=max`, 0 when absent or malformed
fn money(value: Option<&Value>, max: f64, flags: &mut OrderFlags) -> f64 {
    let amount = value.and_then(number).map(|n| n.max(0.0)).unwrap_or(0.0);
    cap(amount, max, flags)
}

fn cap(amount: f64, max: f64, flags: &mut OrderFlags) -> f64 {
    if amount > max {
        flags.amount_clamped = true;
        max
    } else {
        amount
    }
}

fn parse_timestamp(value: &Value, tz: Tz) -> Option<DateTime<Tz>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(|millis| util::from_millis(millis, tz)),
        Value::String(s) => parse_timestamp_str(s.trim(), tz),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str, tz: Tz) -> Option<DateTime<Tz>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&tz));
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(util::localize(naive, tz));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, util::DATE_FORMAT) {
        return Some(util::localize(date.and_time(NaiveTime::MIN), tz));
    }
    // Unix millis sent as a string
    s.parse::<i64>()
        .ok()
        .and_then(|millis| util::from_millis(millis, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    fn options() -> NormalizeOptions {
        NormalizeOptions {
            amount_field: AmountField::TotalAmount,
            calendar: ReportCalendar::new(chrono_tz::Europe::Warsaw),
        }
    }

    #[test]
    fn test_camel_case_record() {
        let raw = json!({
            "id": "o-1",
            "orderNumber": "A/001",
            "createdAt": "2024-05-10T12:30:00Z",
            "orderType": "dostawa",
            "paymentMethod": "cash",
            "paymentStatus": "paid",
            "totalAmount": 100,
            "tipAmount": 5.5,
            "discountAmount": "2,50",
            "items": [{ "name": "Pizza", "quantity": 2, "price": 40 }]
        });
        let order = normalize(&raw, &options());

        assert_eq!(order.id, "o-1");
        assert_eq!(order.display_number(), "A/001");
        assert_eq!(order.order_type, OrderType::Delivery);
        assert_eq!(order.payment_method, PaymentMethod::Cash);
        assert_eq!(order.payment_status, Some(PaymentStatus::Paid));
        assert_eq!(order.total_amount, 100.0);
        assert_eq!(order.tip_amount, 5.5);
        assert_eq!(order.discount_amount, 2.5);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        // 12:30 UTC is 14:30 in Warsaw (CEST)
        assert_eq!(order.local_hour(), Some(14));
        assert_eq!(order.flags, OrderFlags::default());
    }

    #[test]
    fn test_snake_case_record() {
        let raw = json!({
            "id": 7,
            "created_at": "2024-05-10 18:05:00",
            "order_type": "odbior",
            "payment_method": "card",
            "total_amount": "49.90",
            "items": [{ "product_name": "Zupa", "qty": 1, "unit_price": 12.0 }]
        });
        let order = normalize(&raw, &options());

        assert_eq!(order.id, "7");
        assert_eq!(order.display_number(), "7");
        assert_eq!(order.order_type, OrderType::Takeaway);
        assert_eq!(order.payment_method, PaymentMethod::Card);
        assert_eq!(order.total_amount, 49.9);
        assert_eq!(order.items[0].name, "Zupa");
        // Naive timestamps are local
        assert_eq!(order.local_hour(), Some(18));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let order = normalize(&json!({}), &options());

        assert_eq!(order.id, "");
        assert_eq!(order.order_type, OrderType::DineIn);
        assert_eq!(order.payment_method, PaymentMethod::Unknown);
        assert_eq!(order.payment_status, None);
        assert_eq!(order.total_amount, 0.0);
        assert!(order.items.is_empty());
        assert!(order.flags.invalid_timestamp);
    }

    #[test]
    fn test_non_object_record() {
        let order = normalize(&json!("garbage"), &options());
        assert_eq!(order.total_amount, 0.0);
        assert!(order.flags.invalid_timestamp);
    }

    #[test]
    fn test_negative_amounts_clamped() {
        let raw = json!({
            "totalAmount": -20,
            "tipAmount": -1,
            "discountAmount": -3,
            "items": [{ "name": "X", "quantity": -4, "price": -10 }]
        });
        let order = normalize(&raw, &options());

        assert_eq!(order.total_amount, 0.0);
        assert_eq!(order.tip_amount, 0.0);
        assert_eq!(order.discount_amount, 0.0);
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.items[0].price, 0.0);
        assert!(order.flags.quantity_adjusted);
        assert!(!order.flags.amount_clamped);
    }

    #[test]
    fn test_oversized_amounts_capped_and_flagged() {
        let raw = json!({
            "totalAmount": 1e27,
            "tipAmount": "5e28",
            "items": [{ "name": "X", "quantity": 1_000_000, "price": 1e24 }]
        });
        let order = normalize(&raw, &options());

        assert_eq!(order.total_amount, MAX_ORDER_AMOUNT);
        assert_eq!(order.tip_amount, MAX_ORDER_AMOUNT);
        assert_eq!(order.items[0].price, MAX_PRICE);
        assert_eq!(order.items[0].quantity, MAX_QUANTITY);
        assert!(order.flags.amount_clamped);
        assert!(order.flags.quantity_adjusted);
    }

    #[test]
    fn test_fractional_quantity_truncated_and_flagged() {
        let raw = json!({ "items": [{ "name": "Sok", "quantity": 2.5, "price": 4 }] });
        let order = normalize(&raw, &options());

        assert_eq!(order.items[0].quantity, 2);
        assert!(order.flags.quantity_adjusted);

        let whole = normalize(&json!({ "items": [{ "name": "Sok", "quantity": "3" }] }), &options());
        assert_eq!(whole.items[0].quantity, 3);
        assert!(!whole.flags.quantity_adjusted);

        let missing = normalize(&json!({ "items": [{ "name": "Sok" }] }), &options());
        assert_eq!(missing.items[0].quantity, 1);
        assert!(!missing.flags.quantity_adjusted);
    }

    #[test]
    fn test_unknown_order_type_defaults_to_dine_in() {
        let order = normalize(&json!({ "orderType": "helicopter" }), &options());
        assert_eq!(order.order_type, OrderType::DineIn);
    }

    #[test]
    fn test_item_defaults_and_verbatim_name() {
        let raw = json!({ "items": [{ "name": " Kawa " }, 42, null] });
        let order = normalize(&raw, &options());

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, " Kawa ");
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.items[0].price, 0.0);
    }

    #[test]
    fn test_amount_fallback_flagged() {
        let raw = json!({ "total_price": 80 });
        let order = normalize(&raw, &options());

        assert_eq!(order.total_amount, 80.0);
        assert!(order.flags.amount_fallback);
        assert!(!order.flags.amount_conflict);
    }

    #[test]
    fn test_amount_conflict_uses_declared_field() {
        let raw = json!({ "total_amount": 100, "total_price": 90 });

        let by_amount = normalize(&raw, &options());
        assert_eq!(by_amount.total_amount, 100.0);
        assert!(by_amount.flags.amount_conflict);

        let by_price = normalize(
            &raw,
            &NormalizeOptions {
                amount_field: AmountField::TotalPrice,
                ..options()
            },
        );
        assert_eq!(by_price.total_amount, 90.0);
        assert!(by_price.flags.amount_conflict);
        assert!(!by_price.flags.amount_fallback);
    }

    #[test]
    fn test_timestamp_variants() {
        let opts = options();
        let millis = normalize(&json!({ "createdAt": 1_715_342_400_000_i64 }), &opts);
        assert!(millis.created_at.is_some());

        let with_fraction = normalize(&json!({ "createdAt": "2024-05-10T09:15:30.123" }), &opts);
        assert_eq!(with_fraction.created_at.unwrap().minute(), 15);

        let date_only = normalize(&json!({ "createdAt": "2024-05-10" }), &opts);
        assert_eq!(date_only.local_hour(), Some(0));

        let garbage = normalize(&json!({ "createdAt": "yesterday-ish" }), &opts);
        assert!(garbage.created_at.is_none());
        assert!(garbage.flags.invalid_timestamp);
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        let order = normalize(&json!({ "totalAmount": "NaN", "tipAmount": "inf" }), &options());
        assert_eq!(order.total_amount, 0.0);
        assert_eq!(order.tip_amount, 0.0);
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let raws = vec![json!({ "id": "b" }), json!({ "id": "a" }), json!({ "id": "c" })];
        let ids: Vec<String> = normalize_all(&raws, &options())
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
