//! Order source
//!
//! Loads raw order records from a JSON file. Accepted layouts:
//! - a bare array: `[{...}, {...}]`
//! - an envelope: `{"orders": [{...}, {...}]}`
//!
//! Records are returned as raw JSON values; the normalizer owns their
//! interpretation.

use std::path::Path;

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::RestaurantProfile;

const UTF8_BOM: &str = "\u{FEFF}";

/// Read and parse an order file
pub async fn load_orders(path: &Path) -> AppResult<Vec<Value>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        AppError::with_message(
            ErrorCode::OrderSourceUnavailable,
            format!("Failed to read {}: {}", path.display(), e),
        )
        .with_detail("path", path.display().to_string())
    })?;

    let records = parse_orders(&bytes)?;
    tracing::info!(path = %path.display(), count = records.len(), "Orders loaded");
    Ok(records)
}

/// Like [`load_orders`], but a failure yields an empty order set
///
/// The error is logged and returned alongside so the caller can tell the
/// user; the report still renders (with zeros).
pub async fn load_orders_or_empty(path: &Path) -> (Vec<Value>, Option<AppError>) {
    match load_orders(path).await {
        Ok(records) => (records, None),
        Err(e) => {
            tracing::warn!(code = %e.code, "Order source failed, continuing with no orders: {}", e);
            (Vec::new(), Some(e))
        }
    }
}

/// Parse an order document (array or `{"orders": [...]}`)
pub fn parse_orders(bytes: &[u8]) -> AppResult<Vec<Value>> {
    let text = std::str::from_utf8(bytes).map_err(|e| malformed(format!("Not UTF-8: {}", e)))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let doc: Value = serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?;
    match doc {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("orders") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(malformed("Expected an \"orders\" array")),
        },
        _ => Err(malformed("Expected an array of orders")),
    }
}

/// Read the restaurant profile printed on report headers
pub async fn load_profile(path: &Path) -> AppResult<RestaurantProfile> {
    let bytes = tokio::fs::read(path).await?;
    let profile = serde_json::from_slice(&bytes)?;
    Ok(profile)
}

fn malformed(msg: impl Into<String>) -> AppError {
    AppError::with_message(ErrorCode::OrderSourceMalformed, msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_bare_array() {
        let records = parse_orders(br#"[{"id":"1"},{"id":"2"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], json!({"id": "1"}));
    }

    #[test]
    fn test_parse_envelope_and_bom() {
        let mut bytes = "\u{FEFF}".as_bytes().to_vec();
        bytes.extend_from_slice(br#"{"orders":[{"id":"1"}],"page":1}"#);
        let records = parse_orders(&bytes).unwrap();
        assert_eq!(records, vec![json!({"id": "1"})]);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        let err = parse_orders(br#"{"items":[]}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderSourceMalformed);
        assert!(err.is_recoverable());

        assert!(parse_orders(b"42").is_err());
        assert!(parse_orders(b"not json").is_err());
    }

    #[tokio::test]
    async fn test_load_orders_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!([{"id": "a"}, {"id": "b"}, {"id": "c"}])).unwrap();

        let records = load_orders(file.path()).await.unwrap();
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("orders.json");

        let (records, err) = load_orders_or_empty(&missing).await;
        assert!(records.is_empty());
        assert_eq!(err.map(|e| e.code), Some(ErrorCode::OrderSourceUnavailable));
    }

    #[tokio::test]
    async fn test_load_profile_defaults_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!({"name": "Bar Mleczny", "phone": null})).unwrap();

        let profile = load_profile(file.path()).await.unwrap();
        assert_eq!(profile.name, "Bar Mleczny");
        assert!(profile.city.is_empty());
        assert_eq!(profile.phone, None);
    }
}
