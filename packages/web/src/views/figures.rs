//! Read-only access to the pre-aggregated dashboard and report payloads.
//!
//! The backend computes every figure; these helpers only walk the JSON and
//! fall back to zero or "-" for anything missing.

use serde_json::Value;

fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

pub(crate) fn number(value: &Value, path: &[&str]) -> f64 {
    at(value, path).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Whole number as displayed, e.g. a count.
pub(crate) fn count(value: &Value, path: &[&str]) -> i64 {
    number(value, path).round() as i64
}

pub(crate) fn text(value: &Value, path: &[&str]) -> String {
    match at(value, path) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

pub(crate) fn list<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    at(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_lookup() {
        let stats = json!({
            "today": {"orders": 3, "revenue": 1249.5},
            "inventory": {"items": [{"product_name": "D3"}]}
        });
        assert_eq!(count(&stats, &["today", "orders"]), 3);
        assert_eq!(number(&stats, &["today", "revenue"]), 1249.5);
        assert_eq!(list(&stats, &["inventory", "items"]).len(), 1);
        assert_eq!(text(&list(&stats, &["inventory", "items"])[0], &["product_name"]), "D3");
    }

    #[test]
    fn test_missing_values_fall_back() {
        let empty = json!({});
        assert_eq!(number(&empty, &["today", "profit"]), 0.0);
        assert_eq!(text(&empty, &["name"]), "-");
        assert!(list(&Value::Null, &["top_products"]).is_empty());
    }
}
