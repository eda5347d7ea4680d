//! Form drafts: the raw text a user typed, and its conversion into a request
//! payload.
//!
//! Inputs stay strings until submit so a half-typed number never loses what
//! the user wrote. [`FormDraft::to_payload`] then applies the coercion rules:
//!
//! | Field kind | Empty, optional | Empty, required | Non-empty |
//! |------------|-----------------|-----------------|-----------|
//! | text-like | `null` | error | trimmed string |
//! | `Integer` | `null` | error | integer or error |
//! | `Decimal` | `null` | error | number (`,` or `.`) or error |
//! | `Checkbox` | `false` | `false` | `true` / `false` |

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::schema::{FieldKind, FieldSpec, ResourceSchema};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("{label} må fylles ut")]
    Required { label: &'static str },
    #[error("{label} må være et tall")]
    NotANumber { label: &'static str },
    #[error("{label} må være et heltall")]
    NotAnInteger { label: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
}

impl FormDraft {
    /// Empty create form with the schema's defaults filled in.
    pub fn new(schema: &ResourceSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.key.to_string(), f.default.to_string()))
            .collect();
        Self { values }
    }

    /// Edit form pre-filled from an existing record.
    pub fn from_record<R: Serialize>(schema: &ResourceSchema, record: &R) -> Self {
        let value = serde_json::to_value(record).unwrap_or(Value::Null);
        Self::from_value(schema, &value)
    }

    pub fn from_value(schema: &ResourceSchema, record: &Value) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| {
                let raw = record
                    .get(f.key)
                    .map(|v| raw_from_json(f, v))
                    .filter(|raw| !raw.is_empty())
                    .unwrap_or_else(|| f.default.to_string());
                (f.key.to_string(), raw)
            })
            .collect();
        Self { values }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn checked(&self, key: &str) -> bool {
        self.get(key) == "true"
    }

    /// Validate and coerce into the JSON object sent to the backend.
    /// The draft is left untouched either way.
    pub fn to_payload(&self, schema: &ResourceSchema) -> Result<Value, DraftError> {
        let mut payload = Map::new();
        for field in schema.fields {
            payload.insert(field.key.to_string(), coerce(field, self.get(field.key))?);
        }
        Ok(Value::Object(payload))
    }
}

fn raw_from_json(field: &FieldSpec, value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if field.kind == FieldKind::Date => s.get(..10).unwrap_or(s).to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce(field: &FieldSpec, raw: &str) -> Result<Value, DraftError> {
    let label = field.label;
    let trimmed = raw.trim();

    if field.kind == FieldKind::Checkbox {
        return Ok(Value::Bool(trimmed == "true"));
    }
    if trimmed.is_empty() {
        return if field.required {
            Err(DraftError::Required { label })
        } else {
            Ok(Value::Null)
        };
    }

    match field.kind {
        FieldKind::Integer => trimmed
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .map_err(|_| DraftError::NotAnInteger { label }),
        FieldKind::Decimal => parse_decimal(trimmed)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or(DraftError::NotANumber { label }),
        _ => Ok(Value::String(trimmed.to_string())),
    }
}

/// Parse a user-typed amount; Norwegian decimal commas are accepted.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, Task};
    use crate::resource::schema::{COSTS, PRODUCTS, TASKS};
    use serde_json::json;

    #[test]
    fn test_new_uses_defaults() {
        let draft = FormDraft::new(&TASKS);
        assert_eq!(draft.get("priority"), "Medium");
        assert_eq!(draft.get("type"), "Admin");
        assert_eq!(draft.get("title"), "");
    }

    #[test]
    fn test_empty_required_title_rejected() {
        let mut draft = FormDraft::new(&TASKS);
        draft.set("priority", "High");
        assert_eq!(
            draft.to_payload(&TASKS),
            Err(DraftError::Required { label: "Tittel" })
        );
        // Draft is kept for correction.
        assert_eq!(draft.get("priority"), "High");
    }

    #[test]
    fn test_optional_empty_becomes_null() {
        let mut draft = FormDraft::new(&TASKS);
        draft.set("title", "  Ring leverandør ");
        let payload = draft.to_payload(&TASKS).unwrap();
        assert_eq!(payload["title"], "Ring leverandør");
        assert_eq!(payload["due_date"], Value::Null);
        assert_eq!(payload["customer_id"], Value::Null);
        assert_eq!(payload["priority"], "Medium");
    }

    #[test]
    fn test_numeric_coercion() {
        let mut draft = FormDraft::new(&PRODUCTS);
        draft.set("name", "Omega-3");
        draft.set("sku", "OM-1");
        draft.set("price", "249,50");
        draft.set("cost", "80");
        draft.set("min_stock", "");

        let payload = draft.to_payload(&PRODUCTS).unwrap();
        assert_eq!(payload["price"], json!(249.5));
        assert_eq!(payload["cost"], json!(80.0));
        assert_eq!(payload["min_stock"], Value::Null);
        assert_eq!(payload["active"], Value::Bool(true));
        assert_eq!(payload["supplier_id"], Value::Null);
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut draft = FormDraft::new(&PRODUCTS);
        draft.set("name", "Omega-3");
        draft.set("sku", "OM-1");
        draft.set("price", "gratis");
        draft.set("cost", "1");
        assert_eq!(
            draft.to_payload(&PRODUCTS),
            Err(DraftError::NotANumber { label: "Pris (kr)" })
        );

        draft.set("price", "10");
        draft.set("min_stock", "2.5");
        assert!(matches!(
            draft.to_payload(&PRODUCTS),
            Err(DraftError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_blank_required_number_rejected() {
        let mut draft = FormDraft::new(&COSTS);
        draft.set("description", "Shopify");
        draft.set("amount", "   ");
        assert_eq!(
            draft.to_payload(&COSTS),
            Err(DraftError::Required { label: "Beløp (kr)" })
        );
    }

    #[test]
    fn test_from_record() {
        let product = Product {
            id: "p1".into(),
            name: "D3".into(),
            sku: "D3-1".into(),
            category: "vitamin".into(),
            price: Some(199.0),
            cost: Some(40.5),
            active: false,
            ..Default::default()
        };
        let draft = FormDraft::from_record(&PRODUCTS, &product);
        assert_eq!(draft.get("name"), "D3");
        assert_eq!(draft.get("price"), "199.0");
        assert_eq!(draft.get("cost"), "40.5");
        assert_eq!(draft.get("supplier_id"), "");
        assert!(!draft.checked("active"));

        let task = Task {
            title: "Følg opp".into(),
            due_date: Some("2024-06-01T00:00:00".into()),
            task_type: "Customer".into(),
            ..Default::default()
        };
        let draft = FormDraft::from_record(&TASKS, &task);
        assert_eq!(draft.get("due_date"), "2024-06-01");
        assert_eq!(draft.get("type"), "Customer");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1,5"), Some(1.5));
        assert_eq!(parse_decimal(" 3 "), Some(3.0));
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
