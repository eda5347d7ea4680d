use serde::{Deserialize, Serialize};

use super::{opt, short_date, short_id};
use crate::resource::{Record, ResourceKind};

/// Current stock level of one product. `status` (`OK`, `Low`, `Out`) is
/// derived by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockItem {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_sku: Option<String>,
    pub product_color: Option<String>,
    pub product_cost: Option<f64>,
    pub quantity: i64,
    pub min_stock: i64,
    pub status: String,
    pub last_updated: Option<String>,
}

impl StockItem {
    pub fn is_low(&self) -> bool {
        self.status == "Low" || self.status == "Out"
    }

    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.product_cost.unwrap_or(0.0)
    }
}

impl Record for StockItem {
    const KIND: ResourceKind = ResourceKind::Stock;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn title(&self) -> String {
        self.product_name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            opt(&self.product_sku),
            self.quantity.to_string(),
            self.min_stock.to_string(),
            self.status.clone(),
            super::kr(self.value()),
        ]
    }
}

/// Totals shown above the stock table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StockSummary {
    pub total_quantity: i64,
    pub total_value: f64,
    pub low_count: usize,
}

impl StockSummary {
    pub fn of(items: &[StockItem]) -> Self {
        items.iter().fold(Self::default(), |mut acc, item| {
            acc.total_quantity += item.quantity;
            acc.total_value += item.value();
            if item.is_low() {
                acc.low_count += 1;
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    pub product_name: Option<String>,
    pub date: String,
    #[serde(rename = "type")]
    pub movement_type: String,
    pub quantity: i64,
    pub order_id: Option<String>,
    pub purchase_id: Option<String>,
    pub note: Option<String>,
}

impl StockMovement {
    pub fn is_inbound(&self) -> bool {
        self.movement_type == "IN"
    }

    pub fn reference(&self) -> String {
        match (&self.order_id, &self.purchase_id) {
            (Some(order), _) => format!("Ordre: {}", short_id(order)),
            (None, Some(purchase)) => format!("Innkjøp: {}", short_id(purchase)),
            (None, None) => "-".to_string(),
        }
    }
}

impl Record for StockMovement {
    const KIND: ResourceKind = ResourceKind::StockMovements;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        opt(&self.product_name)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            short_date(&self.date),
            opt(&self.product_name),
            if self.is_inbound() { "Inn" } else { "Ut" }.to_string(),
            self.quantity.to_string(),
            self.reference(),
            opt(&self.note),
        ]
    }
}

/// One manual correction from `GET /stock/adjustments`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockAdjustment {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub change: i64,
    pub reason: String,
    pub created_by: Option<String>,
    pub created_at: String,
}

impl StockAdjustment {
    /// `+5` / `-3`.
    pub fn signed_change(&self) -> String {
        if self.change >= 0 {
            format!("+{}", self.change)
        } else {
            self.change.to_string()
        }
    }
}

/// Response of `POST /stock/adjust`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentResult {
    pub message: String,
    pub new_quantity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, cost: f64, status: &str) -> StockItem {
        StockItem {
            quantity,
            product_cost: Some(cost),
            status: status.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_summary() {
        let items = vec![item(10, 50.0, "OK"), item(2, 10.0, "Low"), item(0, 99.0, "Out")];
        let summary = StockSummary::of(&items);
        assert_eq!(summary.total_quantity, 12);
        assert_eq!(summary.total_value, 520.0);
        assert_eq!(summary.low_count, 2);
    }

    #[test]
    fn test_movement_reference() {
        let m = StockMovement {
            order_id: Some("abcdef1234".into()),
            ..Default::default()
        };
        assert_eq!(m.reference(), "Ordre: abcdef12");
        assert_eq!(StockMovement::default().reference(), "-");
    }
}
