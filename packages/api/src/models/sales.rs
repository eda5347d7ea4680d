use serde::{Deserialize, Serialize};

use super::{kr, short_date, short_id};
use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub sale_price: f64,
    pub cost_price: f64,
    pub line_total: f64,
    pub line_profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub date: String,
    pub channel: String,
    pub status: String,
    pub shipping_paid_by_customer: f64,
    pub shipping_cost: f64,
    pub payment_status: String,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
    pub order_total: f64,
    pub cost_total: f64,
    pub profit: f64,
    pub profit_percent: f64,
    pub items: Vec<OrderLine>,
}

impl Order {
    pub const STATUSES: [&'static str; 7] = [
        "New",
        "Processing",
        "Packed",
        "Shipped",
        "Delivered",
        "Cancelled",
        "Refund",
    ];
}

impl Record for Order {
    const KIND: ResourceKind = ResourceKind::Orders;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn title(&self) -> String {
        format!("Ordre {}", short_id(&self.id))
    }

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id).to_string(),
            self.customer_name.clone(),
            self.channel.clone(),
            kr(self.order_total),
            self.status.clone(),
            short_date(&self.date),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub cost_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Purchase {
    pub id: String,
    pub supplier_id: String,
    pub supplier_name: String,
    pub date: String,
    pub status: String,
    pub total_amount: f64,
    pub payment_status: String,
    pub notes: Option<String>,
    pub items: Vec<PurchaseLine>,
}

impl Purchase {
    /// Only purchases still on order can be received.
    pub fn can_receive(&self) -> bool {
        self.status == "Ordered"
    }
}

impl Record for Purchase {
    const KIND: ResourceKind = ResourceKind::Purchases;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn title(&self) -> String {
        format!("Innkjøp {}", short_id(&self.id))
    }

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id).to_string(),
            self.supplier_name.clone(),
            kr(self.total_amount),
            self.status.clone(),
            self.payment_status.clone(),
            short_date(&self.date),
        ]
    }
}
