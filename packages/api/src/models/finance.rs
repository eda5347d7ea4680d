use serde::{Deserialize, Serialize};

use super::{kr, opt, short_date};
use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expense {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: f64,
    pub payment_status: String,
    pub supplier_id: Option<String>,
    pub notes: Option<String>,
}

impl Record for Expense {
    const KIND: ResourceKind = ResourceKind::Expenses;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.payment_status.as_str())
    }

    fn title(&self) -> String {
        format!("{} {}", self.category, kr(self.amount))
    }

    fn cells(&self) -> Vec<String> {
        vec![
            short_date(&self.date),
            self.category.clone(),
            kr(self.amount),
            if self.payment_status == "Paid" {
                "Betalt"
            } else {
                "Ubetalt"
            }
            .to_string(),
            opt(&self.notes),
        ]
    }
}

/// Operating cost, either one-off or recurring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub id: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub recurring: bool,
    pub date: String,
}

impl Record for Cost {
    const KIND: ResourceKind = ResourceKind::Costs;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.description.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.category.clone(),
            self.description.clone(),
            kr(self.amount),
            if self.recurring {
                "Fast"
            } else {
                "Engangskostnad"
            }
            .to_string(),
            short_date(&self.date),
        ]
    }
}
