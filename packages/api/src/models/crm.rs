use serde::{Deserialize, Serialize};

use super::{kr, opt, short_date};
use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "type")]
    pub customer_type: String,
    pub status: String,
    pub total_value: f64,
    pub order_count: i64,
    pub favorite_product: Option<String>,
    pub last_order_date: Option<String>,
    pub tags: Option<String>,
    pub notes: Option<String>,
    pub next_step: Option<String>,
    pub created_at: Option<String>,
}

impl Record for Customer {
    const KIND: ResourceKind = ResourceKind::Customers;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.city),
            self.status.clone(),
            self.created_at
                .as_deref()
                .map(short_date)
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl Customer {
    pub fn lifetime_value(&self) -> String {
        kr(self.total_value)
    }
}

/// One event on a customer's history (order, task, note).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEntry {
    pub id: String,
    pub customer_id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
    #[serde(rename = "type")]
    pub task_type: String,
    pub customer_id: Option<String>,
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub supplier_id: Option<String>,
    pub assigned_to: Option<String>,
}

impl Task {
    pub const STATUSES: [&'static str; 3] = ["Planned", "InProgress", "Done"];

    pub fn is_done(&self) -> bool {
        self.status == "Done"
    }

    /// Open task whose due date lies before `today` (`YYYY-MM-DD`).
    pub fn is_overdue(&self, today: &str) -> bool {
        match self.due_date.as_deref().and_then(|d| d.get(..10)) {
            Some(due) => !self.is_done() && due < today,
            None => false,
        }
    }
}

impl Record for Task {
    const KIND: ResourceKind = ResourceKind::Tasks;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.task_type.clone(),
            self.priority.clone(),
            self.due_date
                .as_deref()
                .map(short_date)
                .unwrap_or_else(|| "-".to_string()),
            self.status.clone(),
            opt(&self.assigned_to),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_is_renamed() {
        let c: Customer =
            serde_json::from_str(r#"{"id":"c1","name":"Ola","type":"Business","status":"VIP"}"#)
                .unwrap();
        assert_eq!(c.customer_type, "Business");
        assert_eq!(c.status().unwrap(), "VIP");

        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "Business");
    }

    #[test]
    fn test_task_overdue() {
        let mut task = Task {
            due_date: Some("2024-05-01T00:00:00".into()),
            status: "Planned".into(),
            ..Default::default()
        };
        assert!(task.is_overdue("2024-05-02"));
        assert!(!task.is_overdue("2024-05-01"));

        task.status = "Done".into();
        assert!(!task.is_overdue("2024-06-01"));

        task.due_date = None;
        assert!(!task.is_overdue("2024-06-01"));
    }
}
