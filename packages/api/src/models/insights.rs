use serde::{Deserialize, Serialize};

use super::{Customer, Order, Product, Task};

/// Grouped hits from `GET /search?q=`, rendered in backend order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
    pub tasks: Vec<Task>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.products.len() + self.customers.len() + self.orders.len() + self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pre-aggregated dashboard payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Overview,
    Stats,
    Monthly,
    Kpis,
}

impl DashboardView {
    pub fn path(&self) -> &'static str {
        match self {
            DashboardView::Overview => "dashboard",
            DashboardView::Stats => "dashboard/stats",
            DashboardView::Monthly => "dashboard/monthly",
            DashboardView::Kpis => "dashboard/kpis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Daily,
    Monthly,
}

impl ReportPeriod {
    pub fn path(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "reports/daily",
            ReportPeriod::Monthly => "reports/monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Daily => "Daglig",
            ReportPeriod::Monthly => "Månedlig",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendedProduct {
    pub name: String,
    pub reason: String,
    pub dose: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationBody {
    pub products: Vec<RecommendedProduct>,
    /// Markdown.
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendations {
    pub success: bool,
    pub recommendations: RecommendationBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_results_partial_payload() {
        let results: SearchResults =
            serde_json::from_str(r#"{"products":[{"id":"p1","name":"Omega-3"}],"tasks":[]}"#)
                .unwrap();
        assert_eq!(results.total(), 1);
        assert!(results.customers.is_empty());
        assert!(!results.is_empty());
    }

    #[test]
    fn test_recommendations_decode() {
        let rec: Recommendations = serde_json::from_str(
            r#"{"success":true,"recommendations":{"products":[{"name":"D3","reason":"Lite sol"}],"explanation":"**Vinter**"}}"#,
        )
        .unwrap();
        assert!(rec.success);
        assert_eq!(rec.recommendations.products[0].dose, None);
        assert_eq!(rec.recommendations.explanation, "**Vinter**");
    }
}
