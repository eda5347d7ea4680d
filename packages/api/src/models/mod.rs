//! Wire models for the ZenVit REST backend.
//!
//! Records are owned by the backend and only mirrored here for display, so
//! every struct is lenient: unknown fields are ignored and missing ones take
//! their defaults. Server-computed fields (profit, stock status, totals) are
//! shown exactly as returned.

mod catalog;
mod crm;
mod finance;
mod insights;
mod sales;
mod stock;
mod user;

pub use catalog::{Product, Supplier};
pub use crm::{Customer, Task, TimelineEntry};
pub use finance::{Cost, Expense};
pub use insights::{
    DashboardView, RecommendedProduct, RecommendationBody, Recommendations, ReportPeriod,
    SearchResults,
};
pub use sales::{Order, OrderLine, Purchase, PurchaseLine};
pub use stock::{AdjustmentResult, StockAdjustment, StockItem, StockMovement, StockSummary};
pub use user::{TokenResponse, UserInfo};

/// Whole kroner, the way every list in the app shows money.
pub fn kr(amount: f64) -> String {
    format!("{} kr", amount.round() as i64)
}

/// `2024-03-01T10:00:00Z` → `01.03.2024`. Anything unparseable is returned as is.
pub fn short_date(iso: &str) -> String {
    let date = iso.get(..10).unwrap_or(iso);
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if y.len() == 4 && m.len() == 2 && d.len() == 2 => {
            format!("{d}.{m}.{y}")
        }
        _ => iso.to_string(),
    }
}

pub(crate) fn opt(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// First eight characters of a server id, used as a short reference.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2024-03-01T10:00:00Z"), "01.03.2024");
        assert_eq!(short_date("2024-12-31"), "31.12.2024");
        assert_eq!(short_date("i går"), "i går");
    }

    #[test]
    fn test_kr_rounds() {
        assert_eq!(kr(199.6), "200 kr");
        assert_eq!(kr(0.0), "0 kr");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
