//! # Generic resource pages
//!
//! Every entity screen (products, customers, orders, ...) follows the same
//! fetch → render → edit → submit → re-fetch loop. This module holds that loop
//! once, parameterised by a [`ResourceSchema`] descriptor and a [`Record`] type.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjust`] | [`AdjustmentForm`]: manual stock corrections |
//! | [`schema`] | Static per-entity descriptors: columns, form fields, filters |
//! | [`draft`] | [`FormDraft`]: raw form inputs and their coercion to a JSON payload |
//! | [`lines`] | [`LineItemsDraft`]: order/purchase lines with price auto-fill and totals |
//! | [`page`] | [`ResourcePage`]: list state, stale-response guard, form and delete flow |

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod adjust;
pub mod draft;
pub mod lines;
pub mod page;
pub mod schema;

pub use adjust::{AdjustmentError, AdjustmentForm, Notice, StockAdjustmentDraft};
pub use draft::{DraftError, FormDraft};
pub use lines::{LineDraft, LineItemsDraft, LineItemsError, LinePricing};
pub use page::{FormMode, FormState, LoadTicket, Lookup, ResourcePage, SubmitRequest, SubmitTicket};
pub use schema::{FieldKind, FieldSpec, ResourceSchema};

/// Backend collections exposed as `/api/{path}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    Products,
    Customers,
    Orders,
    Purchases,
    Suppliers,
    Tasks,
    Expenses,
    Stock,
    Costs,
    StockMovements,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Products,
        ResourceKind::Customers,
        ResourceKind::Orders,
        ResourceKind::Purchases,
        ResourceKind::Suppliers,
        ResourceKind::Tasks,
        ResourceKind::Expenses,
        ResourceKind::Stock,
        ResourceKind::Costs,
        ResourceKind::StockMovements,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Products => "products",
            ResourceKind::Customers => "customers",
            ResourceKind::Orders => "orders",
            ResourceKind::Purchases => "purchases",
            ResourceKind::Suppliers => "suppliers",
            ResourceKind::Tasks => "tasks",
            ResourceKind::Expenses => "expenses",
            ResourceKind::Stock => "stock",
            ResourceKind::Costs => "costs",
            ResourceKind::StockMovements => "stock-movements",
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    pub fn label(&self) -> &'static str {
        self.schema().title
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        match self {
            ResourceKind::Products => &schema::PRODUCTS,
            ResourceKind::Customers => &schema::CUSTOMERS,
            ResourceKind::Orders => &schema::ORDERS,
            ResourceKind::Purchases => &schema::PURCHASES,
            ResourceKind::Suppliers => &schema::SUPPLIERS,
            ResourceKind::Tasks => &schema::TASKS,
            ResourceKind::Expenses => &schema::EXPENSES,
            ResourceKind::Stock => &schema::STOCK,
            ResourceKind::Costs => &schema::COSTS,
            ResourceKind::StockMovements => &schema::STOCK_MOVEMENTS,
        }
    }

    /// Whether the backend accepts `PUT /{path}/{id}/status?status=`.
    pub fn has_status_endpoint(&self) -> bool {
        matches!(self, ResourceKind::Orders | ResourceKind::Tasks)
    }
}

/// A backend record that can be listed on a resource page.
///
/// `cells` must line up with the schema's `columns`.
pub trait Record: Serialize + DeserializeOwned + Clone + PartialEq + 'static {
    const KIND: ResourceKind;

    fn id(&self) -> &str;

    /// Value matched by the page's status filter.
    fn status(&self) -> Option<&str> {
        None
    }

    fn title(&self) -> String;

    fn cells(&self) -> Vec<String>;
}

/// One choice in a reference `<select>` (e.g. a supplier for a product).
#[derive(Clone, Debug, PartialEq)]
pub struct RefOption {
    pub id: String,
    pub label: String,
}

/// Option lists for the reference fields of a form, keyed by the referenced
/// collection. Fetched together with the primary list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct References {
    lists: BTreeMap<ResourceKind, Vec<RefOption>>,
}

impl References {
    pub fn insert(&mut self, kind: ResourceKind, options: Vec<RefOption>) {
        self.lists.insert(kind, options);
    }

    pub fn options(&self, kind: ResourceKind) -> &[RefOption] {
        self.lists.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn label(&self, kind: ResourceKind, id: &str) -> Option<&str> {
        self.options(kind)
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.label.as_str())
    }
}

/// Build select options from raw records. The label is the first present of
/// `name`, `title`, `product_name`, falling back to the id.
pub fn ref_options(values: &[serde_json::Value]) -> Vec<RefOption> {
    values
        .iter()
        .filter_map(|v| {
            let id = v.get("id")?.as_str()?.to_string();
            let label = ["name", "title", "product_name"]
                .iter()
                .find_map(|k| v.get(*k).and_then(|l| l.as_str()))
                .map(str::to_string)
                .unwrap_or_else(|| id.clone());
            Some(RefOption { id, label })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths() {
        assert_eq!(ResourceKind::StockMovements.path(), "stock-movements");
        assert_eq!(ResourceKind::Orders.item_path("o1"), "orders/o1");
        assert!(ResourceKind::Tasks.has_status_endpoint());
        assert!(!ResourceKind::Customers.has_status_endpoint());
    }

    #[test]
    fn test_every_kind_has_matching_schema() {
        for kind in ResourceKind::ALL {
            assert_eq!(kind.schema().kind, kind);
        }
    }

    #[test]
    fn test_ref_options() {
        let values = vec![
            json!({"id": "s1", "name": "Nordic Labs"}),
            json!({"id": "t1", "title": "Ring kunde"}),
            json!({"id": "x1"}),
            json!({"name": "no id"}),
        ];
        let options = ref_options(&values);
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "Nordic Labs");
        assert_eq!(options[1].label, "Ring kunde");
        assert_eq!(options[2].label, "x1");

        let mut refs = References::default();
        refs.insert(ResourceKind::Suppliers, options);
        assert_eq!(refs.label(ResourceKind::Suppliers, "s1"), Some("Nordic Labs"));
        assert!(refs.options(ResourceKind::Customers).is_empty());
    }
}
