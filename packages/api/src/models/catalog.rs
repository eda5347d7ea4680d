use serde::{Deserialize, Serialize};

use super::{default_true, kr, opt};
use crate::resource::{Record, ResourceKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub sale_price: Option<f64>,
    pub cost: Option<f64>,
    pub supplier_id: Option<String>,
    pub color: Option<String>,
    pub image_url: Option<String>,
    pub brand: Option<String>,
    pub ean: Option<String>,
    pub min_stock: Option<i64>,
    pub stock_quantity: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Product {
    /// Price used when the product is put on an order line: `sale_price` when
    /// set and non-zero, else `price`, else 0.
    pub fn unit_price(&self) -> f64 {
        [self.sale_price, self.price]
            .into_iter()
            .flatten()
            .find(|p| *p != 0.0)
            .unwrap_or(0.0)
    }

    pub fn unit_cost(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}

impl Record for Product {
    const KIND: ResourceKind = ResourceKind::Products;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(if self.active { "Active" } else { "Inactive" })
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.sku.clone(),
            self.category.clone(),
            kr(self.unit_price()),
            kr(self.unit_cost()),
            if self.active { "Aktiv" } else { "Inaktiv" }.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

impl Record for Supplier {
    const KIND: ResourceKind = ResourceKind::Suppliers;

    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> String {
        self.name.clone()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            opt(&self.contact_person),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.website),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_prefers_sale_price() {
        let mut p = Product {
            price: Some(100.0),
            sale_price: Some(149.0),
            ..Default::default()
        };
        assert_eq!(p.unit_price(), 149.0);

        p.sale_price = Some(0.0);
        assert_eq!(p.unit_price(), 100.0);

        p.sale_price = None;
        p.price = None;
        assert_eq!(p.unit_price(), 0.0);
    }

    #[test]
    fn test_lenient_decode() {
        let p: Product = serde_json::from_str(
            r#"{"id":"p1","sku":"D3-1","name":"D3","category":"vitamin","price":199,"extra":"ignored"}"#,
        )
        .unwrap();
        assert!(p.active);
        assert_eq!(p.unit_price(), 199.0);
        assert!(p.cost.is_none());
    }
}
