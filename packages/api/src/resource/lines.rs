//! Line-item drafts for new orders and purchases.
//!
//! Picking a product copies its current price from the already fetched product
//! list into the line; nothing is requested from the backend. The running total
//! is recomputed from the raw inputs on every render.

use serde_json::{json, Value};

use super::draft::parse_decimal;
use crate::models::Product;

/// Which product price a line is valued at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinePricing {
    /// Orders: `sale_price`, falling back to `price`.
    Sale,
    /// Purchases: the product's cost.
    Cost,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LineItemsError {
    #[error("Vennligst velg en kunde")]
    MissingCustomer,
    #[error("Vennligst velg en leverandør")]
    MissingSupplier,
    #[error("Legg til minst ett produkt")]
    NoLines,
    /// 1-based line number.
    #[error("Ugyldig pris på linje {0}")]
    InvalidPrice(usize),
    #[error("Totalpris må være større enn 0. Sjekk at produktene har pris.")]
    NonPositiveTotal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineDraft {
    pub product_id: String,
    pub quantity: String,
    pub price: String,
}

impl Default for LineDraft {
    fn default() -> Self {
        Self {
            product_id: String::new(),
            quantity: "1".to_string(),
            price: "0".to_string(),
        }
    }
}

impl LineDraft {
    /// Whole units; anything unparseable or non-positive counts as 1.
    pub fn quantity(&self) -> i64 {
        self.quantity
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|q| *q > 0)
            .unwrap_or(1)
    }

    /// Zero while the price input does not parse; payload validation rejects
    /// such lines.
    pub fn price(&self) -> f64 {
        parse_decimal(&self.price).unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.quantity() as f64 * self.price()
    }

    fn is_filled(&self) -> bool {
        !self.product_id.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItemsDraft {
    pub pricing: LinePricing,
    /// Customer id for orders, supplier id for purchases.
    pub counterparty: String,
    pub channel: String,
    pub payment_method: String,
    pub notes: String,
    pub lines: Vec<LineDraft>,
}

impl LineItemsDraft {
    pub fn new(pricing: LinePricing) -> Self {
        Self {
            pricing,
            counterparty: String::new(),
            channel: "Direct".to_string(),
            payment_method: String::new(),
            notes: String::new(),
            lines: vec![LineDraft::default()],
        }
    }

    pub fn add_line(&mut self) {
        self.lines.push(LineDraft::default());
    }

    /// Remove a line; the form always keeps at least one (empty) line.
    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        if self.lines.is_empty() {
            self.lines.push(LineDraft::default());
        }
    }

    /// Select a product for a line and auto-fill its price.
    pub fn set_product(&mut self, index: usize, product_id: &str, products: &[Product]) {
        let pricing = self.pricing;
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        line.product_id = product_id.to_string();
        if let Some(product) = products.iter().find(|p| p.id == product_id) {
            let price = match pricing {
                LinePricing::Sale => product.unit_price(),
                LinePricing::Cost => product.unit_cost(),
            };
            line.price = price.to_string();
        }
    }

    pub fn set_quantity(&mut self, index: usize, raw: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = raw.to_string();
        }
    }

    pub fn set_price(&mut self, index: usize, raw: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.price = raw.to_string();
        }
    }

    pub fn line_total(&self, index: usize) -> f64 {
        self.lines.get(index).map(LineDraft::total).unwrap_or(0.0)
    }

    /// Sum over lines that have a product selected.
    pub fn total(&self) -> f64 {
        self.lines
            .iter()
            .filter(|l| l.is_filled())
            .map(LineDraft::total)
            .sum()
    }

    fn check_prices(&self) -> Result<(), LineItemsError> {
        match self
            .lines
            .iter()
            .position(|l| l.is_filled() && parse_decimal(&l.price).is_none())
        {
            Some(index) => Err(LineItemsError::InvalidPrice(index + 1)),
            None => Ok(()),
        }
    }

    fn items(&self, products: &[Product]) -> Vec<Value> {
        let price_key = match self.pricing {
            LinePricing::Sale => "price",
            LinePricing::Cost => "cost_price",
        };
        self.lines
            .iter()
            .filter(|l| l.is_filled())
            .map(|l| {
                let name = products
                    .iter()
                    .find(|p| p.id == l.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                json!({
                    "product_id": l.product_id,
                    "product_name": name,
                    "quantity": l.quantity(),
                    price_key: l.price(),
                })
            })
            .collect()
    }

    /// Body for `POST /orders`.
    pub fn to_order_payload(&self, products: &[Product]) -> Result<Value, LineItemsError> {
        if self.counterparty.is_empty() {
            return Err(LineItemsError::MissingCustomer);
        }
        let items = self.items(products);
        if items.is_empty() {
            return Err(LineItemsError::NoLines);
        }
        self.check_prices()?;
        let total = self.total();
        if total <= 0.0 {
            return Err(LineItemsError::NonPositiveTotal);
        }
        let payment_method = if self.payment_method.is_empty() {
            Value::Null
        } else {
            Value::String(self.payment_method.clone())
        };
        Ok(json!({
            "customer_id": self.counterparty,
            "channel": self.channel,
            "payment_method": payment_method,
            "notes": empty_to_null(&self.notes),
            "items": items,
            "order_total": total,
        }))
    }

    /// Body for `POST /purchases`.
    pub fn to_purchase_payload(&self, products: &[Product]) -> Result<Value, LineItemsError> {
        if self.counterparty.is_empty() {
            return Err(LineItemsError::MissingSupplier);
        }
        let items = self.items(products);
        if items.is_empty() {
            return Err(LineItemsError::NoLines);
        }
        self.check_prices()?;
        Ok(json!({
            "supplier_id": self.counterparty,
            "notes": empty_to_null(&self.notes),
            "items": items,
            "total_amount": self.total(),
        }))
    }
}

fn empty_to_null(s: &str) -> Value {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: "P1".into(),
                name: "D3".into(),
                sale_price: Some(100.0),
                price: Some(90.0),
                cost: Some(30.0),
                ..Default::default()
            },
            Product {
                id: "P2".into(),
                name: "Gratisprøve".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_line_total_is_quantity_times_price() {
        let products = catalog();
        let mut draft = LineItemsDraft::new(LinePricing::Sale);
        draft.set_product(0, "P1", &products);
        draft.set_quantity(0, "2");

        assert_eq!(draft.lines[0].price, "100");
        assert_eq!(draft.line_total(0), 200.0);
        assert_eq!(draft.total(), 200.0);
    }

    #[test]
    fn test_purchase_uses_cost() {
        let products = catalog();
        let mut draft = LineItemsDraft::new(LinePricing::Cost);
        draft.set_product(0, "P1", &products);
        draft.set_quantity(0, "100");
        assert_eq!(draft.total(), 3000.0);
    }

    #[test]
    fn test_bad_quantity_falls_back_to_one() {
        let line = LineDraft {
            product_id: "P1".into(),
            quantity: "abc".into(),
            price: "12,5".into(),
        };
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.total(), 12.5);
    }

    #[test]
    fn test_order_validation_order() {
        let products = catalog();
        let mut draft = LineItemsDraft::new(LinePricing::Sale);
        assert_eq!(
            draft.to_order_payload(&products),
            Err(LineItemsError::MissingCustomer)
        );

        draft.counterparty = "C1".into();
        assert_eq!(draft.to_order_payload(&products), Err(LineItemsError::NoLines));

        draft.set_product(0, "P2", &products);
        assert_eq!(
            draft.to_order_payload(&products),
            Err(LineItemsError::NonPositiveTotal)
        );

        draft.set_product(0, "P1", &products);
        draft.set_quantity(0, "2");
        let payload = draft.to_order_payload(&products).unwrap();
        assert_eq!(payload["customer_id"], "C1");
        assert_eq!(payload["order_total"], json!(200.0));
        assert_eq!(payload["items"][0]["product_name"], "D3");
        assert_eq!(payload["items"][0]["quantity"], 2);
        assert_eq!(payload["items"][0]["price"], json!(100.0));
        assert_eq!(payload["payment_method"], Value::Null);
    }

    #[test]
    fn test_unparseable_price_rejected() {
        let products = catalog();
        let mut draft = LineItemsDraft::new(LinePricing::Sale);
        draft.counterparty = "C1".into();
        draft.set_product(0, "P1", &products);
        draft.add_line();
        draft.set_product(1, "P1", &products);
        draft.set_price(1, "hundre");

        assert_eq!(draft.line_total(1), 0.0);
        assert_eq!(
            draft.to_order_payload(&products),
            Err(LineItemsError::InvalidPrice(2))
        );

        let mut purchase = LineItemsDraft::new(LinePricing::Cost);
        purchase.counterparty = "S1".into();
        purchase.set_product(0, "P1", &products);
        purchase.set_price(0, "");
        assert_eq!(
            purchase.to_purchase_payload(&products),
            Err(LineItemsError::InvalidPrice(1))
        );
    }

    #[test]
    fn test_remove_keeps_one_line() {
        let mut draft = LineItemsDraft::new(LinePricing::Sale);
        draft.add_line();
        assert_eq!(draft.lines.len(), 2);
        draft.remove_line(0);
        draft.remove_line(0);
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0], LineDraft::default());
    }

    #[test]
    fn test_purchase_payload() {
        let products = catalog();
        let mut draft = LineItemsDraft::new(LinePricing::Cost);
        assert_eq!(
            draft.to_purchase_payload(&products),
            Err(LineItemsError::MissingSupplier)
        );
        draft.counterparty = "S1".into();
        draft.set_product(0, "P1", &products);
        let payload = draft.to_purchase_payload(&products).unwrap();
        assert_eq!(payload["items"][0]["cost_price"], json!(30.0));
        assert_eq!(payload["total_amount"], json!(30.0));
    }
}
