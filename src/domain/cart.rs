use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;
use super::pricing::{CartLine, Won};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: String,
    pub name: String,
    pub unit_price: Won,
    pub quantity: i32,
}

impl CartItem {
    pub fn line_total(&self) -> Won {
        self.unit_price.saturating_mul(Won::from(self.quantity))
    }
}

/// A customer's cart. Item ids are unique and lines keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub customer_id: Uuid,
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new(customer_id: Uuid) -> Self {
        Self {
            customer_id,
            items: Vec::new(),
        }
    }

    /// Rebuild a cart from stored lines, merging any repeated item ids.
    pub fn from_items(customer_id: Uuid, items: Vec<CartItem>) -> Result<Self, DomainError> {
        let mut cart = Self::new(customer_id);
        for item in items {
            match cart.position(&item.item_id) {
                Some(idx) => {
                    let line = &mut cart.items[idx];
                    line.quantity = line.quantity.checked_add(item.quantity).ok_or_else(|| {
                        DomainError::Internal(format!(
                            "stored quantity for '{}' overflows",
                            item.item_id
                        ))
                    })?;
                }
                None => cart.items.push(item),
            }
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of boxes across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i64::from(i.quantity)).sum()
    }

    /// Add `quantity` of an item, merging into an existing line when present.
    pub fn add(
        &mut self,
        item_id: &str,
        name: &str,
        unit_price: Won,
        quantity: i32,
    ) -> Result<(), DomainError> {
        if item_id.trim().is_empty() {
            return Err(DomainError::InvalidInput("item id must not be empty".into()));
        }
        if unit_price < 0 {
            return Err(DomainError::InvalidInput(format!(
                "unit price {unit_price} is negative"
            )));
        }
        if quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "quantity {quantity} is below 1"
            )));
        }

        match self.position(item_id) {
            Some(idx) => {
                let line = &mut self.items[idx];
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(|| {
                    DomainError::InvalidInput(format!("quantity for '{item_id}' is too large"))
                })?;
            }
            None => self.items.push(CartItem {
                item_id: item_id.to_string(),
                name: name.to_string(),
                unit_price,
                quantity,
            }),
        }
        Ok(())
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i32) -> Result<(), DomainError> {
        let idx = self
            .position(item_id)
            .ok_or_else(|| DomainError::NotFound(format!("Cart item '{item_id}'")))?;
        if quantity <= 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].quantity = quantity;
        }
        Ok(())
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.item_id != item_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn pricing_lines(&self) -> Vec<CartLine> {
        self.items
            .iter()
            .map(|i| CartLine::new(i.item_id.clone(), i.unit_price, i.quantity))
            .collect()
    }

    fn position(&self, item_id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.item_id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        Cart::new(Uuid::new_v4())
    }

    #[test]
    fn add_new_item_appends_line() {
        let mut c = cart();
        c.add("1", "Protein Power Bento", 8500, 1).expect("add");
        c.add("2", "Vegetarian Bento", 7500, 2).expect("add");

        assert_eq!(c.items().len(), 2);
        assert_eq!(c.items()[0].item_id, "1");
        assert_eq!(c.item_count(), 3);
    }

    #[test]
    fn add_existing_item_increments_quantity() {
        let mut c = cart();
        c.add("1", "Protein Power Bento", 8500, 1).expect("add");
        c.add("1", "Protein Power Bento", 8500, 2).expect("add");

        assert_eq!(c.items().len(), 1);
        assert_eq!(c.items()[0].quantity, 3);
    }

    #[test]
    fn add_rejects_bad_input() {
        let mut c = cart();
        assert!(matches!(c.add("", "x", 100, 1), Err(DomainError::InvalidInput(_))));
        assert!(matches!(c.add("a", "x", -1, 1), Err(DomainError::InvalidInput(_))));
        assert!(matches!(c.add("a", "x", 100, 0), Err(DomainError::InvalidInput(_))));
        assert!(c.is_empty());
    }

    #[test]
    fn set_quantity_updates_line() {
        let mut c = cart();
        c.add("1", "a", 100, 1).expect("add");
        c.set_quantity("1", 5).expect("set");
        assert_eq!(c.items()[0].quantity, 5);
    }

    #[test]
    fn set_quantity_zero_or_negative_removes_line() {
        let mut c = cart();
        c.add("1", "a", 100, 1).expect("add");
        c.add("2", "b", 100, 1).expect("add");
        c.set_quantity("1", 0).expect("set");
        c.set_quantity("2", -3).expect("set");
        assert!(c.is_empty());
    }

    #[test]
    fn set_quantity_unknown_item_is_not_found() {
        let mut c = cart();
        assert!(matches!(c.set_quantity("nope", 2), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn remove_reports_presence() {
        let mut c = cart();
        c.add("1", "a", 100, 1).expect("add");
        assert!(c.remove("1"));
        assert!(!c.remove("1"));
    }

    #[test]
    fn from_items_merges_repeated_ids() {
        let item = CartItem {
            item_id: "1".into(),
            name: "a".into(),
            unit_price: 100,
            quantity: 2,
        };
        let c = Cart::from_items(Uuid::new_v4(), vec![item.clone(), item]).expect("merge");
        assert_eq!(c.items().len(), 1);
        assert_eq!(c.items()[0].quantity, 4);
    }

    #[test]
    fn from_items_reports_quantity_overflow() {
        let item = CartItem {
            item_id: "1".into(),
            name: "a".into(),
            unit_price: 100,
            quantity: i32::MAX,
        };
        let err = Cart::from_items(Uuid::new_v4(), vec![item.clone(), item]).unwrap_err();
        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[test]
    fn pricing_lines_mirror_items() {
        let mut c = cart();
        c.add("1", "a", 8500, 2).expect("add");
        assert_eq!(c.pricing_lines(), vec![CartLine::new("1", 8500, 2)]);
        assert_eq!(c.items()[0].line_total(), 17000);
    }

    #[test]
    fn clear_empties_cart() {
        let mut c = cart();
        c.add("1", "a", 100, 1).expect("add");
        c.clear();
        assert!(c.is_empty());
        assert_eq!(c.item_count(), 0);
    }
}
