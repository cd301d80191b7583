//! Shopping cart lines.

use serde::{Deserialize, Serialize};

use crate::product::ProductRecord;
use crate::types::{Price, ProductId};

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: ProductRecord,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Cart contents in the order products were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add(&mut self, product: ProductRecord) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product.id != id);
        self.lines.len() != before
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::line_price).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, price: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            category: "General".to_string(),
            description: None,
            price: Price::new(price.parse().unwrap()),
            image_url: None,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"));
        cart.add(product("2", "50"));
        cart.add(product("1", "100"));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal().display(), "$250,00");
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(product("1", "100"));

        assert!(!cart.remove(&ProductId::new("9")));
        assert!(cart.remove(&ProductId::new("1")));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_session_roundtrip() {
        let mut cart = Cart::new();
        cart.add(product("1", "1999.99"));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_subtotal_saturates_on_huge_prices() {
        let mut cart = Cart::new();
        cart.add(product("1", "50000000000000000000000000000"));
        cart.add(product("1", "50000000000000000000000000000"));
        cart.add(product("2", "10"));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.lines()[0].line_price(), Price::new(rust_decimal::Decimal::MAX));
        assert_eq!(cart.subtotal(), Price::new(rust_decimal::Decimal::MAX));
    }
}
