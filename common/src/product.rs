use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// Unique product identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry owned by a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Free-form category label ("vegetables", "spices", ...).
    pub category: String,
    /// Sale unit ("lb", "oz", ...).
    pub unit: String,
    pub base_price: f64,
    /// Minimum quantity per order line.
    pub min_quantity: u32,
    pub supplier_id: UserId,
    pub in_stock: bool,
    pub description: String,
}

impl Product {
    /// Whether a requested quantity satisfies the minimum order line.
    pub fn meets_minimum(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity
    }
}
