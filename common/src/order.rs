use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::circle::CircleId;
use crate::identity::UserId;
use crate::product::ProductId;

/// Unique order identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tolerance for comparing money amounts derived from f64 arithmetic.
pub const TOTAL_EPSILON: f64 = 0.01;

/// Order fulfilment status.
///
/// The first five variants form the fixed display progression;
/// `Cancelled` is terminal and sits outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// The non-cancelled progression, in display order.
pub const STATUS_SEQUENCE: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// Position in the progression, if any. `Cancelled` has none.
    pub fn sequence_index(self) -> Option<usize> {
        STATUS_SEQUENCE.iter().position(|s| *s == self)
    }

    /// Progress fraction in (0, 1] for display, or `None` for `Cancelled` —
    /// callers must special-case cancellation.
    pub fn progress(self) -> Option<f64> {
        self.sequence_index()
            .map(|i| (i + 1) as f64 / STATUS_SEQUENCE.len() as f64)
    }

    /// Whether the order can still advance.
    pub fn is_active(self) -> bool {
        !matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One vendor's line in a group order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: f64,
    /// The vendor who requested this line.
    pub vendor_id: UserId,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// A group order placed on behalf of a trust circle with one supplier,
/// aggregating line items from multiple vendors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub trust_circle_id: CircleId,
    pub supplier_id: UserId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Sum of line totals minus `discount`, within [`TOTAL_EPSILON`].
    pub total_amount: f64,
    /// Savings from bulk pricing.
    pub discount: f64,
    pub created_at: DateTime<Utc>,
    pub expected_delivery: DateTime<Utc>,
    /// Vendor ids participating in the order; must equal the set of
    /// vendor ids present in `items`.
    pub participants: BTreeSet<UserId>,
    /// Append-only chat log; array position is chronological order.
    #[serde(default)]
    pub chat: Vec<ChatMessage>,
}

impl Order {
    /// Sum of `quantity × unit_price` over all items, before discount.
    pub fn items_subtotal(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// The set of vendor ids present in the items.
    pub fn derived_participants(&self) -> BTreeSet<UserId> {
        self.items.iter().map(|i| i.vendor_id.clone()).collect()
    }

    /// Whether the stored participant set matches the one derived from items.
    pub fn participants_match(&self) -> bool {
        self.participants == self.derived_participants()
    }

    /// Whether `total_amount == subtotal - discount` within `epsilon`.
    pub fn totals_consistent(&self, epsilon: f64) -> bool {
        (self.items_subtotal() - self.discount - self.total_amount).abs() <= epsilon
    }
}

/// Orders whose participant set contains `user`, preserving source order.
pub fn orders_for_user<'a>(orders: &'a [Order], user: &UserId) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.participants.contains(user))
        .collect()
}

/// Orders matching a status filter. `None` means all statuses.
pub fn filter_by_status<'a>(
    orders: impl IntoIterator<Item = &'a Order>,
    status: Option<OrderStatus>,
) -> Vec<&'a Order> {
    orders
        .into_iter()
        .filter(|o| status.is_none_or(|s| o.status == s))
        .collect()
}
