use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::circle::{circles_for_user, filter_circles, CircleId, TrustCircle};
use crate::identity::{Supplier, UserId, Vendor};
use crate::notification::{unread_count, Notification};
use crate::order::{filter_by_status, orders_for_user, Order, OrderId, OrderStatus, TOTAL_EPSILON};
use crate::product::{Product, ProductId};
use crate::recommend::{recommend_suppliers, Recommendation};

/// Snapshot loading / validation failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("order {order}: total {actual} does not match items minus discount ({expected})")]
    TotalMismatch {
        order: OrderId,
        expected: f64,
        actual: f64,
    },

    #[error("order {order}: participant set does not match the vendors in its items")]
    ParticipantMismatch { order: OrderId },

    #[error("order {order}: unknown {field} \"{id}\"")]
    DanglingReference {
        order: OrderId,
        field: &'static str,
        id: String,
    },

    #[error("circle {circle}: creator {creator} is not a member")]
    CreatorNotMember { circle: CircleId, creator: UserId },

    #[error("vendor {vendor}: circle membership out of sync with circle {circle}")]
    MembershipMismatch { vendor: UserId, circle: CircleId },
}

/// The full in-memory market state: the mock-data collections that form
/// the input contract for all aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub vendors: Vec<Vendor>,
    pub suppliers: Vec<Supplier>,
    pub circles: Vec<TrustCircle>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Vendor dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorStats {
    pub circles_joined: usize,
    pub active_orders: usize,
    /// Sum of bulk discounts across all of the vendor's orders.
    pub total_savings: f64,
    pub rating: f64,
}

/// Supplier dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierStats {
    pub orders: usize,
    pub total_revenue: f64,
    pub average_order_value: f64,
    /// Distinct circles this supplier has fulfilled orders for.
    pub circles_served: usize,
}

impl MarketSnapshot {
    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // Lookups. Absence propagates as None, never panics.

    pub fn vendor(&self, id: &UserId) -> Option<&Vendor> {
        self.vendors.iter().find(|v| &v.profile.id == id)
    }

    pub fn supplier(&self, id: &UserId) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| &s.profile.id == id)
    }

    pub fn circle(&self, id: &CircleId) -> Option<&TrustCircle> {
        self.circles.iter().find(|c| &c.id == id)
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Orders the user participates in, preserving source order.
    pub fn orders_for(&self, user: &UserId) -> Vec<&Order> {
        orders_for_user(&self.orders, user)
    }

    /// The user's orders narrowed by a status filter (`None` = all).
    pub fn orders_for_with_status(
        &self,
        user: &UserId,
        status: Option<OrderStatus>,
    ) -> Vec<&Order> {
        filter_by_status(self.orders_for(user), status)
    }

    /// Circles where the membership test equals `joined`.
    pub fn circles_for(&self, user: &UserId, joined: bool) -> Vec<&TrustCircle> {
        circles_for_user(&self.circles, user, joined)
    }

    /// Non-member circles matching a search query (the "available circles"
    /// panel). Empty query keeps them all.
    pub fn available_circles(&self, user: &UserId, query: &str) -> Vec<&TrustCircle> {
        filter_circles(self.circles_for(user, false), query)
    }

    pub fn vendor_stats(&self, user: &UserId) -> Option<VendorStats> {
        let vendor = self.vendor(user)?;
        let orders = self.orders_for(user);
        Some(VendorStats {
            circles_joined: self.circles_for(user, true).len(),
            active_orders: orders.iter().filter(|o| o.status.is_active()).count(),
            total_savings: orders.iter().map(|o| o.discount).sum(),
            rating: vendor.profile.rating,
        })
    }

    pub fn supplier_stats(&self, user: &UserId) -> Option<SupplierStats> {
        self.supplier(user)?;
        let orders: Vec<&Order> = self.orders.iter().filter(|o| &o.supplier_id == user).collect();
        let total_revenue: f64 = orders.iter().map(|o| o.total_amount).sum();
        let circles_served = orders
            .iter()
            .map(|o| &o.trust_circle_id)
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        Some(SupplierStats {
            orders: orders.len(),
            average_order_value: if orders.is_empty() {
                0.0
            } else {
                total_revenue / orders.len() as f64
            },
            total_revenue,
            circles_served,
        })
    }

    /// Ranked supplier recommendations for a vendor's dashboard.
    pub fn recommendations_for(&self, user: &UserId) -> Option<Vec<Recommendation>> {
        let vendor = self.vendor(user)?;
        Some(recommend_suppliers(vendor, &self.suppliers, &self.orders))
    }

    /// Badge count for the notification bell.
    pub fn unread_notifications(&self) -> usize {
        unread_count(&self.notifications)
    }

    /// Check structural invariants, reporting the first violation found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for order in &self.orders {
            if !order.totals_consistent(TOTAL_EPSILON) {
                return Err(SnapshotError::TotalMismatch {
                    order: order.id.clone(),
                    expected: order.items_subtotal() - order.discount,
                    actual: order.total_amount,
                });
            }
            if !order.participants_match() {
                return Err(SnapshotError::ParticipantMismatch {
                    order: order.id.clone(),
                });
            }
            if self.circle(&order.trust_circle_id).is_none() {
                return Err(SnapshotError::DanglingReference {
                    order: order.id.clone(),
                    field: "trust circle",
                    id: order.trust_circle_id.0.clone(),
                });
            }
            if self.supplier(&order.supplier_id).is_none() {
                return Err(SnapshotError::DanglingReference {
                    order: order.id.clone(),
                    field: "supplier",
                    id: order.supplier_id.0.clone(),
                });
            }
            for item in &order.items {
                if self.product(&item.product_id).is_none() {
                    return Err(SnapshotError::DanglingReference {
                        order: order.id.clone(),
                        field: "product",
                        id: item.product_id.0.clone(),
                    });
                }
                if self.vendor(&item.vendor_id).is_none() {
                    return Err(SnapshotError::DanglingReference {
                        order: order.id.clone(),
                        field: "vendor",
                        id: item.vendor_id.0.clone(),
                    });
                }
            }
        }

        for circle in &self.circles {
            if !circle.is_member(&circle.created_by) {
                return Err(SnapshotError::CreatorNotMember {
                    circle: circle.id.clone(),
                    creator: circle.created_by.clone(),
                });
            }
        }

        // The denormalized membership list on each vendor must agree with
        // the circle member sets.
        for vendor in &self.vendors {
            for circle_id in &vendor.trust_circles {
                let in_sync = self
                    .circle(circle_id)
                    .is_some_and(|c| c.is_member(&vendor.profile.id));
                if !in_sync {
                    return Err(SnapshotError::MembershipMismatch {
                        vendor: vendor.profile.id.clone(),
                        circle: circle_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
