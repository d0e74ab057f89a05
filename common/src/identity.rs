use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::circle::CircleId;
use crate::location::GeoLocation;

/// A user's unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role a user can have in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Vendor,
    Supplier,
}

/// Identity fields shared by both roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub location: GeoLocation,
    pub rating: f64,
    pub joined_at: DateTime<Utc>,
}

/// A buyer-side business (e.g. a food stall) that joins circles and
/// places group orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(flatten)]
    pub profile: Profile,
    pub business_name: String,
    pub cuisine_type: String,
    /// Circles this vendor belongs to (denormalized from circle membership).
    pub trust_circles: Vec<CircleId>,
    pub total_orders: u32,
}

/// A seller-side business providing a product catalog and fulfilling orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(flatten)]
    pub profile: Profile,
    pub company_name: String,
    pub categories: Vec<String>,
    pub verified: bool,
    pub min_order_value: f64,
    /// Delivery radius in kilometers from the supplier's location.
    pub delivery_radius: f64,
}

impl Supplier {
    /// Whether the supplier delivers to the given location.
    pub fn delivers_to(&self, location: &GeoLocation) -> bool {
        self.profile.location.distance_km(location) <= self.delivery_radius
    }
}

/// A marketplace user, discriminated by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum UserAccount {
    Vendor(Vendor),
    Supplier(Supplier),
}

impl UserAccount {
    pub fn profile(&self) -> &Profile {
        match self {
            UserAccount::Vendor(v) => &v.profile,
            UserAccount::Supplier(s) => &s.profile,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.profile().id
    }

    pub fn role(&self) -> UserRole {
        match self {
            UserAccount::Vendor(_) => UserRole::Vendor,
            UserAccount::Supplier(_) => UserRole::Supplier,
        }
    }
}
