use serde::{Deserialize, Serialize};

use crate::identity::{Supplier, UserId, Vendor};
use crate::order::{orders_for_user, Order};

/// How many recommendations the dashboard shows.
pub const MAX_RECOMMENDATIONS: usize = 3;

const RATING_WEIGHT: f64 = 0.4;
const PROXIMITY_WEIGHT: f64 = 0.3;
const VERIFIED_WEIGHT: f64 = 0.2;
const HISTORY_WEIGHT: f64 = 0.1;

/// A ranked supplier suggestion for a vendor's dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub supplier_id: UserId,
    /// Composite score in [0, 1].
    pub score: f64,
    pub reasons: Vec<String>,
    /// Mean bulk discount this vendor saw on past orders with the supplier.
    pub estimated_savings: f64,
}

/// Score every supplier that can deliver to the vendor and return the top
/// matches, best first. Deterministic: ties break on supplier id.
pub fn recommend_suppliers(
    vendor: &Vendor,
    suppliers: &[Supplier],
    orders: &[Order],
) -> Vec<Recommendation> {
    let history = orders_for_user(orders, &vendor.profile.id);

    let mut recs: Vec<Recommendation> = suppliers
        .iter()
        .filter(|s| s.delivers_to(&vendor.profile.location))
        .map(|s| score_supplier(vendor, s, &history))
        .collect();

    recs.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.supplier_id.cmp(&b.supplier_id))
    });
    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}

fn score_supplier(vendor: &Vendor, supplier: &Supplier, history: &[&Order]) -> Recommendation {
    let distance = supplier
        .profile
        .location
        .distance_km(&vendor.profile.location);
    let proximity = (1.0 - distance / supplier.delivery_radius).clamp(0.0, 1.0);

    let past: Vec<&&Order> = history
        .iter()
        .filter(|o| o.supplier_id == supplier.profile.id)
        .collect();
    let estimated_savings = if past.is_empty() {
        0.0
    } else {
        past.iter().map(|o| o.discount).sum::<f64>() / past.len() as f64
    };

    let mut score = (supplier.profile.rating / 5.0) * RATING_WEIGHT + proximity * PROXIMITY_WEIGHT;
    if supplier.verified {
        score += VERIFIED_WEIGHT;
    }
    if !past.is_empty() {
        score += HISTORY_WEIGHT;
    }

    let mut reasons = vec![
        format!("{distance:.1} km from your location"),
        format!("{}/5.0 customer rating", supplier.profile.rating),
    ];
    if estimated_savings > 0.0 {
        reasons.push("Bulk pricing available".into());
    }
    if supplier.verified {
        reasons.push("Verified supplier status".into());
    }

    Recommendation {
        supplier_id: supplier.profile.id.clone(),
        score,
        reasons,
        estimated_savings,
    }
}
