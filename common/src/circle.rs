use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::UserId;

/// A trust circle's unique identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CircleId(pub String);

impl std::fmt::Display for CircleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cooperative group of vendors that pools orders with a supplier to
/// receive bulk pricing.
///
/// A vendor is "joined" iff their id is in `members`. The set type keeps
/// member ids unique by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustCircle {
    pub id: CircleId,
    pub name: String,
    pub description: String,
    pub members: BTreeSet<UserId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    /// Running counter of group orders this circle has placed.
    pub total_orders: u32,
    /// Members required before the circle may place a group order.
    pub min_members: u32,
    pub category: String,
}

impl TrustCircle {
    pub fn is_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether the circle has reached its membership threshold and may
    /// place a group order.
    pub fn can_place_group_order(&self) -> bool {
        self.members.len() as u32 >= self.min_members
    }
}

/// Circles where the membership test for `user` equals `joined`.
///
/// `joined = true` gives "my circles", `joined = false` the circles still
/// available to join. Source order is preserved.
pub fn circles_for_user<'a>(
    circles: &'a [TrustCircle],
    user: &UserId,
    joined: bool,
) -> Vec<&'a TrustCircle> {
    circles
        .iter()
        .filter(|c| c.is_member(user) == joined)
        .collect()
}

/// Case-insensitive substring match against circle name and description.
/// An empty query passes every circle through unchanged.
pub fn filter_circles<'a>(
    circles: impl IntoIterator<Item = &'a TrustCircle>,
    query: &str,
) -> Vec<&'a TrustCircle> {
    let needle = query.to_lowercase();
    circles
        .into_iter()
        .filter(|c| {
            needle.is_empty()
                || c.name.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .collect()
}
