//! Snapshot loading, validation, stats, and recommendation scenarios.

use mesa_common::chat::SYSTEM_USER;
use mesa_common::order::OrderId;
use mesa_common::snapshot::{MarketSnapshot, SnapshotError};

use mesa_market_integration::{sample_market, uid};

#[test]
fn sample_market_satisfies_all_invariants() {
    sample_market().validate().expect("reference data is consistent");
}

#[test]
fn json_round_trip_preserves_the_snapshot() {
    let market = sample_market();
    let json = market.to_json().unwrap();
    let restored = MarketSnapshot::from_json(&json).unwrap();
    assert_eq!(restored, market);
}

#[test]
fn camel_case_wire_format() {
    let market = sample_market();
    let value: serde_json::Value = serde_json::from_str(&market.to_json().unwrap()).unwrap();

    let vendor = &value["vendors"][0];
    assert_eq!(vendor["businessName"], "Maria's Tacos");
    assert_eq!(vendor["trustCircles"][0], "tc1");

    let order = &value["orders"][0];
    assert_eq!(order["trustCircleId"], "tc1");
    assert_eq!(order["totalAmount"], 297.5);
    assert_eq!(order["items"][0]["unitPrice"], 2.5);
    assert_eq!(order["chat"][0]["type"], "system");
    assert_eq!(order["status"], "processing");
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = MarketSnapshot::from_json("{ not json").unwrap_err();
    assert!(matches!(err, SnapshotError::Parse(_)));
}

#[test]
fn tampered_total_fails_validation() {
    let mut market = sample_market();
    market.orders[0].total_amount += 10.0;
    let err = market.validate().unwrap_err();
    assert!(matches!(err, SnapshotError::TotalMismatch { .. }));
    // The message names the offending order.
    assert!(err.to_string().contains("o1"));
}

#[test]
fn dropped_vendor_breaks_referential_integrity() {
    let mut market = sample_market();
    market.vendors.retain(|v| v.profile.id != uid("v2"));
    assert!(matches!(
        market.validate(),
        Err(SnapshotError::DanglingReference { field: "vendor", .. })
    ));
}

#[test]
fn vendor_dashboard_numbers() {
    let market = sample_market();
    let stats = market.vendor_stats(&uid("v1")).unwrap();
    assert_eq!(stats.circles_joined, 2);
    assert_eq!(stats.active_orders, 1);
    assert!((stats.total_savings - 32.5).abs() < 1e-9);
    assert!((stats.rating - 4.8).abs() < 1e-9);

    assert!(market.vendor_stats(&uid("s1")).is_none());
}

#[test]
fn supplier_dashboard_numbers() {
    let market = sample_market();
    let stats = market.supplier_stats(&uid("s1")).unwrap();
    assert_eq!(stats.orders, 1);
    assert!((stats.total_revenue - 297.5).abs() < 1e-9);
    assert!((stats.average_order_value - 297.5).abs() < 1e-9);
    assert_eq!(stats.circles_served, 1);

    // s2 has no orders yet; averages must not divide by zero.
    let idle = market.supplier_stats(&uid("s2")).unwrap();
    assert_eq!(idle.orders, 0);
    assert_eq!(idle.average_order_value, 0.0);
}

#[test]
fn recommendations_rank_in_range_suppliers() {
    let market = sample_market();
    let recs = market.recommendations_for(&uid("v1")).unwrap();
    assert!(!recs.is_empty());
    // Best first, all scores in range.
    for pair in recs.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    for rec in &recs {
        assert!(rec.score > 0.0 && rec.score <= 1.0);
        assert!(market.supplier(&rec.supplier_id).is_some());
    }
    // Fresh Foods has order history with v1, so it carries bulk savings.
    let fresh = recs.iter().find(|r| r.supplier_id == uid("s1")).unwrap();
    assert!((fresh.estimated_savings - 32.5).abs() < 1e-9);

    assert!(market.recommendations_for(&uid("s1")).is_none());
}

#[test]
fn chat_log_is_chronological_with_system_sentinel() {
    let market = sample_market();
    let order = market.order(&OrderId("o1".into())).unwrap();
    assert_eq!(order.chat.len(), 2);
    assert!(order.chat[0].is_system());
    assert_eq!(order.chat[0].user_id.as_str(), SYSTEM_USER);
    assert!(order.chat[0].timestamp <= order.chat[1].timestamp);
}

#[test]
fn unread_notification_badge() {
    let market = sample_market();
    assert_eq!(market.unread_notifications(), 2);
}
