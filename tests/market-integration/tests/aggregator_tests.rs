//! Aggregation behavior over the reference dataset.

use mesa_common::circle::circles_for_user;
use mesa_common::order::{orders_for_user, OrderStatus, TOTAL_EPSILON, STATUS_SEQUENCE};

use mesa_market_integration::{item, make_order, sample_market, uid};

#[test]
fn order_totals_hold_across_the_dataset() {
    let market = sample_market();
    for order in &market.orders {
        assert!(
            order.totals_consistent(TOTAL_EPSILON),
            "order {} total drifted",
            order.id
        );
    }
    // The reference order: items 330.00, discount 32.5, total 297.5.
    let o1 = market.order(&mesa_common::order::OrderId("o1".into())).unwrap();
    assert!((o1.items_subtotal() - 330.0).abs() < TOTAL_EPSILON);
    assert!((o1.total_amount - 297.5).abs() < TOTAL_EPSILON);
}

#[test]
fn orders_for_user_is_idempotent_and_order_preserving() {
    let mut market = sample_market();
    market.orders.push(make_order(
        "o2",
        "tc2",
        "s2",
        OrderStatus::Pending,
        vec![item("p3", 50, 0.70, "v1")],
    ));
    market.orders.push(make_order(
        "o3",
        "tc1",
        "s1",
        OrderStatus::Delivered,
        vec![item("p1", 10, 2.25, "v2")],
    ));

    let v1 = uid("v1");
    let once = orders_for_user(&market.orders, &v1);
    let ids: Vec<&str> = once.iter().map(|o| o.id.0.as_str()).collect();
    assert_eq!(ids, vec!["o1", "o2"]);

    let owned: Vec<_> = once.into_iter().cloned().collect();
    let twice = orders_for_user(&owned, &v1);
    assert_eq!(
        twice.iter().map(|o| o.id.0.as_str()).collect::<Vec<_>>(),
        ids
    );
}

#[test]
fn joined_and_available_views_partition_the_circles() {
    let market = sample_market();
    for user in ["v1", "v2", "v3-not-a-member"] {
        let user = uid(user);
        let joined = circles_for_user(&market.circles, &user, true);
        let available = circles_for_user(&market.circles, &user, false);

        assert_eq!(joined.len() + available.len(), market.circles.len());
        for c in &joined {
            assert!(available.iter().all(|a| a.id != c.id));
        }
    }
}

#[test]
fn tc1_membership_example() {
    let market = sample_market();
    let v1 = uid("v1");
    let joined = market.circles_for(&v1, true);
    assert!(joined.iter().any(|c| c.id.0 == "tc1"));
    let available = market.circles_for(&v1, false);
    assert!(available.iter().all(|c| c.id.0 != "tc1"));

    // v2 is only in tc1, so tc2 shows up as available.
    let v2 = uid("v2");
    let available = market.circles_for(&v2, false);
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id.0, "tc2");
}

#[test]
fn progress_covers_the_sequence_and_excludes_cancelled() {
    assert_eq!(OrderStatus::Pending.progress(), Some(1.0 / 5.0));
    assert_eq!(OrderStatus::Delivered.progress(), Some(1.0));
    assert_eq!(OrderStatus::Cancelled.progress(), None);

    // Monotonically increasing along the display sequence.
    let fractions: Vec<f64> = STATUS_SEQUENCE
        .iter()
        .map(|s| s.progress().unwrap())
        .collect();
    assert!(fractions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn status_filter_narrows_tracked_orders() {
    let mut market = sample_market();
    market.orders.push(make_order(
        "o2",
        "tc1",
        "s1",
        OrderStatus::Delivered,
        vec![item("p1", 10, 2.25, "v1")],
    ));

    let v1 = uid("v1");
    assert_eq!(market.orders_for_with_status(&v1, None).len(), 2);
    let delivered = market.orders_for_with_status(&v1, Some(OrderStatus::Delivered));
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].id.0, "o2");
    assert!(market
        .orders_for_with_status(&v1, Some(OrderStatus::Cancelled))
        .is_empty());
}

#[test]
fn available_circle_search_is_case_insensitive() {
    let market = sample_market();
    let v2 = uid("v2");
    assert_eq!(market.available_circles(&v2, "MEXICAN").len(), 1);
    assert_eq!(market.available_circles(&v2, "authentic").len(), 1);
    assert!(market.available_circles(&v2, "dairy co-op").is_empty());
    // Empty query returns the full available set.
    assert_eq!(market.available_circles(&v2, "").len(), 1);
}
