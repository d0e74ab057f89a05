//! Text reports over a market snapshot.
//!
//! Loads a snapshot JSON (the bundled sample when no file is given) and
//! prints the same views the marketplace app renders: dashboards, order
//! tracking, circle listings, order chat, and invariant checks.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use mesa_common::identity::UserId;
use mesa_common::notification::format_relative;
use mesa_common::order::{Order, OrderId, OrderStatus};
use mesa_common::snapshot::MarketSnapshot;

const SAMPLE_SNAPSHOT: &str = include_str!("../data/sample-market.json");

#[derive(Parser)]
#[command(name = "mesa-report", about = "Text reports over a mesa market snapshot")]
struct Cli {
    /// Snapshot JSON file. Uses the bundled sample market when omitted.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dashboard headline numbers for a vendor or supplier.
    Dashboard {
        #[arg(long)]
        user: String,
    },
    /// Track a user's group orders, optionally narrowed by status.
    Orders {
        #[arg(long)]
        user: String,
        #[arg(long)]
        status: Option<OrderStatus>,
    },
    /// List a user's circles and the circles available to join.
    Circles {
        #[arg(long)]
        user: String,
        /// Substring search over available circle names/descriptions.
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Print an order's chat log.
    Chat {
        #[arg(long)]
        order: String,
    },
    /// List notifications with the unread badge count.
    Notifications,
    /// Check snapshot invariants.
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let raw = match &cli.snapshot {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading snapshot {}", path.display()))?,
        None => SAMPLE_SNAPSHOT.to_string(),
    };
    let snapshot = MarketSnapshot::from_json(&raw).context("parsing snapshot")?;
    info!(
        vendors = snapshot.vendors.len(),
        suppliers = snapshot.suppliers.len(),
        circles = snapshot.circles.len(),
        orders = snapshot.orders.len(),
        "snapshot loaded"
    );

    match cli.command {
        Command::Dashboard { user } => dashboard(&snapshot, &UserId(user)),
        Command::Orders { user, status } => orders(&snapshot, &UserId(user), status),
        Command::Circles { user, search } => circles(&snapshot, &UserId(user), &search),
        Command::Chat { order } => chat(&snapshot, &OrderId(order)),
        Command::Notifications => notifications(&snapshot),
        Command::Validate => validate(&snapshot),
    }
}

fn dashboard(snapshot: &MarketSnapshot, user: &UserId) -> Result<()> {
    if let Some(vendor) = snapshot.vendor(user) {
        let stats = snapshot
            .vendor_stats(user)
            .expect("vendor exists, stats must too");
        println!("Welcome back, {} ({})", vendor.profile.name, vendor.business_name);
        println!("  Trust circles: {}", stats.circles_joined);
        println!("  Active orders: {}", stats.active_orders);
        println!("  Total savings: ${:.2}", stats.total_savings);
        println!("  Rating:        {:.1}/5.0", stats.rating);

        let recs = snapshot.recommendations_for(user).unwrap_or_default();
        if !recs.is_empty() {
            println!("\nRecommended suppliers:");
            for rec in recs {
                let name = snapshot
                    .supplier(&rec.supplier_id)
                    .map(|s| s.company_name.as_str())
                    .unwrap_or(rec.supplier_id.as_str());
                println!(
                    "  {name} (score {:.2}, est. savings ${:.2})",
                    rec.score, rec.estimated_savings
                );
                for reason in &rec.reasons {
                    println!("    - {reason}");
                }
            }
        }
        return Ok(());
    }

    if snapshot.supplier(user).is_some() {
        let stats = snapshot
            .supplier_stats(user)
            .expect("supplier exists, stats must too");
        println!("Supplier dashboard for {user}");
        println!("  Orders:         {}", stats.orders);
        println!("  Total revenue:  ${:.2}", stats.total_revenue);
        println!("  Avg order:      ${:.2}", stats.average_order_value);
        println!("  Circles served: {}", stats.circles_served);
        return Ok(());
    }

    bail!("no vendor or supplier with id {user}");
}

fn orders(snapshot: &MarketSnapshot, user: &UserId, status: Option<OrderStatus>) -> Result<()> {
    let orders = snapshot.orders_for_with_status(user, status);
    if orders.is_empty() {
        match status {
            None => println!("No orders for {user}."),
            Some(s) => println!("No orders for {user} with status \"{}\".", s.label()),
        }
        return Ok(());
    }
    for order in orders {
        print_order(snapshot, order);
    }
    Ok(())
}

fn print_order(snapshot: &MarketSnapshot, order: &Order) {
    let supplier = snapshot
        .supplier(&order.supplier_id)
        .map(|s| s.company_name.as_str())
        .unwrap_or("unknown supplier");
    println!("Order {} — {}", order.id, supplier);
    println!(
        "  {} items, ${:.2} total (saved ${:.2})",
        order.items.len(),
        order.total_amount,
        order.discount
    );
    match order.status.progress() {
        Some(fraction) => println!(
            "  Status: {} [{:>3.0}%]",
            order.status.label(),
            fraction * 100.0
        ),
        None => println!("  Status: cancelled"),
    }
    println!(
        "  Placed {}, expected delivery {}",
        order.created_at.format("%Y-%m-%d"),
        order.expected_delivery.format("%Y-%m-%d")
    );
    println!("  Chat: {} messages", order.chat.len());
}

fn circles(snapshot: &MarketSnapshot, user: &UserId, search: &str) -> Result<()> {
    println!("My circles:");
    let mine = snapshot.circles_for(user, true);
    if mine.is_empty() {
        println!("  (none joined yet)");
    }
    for circle in mine {
        println!(
            "  {} — {} members, {} orders",
            circle.name,
            circle.member_count(),
            circle.total_orders
        );
    }

    println!("\nAvailable circles:");
    for circle in snapshot.available_circles(user, search) {
        let ready = if circle.can_place_group_order() {
            "ready"
        } else {
            "recruiting"
        };
        println!(
            "  {} — {}/{} min members ({ready})",
            circle.name,
            circle.member_count(),
            circle.min_members
        );
    }
    Ok(())
}

fn chat(snapshot: &MarketSnapshot, order_id: &OrderId) -> Result<()> {
    let Some(order) = snapshot.order(order_id) else {
        bail!("no order with id {order_id}");
    };
    for msg in &order.chat {
        let author = if msg.is_system() {
            "[system]".to_string()
        } else {
            snapshot
                .vendor(&msg.user_id)
                .map(|v| v.profile.name.clone())
                .unwrap_or_else(|| msg.user_id.to_string())
        };
        println!("{} {}: {}", msg.timestamp.format("%H:%M"), author, msg.message);
    }
    Ok(())
}

fn notifications(snapshot: &MarketSnapshot) -> Result<()> {
    println!("{} unread", snapshot.unread_notifications());
    let now = chrono::Utc::now();
    for n in &snapshot.notifications {
        let marker = if n.read { " " } else { "*" };
        println!(
            "{marker} [{}] {} — {}",
            format_relative(n.timestamp, now),
            n.title,
            n.message
        );
    }
    Ok(())
}

fn validate(snapshot: &MarketSnapshot) -> Result<()> {
    snapshot.validate().context("snapshot invariant violated")?;
    println!(
        "snapshot OK: {} vendors, {} suppliers, {} circles, {} products, {} orders",
        snapshot.vendors.len(),
        snapshot.suppliers.len(),
        snapshot.circles.len(),
        snapshot.products.len(),
        snapshot.orders.len()
    );
    Ok(())
}
