//! GridClear - Demonstration Binary
//!
//! Runs one call-auction round over a small energy order book and prints
//! the settled result. The library itself does no I/O; this binary is the
//! orchestrator.

use gridclear::types::price::{from_fixed_trimmed, to_fixed};
use gridclear::types::{Order, Side};
use gridclear::CallAuction;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("===========================================");
    println!("  GridClear - P2P Energy Call Auction");
    println!("===========================================");
    println!();

    let mut auction = CallAuction::with_capacity(1_000);

    // Two households bidding for energy, two solar producers offering it
    let orders = [
        ("wallet-household-a", Side::Bid, "10", "5"),
        ("wallet-household-b", Side::Bid, "8", "3"),
        ("wallet-solar-1", Side::Ask, "6", "4"),
        ("wallet-solar-2", Side::Ask, "9", "6"),
    ];

    for (i, (participant, side, price, quantity)) in orders.iter().enumerate() {
        let order = Order::new(
            (i + 1) as u64,
            *participant,
            *side,
            to_fixed(price).expect("demo price is well-formed"),
            to_fixed(quantity).expect("demo quantity is well-formed"),
            (i + 1) as u64,
        );
        auction.submit(order).expect("demo orders are valid");
        println!(
            "Submitted {:?} {} kWh @ {} from {}",
            side, quantity, price, participant
        );
    }

    println!();
    match auction.run_round(1703577600000) {
        Ok(settled) => {
            println!("Round {} settled:", settled.round_id);
            println!(
                "  Cleared quantity: {} kWh",
                from_fixed_trimmed(settled.clearing.cleared_quantity)
            );
            if let Some(price) = settled.clearing.clearing_price {
                println!("  Clearing price:   {} per kWh", from_fixed_trimmed(price));
            }
            for trade in &settled.trades {
                println!(
                    "  Trade {}: {} -> {} for {} kWh @ {}",
                    trade.id,
                    trade.seller,
                    trade.buyer,
                    from_fixed_trimmed(trade.quantity),
                    from_fixed_trimmed(trade.price),
                );
            }
            println!("  Receipt root:     {}", settled.receipt.state_root_hex());
        }
        Err(err) => {
            eprintln!("Round failed: {err}");
        }
    }

    println!();
    println!(
        "Orders still open for the next round: {}",
        auction.book().order_count()
    );
}
