//! Frozen order-book snapshot consumed by an auction round.
//!
//! ## Canonical Ordering
//!
//! Bids sort by price descending, asks by price ascending; ties break by
//! earliest submission time, then by order id. This is a total order, so
//! two snapshots of the same open orders are always identical - the
//! foundation of the engine's determinism guarantee.

use std::cmp::Ordering;

use crate::types::{Order, Side};

/// Immutable view of the open orders entering a round, partitioned by side
/// and canonically sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookSnapshot {
    /// Open bids: price descending, then submitted_at, then id
    pub bids: Vec<Order>,

    /// Open asks: price ascending, then submitted_at, then id
    pub asks: Vec<Order>,
}

/// Tie-break on submission time, then order id. Applied after the
/// side-specific price comparison so the overall order is total.
fn time_then_id(a: &Order, b: &Order) -> Ordering {
    a.submitted_at
        .cmp(&b.submitted_at)
        .then_with(|| a.id.cmp(&b.id))
}

impl BookSnapshot {
    /// Build a snapshot from an iterator of open orders.
    pub fn freeze(orders: impl IntoIterator<Item = Order>) -> Self {
        let mut bids = Vec::new();
        let mut asks = Vec::new();

        for order in orders {
            match order.side {
                Side::Bid => bids.push(order),
                Side::Ask => asks.push(order),
            }
        }

        bids.sort_unstable_by(|a, b| b.price.cmp(&a.price).then_with(|| time_then_id(a, b)));
        asks.sort_unstable_by(|a, b| a.price.cmp(&b.price).then_with(|| time_then_id(a, b)));

        Self { bids, asks }
    }

    /// Total number of orders in the snapshot
    pub fn order_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// Check if either side is empty (no crossing possible)
    pub fn is_one_sided(&self) -> bool {
        self.bids.is_empty() || self.asks.is_empty()
    }

    /// Sum of remaining bid quantity
    pub fn bid_quantity(&self) -> u64 {
        self.bids
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.remaining))
    }

    /// Sum of remaining ask quantity
    pub fn ask_quantity(&self) -> u64 {
        self.asks
            .iter()
            .fold(0u64, |acc, o| acc.saturating_add(o.remaining))
    }

    /// Check whether the best bid reaches the best ask
    pub fn is_crossed(&self) -> bool {
        match (self.bids.first(), self.asks.first()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
