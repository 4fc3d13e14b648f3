//! Uniform-price clearing: equilibrium quantity and price for one round.
//!
//! ## Algorithm
//!
//! With bids sorted by price descending and asks ascending (the snapshot's
//! canonical order), walk both sides unit-by-unit. The cleared quantity Q
//! is the largest quantity at which the Q-th bid unit still prices at or
//! above the Q-th ask unit - the point where the cumulative demand and
//! supply curves cross. The marginal bid and ask are the orders on either
//! side of that boundary.
//!
//! The clearing price is the midpoint of the marginal prices, rounded down
//! to the currency minor unit, then clamped into [marginal ask, marginal
//! bid] so rounding can never push it outside the band every matched order
//! agreed to.
//!
//! An empty side or an uncrossed book clears zero quantity with no price.
//! That is a normal no-trade round, not an error.

use crate::orderbook::BookSnapshot;
use crate::types::price;

// ============================================================================
// ClearingResult
// ============================================================================

/// Outcome of clearing one snapshot.
///
/// `cleared_quantity == 0` if and only if `clearing_price` is `None`
/// (no-trade round). The marginal prices bound every trade the matcher
/// will emit: marginal ask ≤ clearing price ≤ marginal bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearingResult {
    /// Total quantity that clears this round (fixed-point)
    pub cleared_quantity: u64,

    /// Uniform price every trade executes at; None for a no-trade round
    pub clearing_price: Option<u64>,

    /// Price of the last bid unit inside the crossing
    pub marginal_bid: Option<u64>,

    /// Price of the last ask unit inside the crossing
    pub marginal_ask: Option<u64>,
}

impl ClearingResult {
    /// Result for a round where no bid reaches any ask.
    pub fn no_trade() -> Self {
        Self::default()
    }

    /// Check whether this round clears nothing
    pub fn is_no_trade(&self) -> bool {
        self.cleared_quantity == 0
    }
}

// ============================================================================
// ClearingEngine
// ============================================================================

/// Computes the equilibrium for a frozen snapshot.
///
/// Pure function of its input: the same snapshot always produces the same
/// result, bit for bit.
pub struct ClearingEngine;

impl ClearingEngine {
    /// Find the crossing quantity and uniform clearing price.
    ///
    /// # Example
    ///
    /// ```
    /// use gridclear::engine::ClearingEngine;
    /// use gridclear::orderbook::BookSnapshot;
    /// use gridclear::types::{Order, Side};
    ///
    /// let snapshot = BookSnapshot::freeze(vec![
    ///     Order::new(1, "a", Side::Bid, 1_000_000_000, 500_000_000, 1),
    ///     Order::new(2, "b", Side::Ask, 600_000_000, 500_000_000, 2),
    /// ]);
    ///
    /// let result = ClearingEngine::clear(&snapshot);
    /// assert_eq!(result.cleared_quantity, 500_000_000);
    /// // Midpoint of 6.0 and 10.0
    /// assert_eq!(result.clearing_price, Some(800_000_000));
    /// ```
    pub fn clear(snapshot: &BookSnapshot) -> ClearingResult {
        let bids = &snapshot.bids;
        let asks = &snapshot.asks;

        let mut cleared: u64 = 0;
        let mut marginal_bid: Option<u64> = None;
        let mut marginal_ask: Option<u64> = None;

        let mut bi = 0usize;
        let mut ai = 0usize;
        let mut bid_left = bids.first().map_or(0, |o| o.remaining);
        let mut ask_left = asks.first().map_or(0, |o| o.remaining);

        while bi < bids.len() && ai < asks.len() {
            let bid_price = bids[bi].price;
            let ask_price = asks[ai].price;

            // Crossing ends where demand no longer pays what supply asks
            if bid_price < ask_price {
                break;
            }

            let take = bid_left.min(ask_left);
            if take == 0 {
                // Book invariant keeps remaining > 0; bail rather than spin
                break;
            }

            cleared += take;
            marginal_bid = Some(bid_price);
            marginal_ask = Some(ask_price);

            bid_left -= take;
            ask_left -= take;
            if bid_left == 0 {
                bi += 1;
                bid_left = bids.get(bi).map_or(0, |o| o.remaining);
            }
            if ask_left == 0 {
                ai += 1;
                ask_left = asks.get(ai).map_or(0, |o| o.remaining);
            }
        }

        let (Some(mb), Some(ma)) = (marginal_bid, marginal_ask) else {
            return ClearingResult::no_trade();
        };

        let clearing_price = price::clamp_to_band(price::floor_midpoint(mb, ma), ma, mb);

        ClearingResult {
            cleared_quantity: cleared,
            clearing_price: Some(clearing_price),
            marginal_bid,
            marginal_ask,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::price::to_fixed;
    use crate::types::{Order, Side};

    fn bid(id: u64, limit: &str, qty: &str) -> Order {
        Order::new(
            id,
            "buyer",
            Side::Bid,
            to_fixed(limit).unwrap(),
            to_fixed(qty).unwrap(),
            id,
        )
    }

    fn ask(id: u64, limit: &str, qty: &str) -> Order {
        Order::new(
            id,
            "seller",
            Side::Ask,
            to_fixed(limit).unwrap(),
            to_fixed(qty).unwrap(),
            id,
        )
    }

    #[test]
    fn test_clear_empty_book() {
        let result = ClearingEngine::clear(&BookSnapshot::default());

        assert!(result.is_no_trade());
        assert_eq!(result.cleared_quantity, 0);
        assert_eq!(result.clearing_price, None);
    }

    #[test]
    fn test_clear_one_sided_book() {
        let bids_only = BookSnapshot::freeze(vec![bid(1, "10", "5")]);
        assert!(ClearingEngine::clear(&bids_only).is_no_trade());

        let asks_only = BookSnapshot::freeze(vec![ask(1, "6", "4")]);
        assert!(ClearingEngine::clear(&asks_only).is_no_trade());
    }

    #[test]
    fn test_clear_no_crossing() {
        // Best bid 8 below best ask 9: no trade, deterministically
        let snapshot = BookSnapshot::freeze(vec![bid(1, "8", "5"), ask(2, "9", "5")]);

        let result = ClearingEngine::clear(&snapshot);
        assert!(result.is_no_trade());
        assert_eq!(result.clearing_price, None);
        assert_eq!(result.marginal_bid, None);
        assert_eq!(result.marginal_ask, None);
    }

    #[test]
    fn test_clear_exact_cross() {
        // Single pair, bid 10 vs ask 6, equal quantity
        let snapshot = BookSnapshot::freeze(vec![bid(1, "10", "5"), ask(2, "6", "5")]);

        let result = ClearingEngine::clear(&snapshot);
        assert_eq!(result.cleared_quantity, to_fixed("5").unwrap());
        assert_eq!(result.marginal_bid, to_fixed("10"));
        assert_eq!(result.marginal_ask, to_fixed("6"));
        // Midpoint of 6 and 10
        assert_eq!(result.clearing_price, to_fixed("8"));
    }

    #[test]
    fn test_clear_reference_fixture() {
        // Bids (10, 5 kWh), (8, 3 kWh); asks (6, 4 kWh), (9, 6 kWh).
        // Unit walk: 4 kWh at 10>=6, then 1 kWh at 10>=9, then 8<9 stops.
        // Q = 5, marginal bid 10, marginal ask 9, price = midpoint 9.5.
        let snapshot = BookSnapshot::freeze(vec![
            bid(1, "10", "5"),
            bid(2, "8", "3"),
            ask(3, "6", "4"),
            ask(4, "9", "6"),
        ]);

        let result = ClearingEngine::clear(&snapshot);
        assert_eq!(result.cleared_quantity, to_fixed("5").unwrap());
        assert_eq!(result.marginal_bid, to_fixed("10"));
        assert_eq!(result.marginal_ask, to_fixed("9"));
        assert_eq!(result.clearing_price, to_fixed("9.5"));

        // Price sits inside the marginal band
        let p = result.clearing_price.unwrap();
        assert!(p >= result.marginal_ask.unwrap());
        assert!(p <= result.marginal_bid.unwrap());
    }

    #[test]
    fn test_clear_deep_cross_spans_levels() {
        // Demand outweighs supply across several price levels
        let snapshot = BookSnapshot::freeze(vec![
            bid(1, "12", "2"),
            bid(2, "11", "2"),
            bid(3, "10", "2"),
            ask(4, "9", "3"),
            ask(5, "10", "3"),
        ]);

        // Walk: 2@12/9, 1@11/9, 1@11/10, 2@10/10 -> Q = 6
        let result = ClearingEngine::clear(&snapshot);
        assert_eq!(result.cleared_quantity, to_fixed("6").unwrap());
        assert_eq!(result.marginal_bid, to_fixed("10"));
        assert_eq!(result.marginal_ask, to_fixed("10"));
        assert_eq!(result.clearing_price, to_fixed("10"));
    }

    #[test]
    fn test_clear_cleared_quantity_bounded_by_thinner_side() {
        let snapshot = BookSnapshot::freeze(vec![bid(1, "10", "100"), ask(2, "5", "1")]);

        let result = ClearingEngine::clear(&snapshot);
        assert_eq!(result.cleared_quantity, to_fixed("1").unwrap());
    }

    #[test]
    fn test_clear_midpoint_rounds_down_to_minor_unit() {
        // Marginal prices one minor unit apart: midpoint floors to the ask
        let snapshot = BookSnapshot::freeze(vec![
            Order::new(1, "b", Side::Bid, 1_000_000_001, 100, 1),
            Order::new(2, "s", Side::Ask, 1_000_000_000, 100, 2),
        ]);

        let result = ClearingEngine::clear(&snapshot);
        assert_eq!(result.clearing_price, Some(1_000_000_000));
    }

    #[test]
    fn test_clear_is_deterministic() {
        let orders = vec![
            bid(1, "10", "5"),
            bid(2, "8", "3"),
            ask(3, "6", "4"),
            ask(4, "9", "6"),
        ];

        let a = ClearingEngine::clear(&BookSnapshot::freeze(orders.clone()));
        let b = ClearingEngine::clear(&BookSnapshot::freeze(orders));
        assert_eq!(a, b);
    }
}
