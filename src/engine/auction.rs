//! Call-auction facade: the library surface an orchestrator drives.
//!
//! `CallAuction` owns the live order book, the trade-id sequence, and the
//! history. Callers submit and withdraw orders between rounds and trigger
//! round execution explicitly (time boundary or manual call - the engine
//! never self-triggers). Everything is synchronous; ledger submission, UI
//! refresh, and retry policy stay with the caller.

use crate::engine::{AuctionRound, History, SettledRound};
use crate::error::AuctionError;
use crate::orderbook::OrderBook;
use crate::types::Order;

/// The auction engine's external boundary.
///
/// ## Round Flow
///
/// ```
/// use gridclear::engine::CallAuction;
/// use gridclear::types::{Order, Side};
///
/// let mut auction = CallAuction::new();
///
/// auction.submit(Order::new(1, "alice", Side::Bid, 1_000_000_000, 500_000_000, 1)).unwrap();
/// auction.submit(Order::new(2, "bob", Side::Ask, 600_000_000, 500_000_000, 2)).unwrap();
///
/// let settled = auction.run_round(1703577600000).unwrap();
/// assert_eq!(settled.trades.len(), 1);
/// assert_eq!(auction.history().len(), 1);
/// ```
#[derive(Debug)]
pub struct CallAuction {
    book: OrderBook,
    history: History,
    next_trade_id: u64,
}

impl Default for CallAuction {
    fn default() -> Self {
        Self::new()
    }
}

impl CallAuction {
    /// Create an auction with an empty book
    pub fn new() -> Self {
        Self {
            book: OrderBook::new(),
            history: History::new(),
            next_trade_id: 1,
        }
    }

    /// Create an auction with pre-allocated book capacity
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            book: OrderBook::with_capacity(order_capacity),
            history: History::new(),
            next_trade_id: 1,
        }
    }

    /// Submit an order for the next round.
    ///
    /// Surfaces [`AuctionError::InvalidOrder`] synchronously; duplicate
    /// ids are a no-op success.
    pub fn submit(&mut self, order: Order) -> Result<(), AuctionError> {
        self.book.submit(order)
    }

    /// Withdraw an open order from the next round.
    pub fn withdraw(&mut self, order_id: u64) -> Result<Order, AuctionError> {
        self.book.withdraw(order_id)
    }

    /// Run one auction round against the current book.
    ///
    /// Freezes the book, clears, matches, applies fills, and appends the
    /// settled record to history, returning a reference to it. On
    /// [`AuctionError::ClearingInconsistency`] nothing is mutated: the
    /// pending orders remain booked, the round id is not consumed, and
    /// the caller may retry.
    pub fn run_round(&mut self, closed_at: u64) -> Result<&SettledRound, AuctionError> {
        let mut round = AuctionRound::open(self.history.next_round_id());
        round.freeze(self.book.snapshot());

        let settled = round.execute(
            &mut self.book,
            self.next_trade_id,
            self.history.last_root(),
            closed_at,
        )?;

        self.next_trade_id += settled.trades.len() as u64;
        Ok(self.history.append(settled))
    }

    /// The live book accumulating orders for the next round
    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    /// The append-only record of settled rounds
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Round id the next `run_round` call will settle under
    pub fn pending_round_id(&self) -> u64 {
        self.history.next_round_id()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::price::to_fixed;
    use crate::types::{OrderStatus, Side};

    fn bid(id: u64, price: &str, qty: &str) -> Order {
        Order::new(id, format!("buyer-{id}"), Side::Bid, to_fixed(price).unwrap(), to_fixed(qty).unwrap(), id)
    }

    fn ask(id: u64, price: &str, qty: &str) -> Order {
        Order::new(id, format!("seller-{id}"), Side::Ask, to_fixed(price).unwrap(), to_fixed(qty).unwrap(), id)
    }

    #[test]
    fn test_auction_single_round() {
        let mut auction = CallAuction::new();
        auction.submit(bid(1, "10", "5")).unwrap();
        auction.submit(ask(2, "6", "5")).unwrap();

        let settled = auction.run_round(100).unwrap();
        assert_eq!(settled.round_id, 1);
        assert_eq!(settled.trades.len(), 1);
        assert_eq!(settled.trades[0].id, 1);

        assert_eq!(auction.history().len(), 1);
        assert_eq!(auction.pending_round_id(), 2);
        assert!(auction.book().is_empty());
    }

    #[test]
    fn test_auction_trade_ids_continue_across_rounds() {
        let mut auction = CallAuction::new();
        auction.submit(bid(1, "10", "5")).unwrap();
        auction.submit(ask(2, "6", "5")).unwrap();
        auction.run_round(100).unwrap();

        auction.submit(bid(3, "10", "2")).unwrap();
        auction.submit(ask(4, "6", "2")).unwrap();
        let settled = auction.run_round(200).unwrap();

        assert_eq!(settled.round_id, 2);
        assert_eq!(settled.trades[0].id, 2);
    }

    #[test]
    fn test_auction_partial_fill_carries_over() {
        let mut auction = CallAuction::new();
        auction.submit(bid(1, "10", "10")).unwrap();
        auction.submit(ask(2, "9", "6")).unwrap();

        auction.run_round(100).unwrap();

        // 4 kWh of the bid survive into the next round
        let order = auction.book().get_order(1).unwrap();
        assert_eq!(order.remaining, to_fixed("4").unwrap());
        assert_eq!(order.status(), OrderStatus::PartiallyFilled);

        // A matching ask in the next round consumes the remainder
        auction.submit(ask(3, "9", "4")).unwrap();
        let settled = auction.run_round(200).unwrap();
        assert_eq!(settled.trades.len(), 1);
        assert_eq!(settled.trades[0].quantity, to_fixed("4").unwrap());
        assert!(auction.book().is_empty());
    }

    #[test]
    fn test_auction_no_trade_round_preserves_book() {
        let mut auction = CallAuction::new();
        auction.submit(bid(1, "8", "5")).unwrap();
        auction.submit(ask(2, "9", "5")).unwrap();

        let settled = auction.run_round(100).unwrap();
        assert!(settled.trades.is_empty());
        assert_eq!(auction.book().order_count(), 2);

        // Receipts still chain through empty rounds
        assert_eq!(auction.history().len(), 1);
        assert!(auction.history().verify_chain());
    }

    #[test]
    fn test_auction_withdraw_between_rounds() {
        let mut auction = CallAuction::new();
        auction.submit(bid(1, "10", "5")).unwrap();
        auction.submit(ask(2, "6", "5")).unwrap();
        auction.withdraw(2).unwrap();

        let settled = auction.run_round(100).unwrap();
        assert!(settled.trades.is_empty());
        assert_eq!(auction.book().order_count(), 1);
    }

    #[test]
    fn test_auction_withdraw_settled_order_fails() {
        let mut auction = CallAuction::new();
        auction.submit(bid(1, "10", "5")).unwrap();
        auction.submit(ask(2, "6", "5")).unwrap();
        auction.run_round(100).unwrap();

        let err = auction.withdraw(1).unwrap_err();
        assert_eq!(err, AuctionError::AlreadySettled { id: 1 });
    }

    #[test]
    fn test_auction_history_chain_verifies_over_rounds() {
        let mut auction = CallAuction::new();
        for round in 0..3u64 {
            let base = round * 10;
            auction.submit(bid(base + 1, "10", "5")).unwrap();
            auction.submit(ask(base + 2, "6", "5")).unwrap();
            auction.run_round(100 + round).unwrap();
        }

        assert_eq!(auction.history().len(), 3);
        assert!(auction.history().verify_chain());
        assert_eq!(auction.history().total_volume(), to_fixed("15").unwrap());
    }
}
