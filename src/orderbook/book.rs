//! Open-order book for the pending auction round.
//!
//! ## Architecture
//!
//! The book uses the same storage shape as a high-throughput limit order
//! book, without per-price queues (a call auction matches from a sorted
//! snapshot, not a live queue):
//!
//! - **Slab**: pre-allocated storage for O(1) order operations
//! - **HashMap**: order ID to slab key mapping for O(1) withdraw
//! - **Retired-id sets**: filled and withdrawn ids, so duplicate
//!   submissions stay idempotent across the whole order lifetime
//!
//! ## Invariants
//!
//! - Every booked order has remaining quantity > 0
//! - An order id enters the book at most once, ever
//!
//! ## Example
//!
//! ```
//! use gridclear::orderbook::OrderBook;
//! use gridclear::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! book.submit(Order::new(1, "alice", Side::Bid, 1_000_000_000, 500_000_000, 1)).unwrap();
//! book.submit(Order::new(2, "bob", Side::Ask, 600_000_000, 400_000_000, 2)).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(1_000_000_000));
//! assert_eq!(book.best_ask(), Some(600_000_000));
//! ```

use std::collections::{HashMap, HashSet};

use slab::Slab;

use crate::error::AuctionError;
use crate::orderbook::BookSnapshot;
use crate::types::{Order, OrderStatus, Side};

/// Open-order book owned by the pending round.
///
/// Holds only live orders; filled and withdrawn orders leave the slab and
/// are remembered by id for idempotency and withdrawal error reporting.
#[derive(Debug, Default)]
pub struct OrderBook {
    /// Pre-allocated order storage
    orders: Slab<Order>,

    /// Order ID to slab key mapping (for O(1) withdraw)
    order_index: HashMap<u64, usize>,

    /// IDs whose entire quantity was consumed in settled rounds
    filled: HashSet<u64>,

    /// IDs the caller withdrew before full settlement
    withdrawn: HashSet<u64>,

    /// Total number of open bid orders
    bid_count: usize,

    /// Total number of open ask orders
    ask_count: usize,
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a book with pre-allocated capacity
    ///
    /// # Example
    ///
    /// ```
    /// use gridclear::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(10_000);
    /// assert!(book.capacity() >= 10_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            order_index: HashMap::with_capacity(order_capacity),
            filled: HashSet::new(),
            withdrawn: HashSet::new(),
            bid_count: 0,
            ask_count: 0,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Get the current capacity (pre-allocated slots)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Get the total number of open orders in the book
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Get the number of open bid orders
    #[inline]
    pub fn bid_count(&self) -> usize {
        self.bid_count
    }

    /// Get the number of open ask orders
    #[inline]
    pub fn ask_count(&self) -> usize {
        self.ask_count
    }

    /// Check if the book has no open orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    // ========================================================================
    // Intake
    // ========================================================================

    /// Submit an order into the book.
    ///
    /// Validation rejects zero prices and zero quantities with
    /// [`AuctionError::InvalidOrder`]; the u64 fixed-point representation
    /// and the closed [`Side`] enum make negative values and unknown sides
    /// unrepresentable. The order is normalized on entry: remaining is
    /// reset to the full quantity regardless of what the caller set.
    ///
    /// Submitting an id the book has already seen - open, filled, or
    /// withdrawn - is a no-op success, so replayed submissions can never
    /// double-count.
    pub fn submit(&mut self, mut order: Order) -> Result<(), AuctionError> {
        if order.price == 0 {
            return Err(AuctionError::InvalidOrder {
                reason: "price must be positive",
            });
        }
        if order.quantity == 0 {
            return Err(AuctionError::InvalidOrder {
                reason: "quantity must be positive",
            });
        }

        // Idempotency guard over the whole id lifetime
        if self.order_index.contains_key(&order.id)
            || self.filled.contains(&order.id)
            || self.withdrawn.contains(&order.id)
        {
            return Ok(());
        }

        order.remaining = order.quantity;

        match order.side {
            Side::Bid => self.bid_count += 1,
            Side::Ask => self.ask_count += 1,
        }

        let id = order.id;
        let key = self.orders.insert(order);
        self.order_index.insert(id, key);

        Ok(())
    }

    /// Withdraw an open order, returning it.
    ///
    /// A partially filled order is still open and may be withdrawn for its
    /// remainder. Fails with [`AuctionError::AlreadySettled`] if the id was
    /// fully consumed in a settled round (settled orders are never
    /// retroactively altered), or [`AuctionError::OrderNotFound`] if the id
    /// was never booked or was already withdrawn.
    pub fn withdraw(&mut self, order_id: u64) -> Result<Order, AuctionError> {
        let Some(&key) = self.order_index.get(&order_id) else {
            if self.filled.contains(&order_id) {
                return Err(AuctionError::AlreadySettled { id: order_id });
            }
            return Err(AuctionError::OrderNotFound { id: order_id });
        };

        self.order_index.remove(&order_id);
        let order = self.orders.remove(key);
        match order.side {
            Side::Bid => self.bid_count -= 1,
            Side::Ask => self.ask_count -= 1,
        }
        self.withdrawn.insert(order_id);

        Ok(order)
    }

    /// Take an immutable snapshot of all open orders, partitioned by side
    /// and canonically sorted. Pure read; the book is unchanged.
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot::freeze(self.orders.iter().map(|(_, order)| order.clone()))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check if an order is currently open in the book
    #[inline]
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.order_index.contains_key(&order_id)
    }

    /// Get a reference to an open order by id
    pub fn get_order(&self, order_id: u64) -> Option<&Order> {
        let key = *self.order_index.get(&order_id)?;
        self.orders.get(key)
    }

    /// Report the lifecycle status of an order id, if known to the book.
    pub fn order_status(&self, order_id: u64) -> Option<OrderStatus> {
        if let Some(order) = self.get_order(order_id) {
            return Some(order.status());
        }
        if self.filled.contains(&order_id) {
            return Some(OrderStatus::Filled);
        }
        if self.withdrawn.contains(&order_id) {
            return Some(OrderStatus::Withdrawn);
        }
        None
    }

    /// Get the best bid price (highest open bid), scanning the slab.
    pub fn best_bid(&self) -> Option<u64> {
        self.orders
            .iter()
            .filter(|(_, o)| o.side == Side::Bid)
            .map(|(_, o)| o.price)
            .max()
    }

    /// Get the best ask price (lowest open ask), scanning the slab.
    pub fn best_ask(&self) -> Option<u64> {
        self.orders
            .iter()
            .filter(|(_, o)| o.side == Side::Ask)
            .map(|(_, o)| o.price)
            .min()
    }

    // ========================================================================
    // Settlement application (round-internal)
    // ========================================================================

    /// Apply a committed fill to an open order.
    ///
    /// Decrements the order's remaining quantity; an order whose remaining
    /// reaches zero leaves the book and its id is recorded as filled. Only
    /// the settling round calls this, and only after the matcher succeeded,
    /// which keeps round commits all-or-nothing.
    ///
    /// # Panics
    ///
    /// Panics if the id is not open or the fill exceeds the remaining
    /// quantity - both would mean the matcher diverged from the snapshot.
    pub(crate) fn apply_fill(&mut self, order_id: u64, quantity: u64) {
        let key = *self
            .order_index
            .get(&order_id)
            .expect("fill target not in book");
        let order = self.orders.get_mut(key).expect("stale order index");
        assert!(
            quantity <= order.remaining,
            "fill exceeds remaining quantity"
        );

        order.fill(quantity);

        if order.is_filled() {
            let order = self.orders.remove(key);
            self.order_index.remove(&order_id);
            match order.side {
                Side::Bid => self.bid_count -= 1,
                Side::Ask => self.ask_count -= 1,
            }
            self.filled.insert(order_id);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
