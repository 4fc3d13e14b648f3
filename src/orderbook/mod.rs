//! Order book module for the GridClear auction engine.
//!
//! ## Architecture
//!
//! The book holds the open bid and ask orders accumulating for the next
//! auction round:
//!
//! - **Slab-based storage**: O(1) order submission, withdrawal, and lookup
//! - **Canonical snapshots**: rounds freeze the book into a sorted,
//!   immutable [`BookSnapshot`] before clearing
//!
//! Unlike a continuous limit order book there are no per-price FIFO
//! queues; priority is decided once per round by the snapshot's canonical
//! sort (price, then submission time, then id).
//!
//! ## Components
//!
//! - [`OrderBook`]: live book with submit/withdraw/snapshot
//! - [`BookSnapshot`]: frozen, sorted input to a round
//!
//! ## Example
//!
//! ```
//! use gridclear::orderbook::OrderBook;
//! use gridclear::types::{Order, Side};
//!
//! let mut book = OrderBook::with_capacity(10_000);
//!
//! // Bid for 5 kWh at 10.00 per kWh
//! let order = Order::new(1, "alice", Side::Bid, 1_000_000_000, 500_000_000, 0);
//! book.submit(order).unwrap();
//!
//! assert_eq!(book.best_bid(), Some(1_000_000_000));
//! ```

pub mod book;
pub mod snapshot;

pub use book::OrderBook;
pub use snapshot::BookSnapshot;
