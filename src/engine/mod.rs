//! Auction engine module for GridClear.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: the same book snapshot always produces bit-identical
//!    clearing results and trade sequences
//! 2. **Fixed-Point Math**: no floating-point operations anywhere
//! 3. **Synchronous Execution**: no async, no I/O; timestamps come from
//!    the caller
//! 4. **Atomic Rounds**: a round settles completely or aborts completely
//!
//! ## Round Pipeline
//!
//! - [`ClearingEngine`] finds the crossing quantity and uniform price
//! - [`Matcher`] pairs bids and asks against the cleared quantity
//! - [`AuctionRound`] drives freeze -> clear -> match -> commit
//! - [`History`] records settled rounds, hash-chained
//! - [`CallAuction`] ties it all together behind one facade
//!
//! ## Example
//!
//! ```
//! use gridclear::engine::CallAuction;
//! use gridclear::types::{Order, Side};
//!
//! let mut auction = CallAuction::new();
//!
//! auction.submit(Order::new(1, "alice", Side::Bid, 1_000_000_000, 500_000_000, 1)).unwrap();
//! auction.submit(Order::new(2, "bob", Side::Ask, 600_000_000, 500_000_000, 2)).unwrap();
//!
//! let settled = auction.run_round(1703577600000).unwrap();
//! assert_eq!(settled.trades.len(), 1);
//! ```

pub mod auction;
pub mod clearing;
pub mod history;
pub mod matcher;
pub mod round;

pub use auction::CallAuction;
pub use clearing::{ClearingEngine, ClearingResult};
pub use history::History;
pub use matcher::Matcher;
pub use round::{AuctionRound, RoundState, SettledRound};
