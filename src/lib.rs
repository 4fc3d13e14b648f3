//! # GridClear
//!
//! Uniform-price call auction engine for peer-to-peer energy trading.
//!
//! ## Architecture
//!
//! The engine consists of:
//! - **Types**: core data structures (Order, Trade, RoundReceipt)
//! - **OrderBook**: slab-backed open-order storage with frozen snapshots
//! - **Engine**: clearing, matching, round orchestration, and history
//!
//! ## Design Principles
//!
//! 1. **Determinism**: identical inputs produce bit-identical results,
//!    down to the receipt state roots
//! 2. **No Floating Point**: all math uses fixed-point arithmetic
//!    (10^8 scaling)
//! 3. **Discrete Rounds**: orders accumulate, then clear simultaneously
//!    at one price per round - there is no continuous matching
//! 4. **Synchronous Execution**: no async, no I/O; ledger submission and
//!    wallet resolution are the caller's concern
//!
//! ## Market Invariants
//!
//! - No buyer pays more than their bid; no seller receives less than
//!   their ask
//! - Trade quantities in a round sum exactly to the cleared quantity
//! - A round settles atomically or aborts without a trace

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Trade, RoundReceipt
pub mod types;

/// Order book: open orders and frozen snapshots
pub mod orderbook;

/// Auction engine: clearing, matching, rounds, history
pub mod engine;

/// Error taxonomy
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use engine::{
    AuctionRound, CallAuction, ClearingEngine, ClearingResult, History, Matcher, RoundState,
    SettledRound,
};
pub use error::AuctionError;
pub use orderbook::{BookSnapshot, OrderBook};
pub use types::{Order, OrderStatus, RoundReceipt, Side, Trade};
