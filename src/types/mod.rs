//! Core data types for the GridClear auction engine.
//!
//! All numeric values use fixed-point representation (scaled by 10^8).
//! The round receipt implements SSZ serialization for deterministic
//! encoding; see [`RoundReceipt`].
//!
//! ## Types
//!
//! - [`Order`]: A limit order awaiting the next auction round
//! - [`Side`]: Bid or Ask
//! - [`OrderStatus`]: Fill state of an order
//! - [`Trade`]: One matched bid/ask pair at the clearing price
//! - [`RoundReceipt`]: Immutable commit record of a settled round
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices and quantities are stored as `u64` scaled by 10^8.
//! Example: 9.5 per kWh is stored as 950_000_000u64.

mod order;
mod receipt;
mod trade;
pub mod price;

// Re-export all types at module level
pub use order::{Order, OrderStatus, Side};
pub use receipt::{RoundReceipt, GENESIS_ROOT};
pub use trade::Trade;
