//! Round receipt - the immutable commit record of a settled auction round.
//!
//! ## Purpose
//!
//! The receipt is what the external settlement collaborator (ledger or
//! blockchain submitter) records. It carries a SHA-256 state root chained
//! over the previous round's root and this round's canonical trade
//! encoding, so any retroactive mutation of history is detectable without
//! replaying the trades themselves.
//!
//! ## SSZ Serialization
//!
//! The receipt derives `SimpleSerialize` from ssz_rs for deterministic
//! encoding: identical rounds serialize to identical bytes on every run
//! and every machine.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::types::Trade;

/// Root value that seeds the receipt chain before any round has settled.
pub const GENESIS_ROOT: [u8; 32] = [0u8; 32];

/// Summary record emitted when an auction round settles.
///
/// ## State Root
///
/// `state_root = SHA-256(prev_root || trade_1 || trade_2 || ...)` where each
/// trade contributes its canonical byte encoding in emission order. A
/// no-trade round still advances the chain (hash of the previous root
/// alone), so receipts always form an unbroken sequence.
///
/// ## Example
///
/// ```
/// use gridclear::types::{RoundReceipt, GENESIS_ROOT};
///
/// let receipt = RoundReceipt::new(
///     1,                      // round_id
///     4,                      // orders_in
///     2,                      // trades_executed
///     500_000_000,            // cleared_quantity: 5.00000000
///     950_000_000,            // clearing_price: 9.50000000
///     GENESIS_ROOT,           // state_root (would be computed)
///     1703577600000,          // timestamp
/// );
/// assert_eq!(receipt.round_id, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RoundReceipt {
    /// Round sequence number
    pub round_id: u64,

    /// Number of open orders in the round's input snapshot
    pub orders_in: u64,

    /// Number of trades executed in this round
    pub trades_executed: u64,

    /// Total quantity cleared in this round (fixed-point)
    pub cleared_quantity: u64,

    /// Uniform clearing price (fixed-point); 0 for a no-trade round
    pub clearing_price: u64,

    /// Chained state root after this round (SHA-256, 32 bytes)
    pub state_root: [u8; 32],

    /// Round close timestamp in milliseconds
    pub timestamp: u64,
}

impl RoundReceipt {
    /// Create a new round receipt
    pub fn new(
        round_id: u64,
        orders_in: u64,
        trades_executed: u64,
        cleared_quantity: u64,
        clearing_price: u64,
        state_root: [u8; 32],
        timestamp: u64,
    ) -> Self {
        Self {
            round_id,
            orders_in,
            trades_executed,
            cleared_quantity,
            clearing_price,
            state_root,
            timestamp,
        }
    }

    /// Compute the chained state root for a round's trade sequence.
    ///
    /// Hashes the previous root followed by each trade's canonical bytes
    /// in emission order.
    pub fn compute_state_root(prev_root: [u8; 32], trades: &[Trade]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(prev_root);
        for trade in trades {
            hasher.update(trade.canonical_bytes());
        }

        let result = hasher.finalize();
        let mut root = [0u8; 32];
        root.copy_from_slice(&result);
        root
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// Check if this receipt records a no-trade round
    pub fn is_no_trade(&self) -> bool {
        self.trades_executed == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
