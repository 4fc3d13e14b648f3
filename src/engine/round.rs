//! One auction round: freeze, clear, match, commit.
//!
//! ## State Machine
//!
//! ```text
//! Open --freeze--> Clearing --execute--> Settled
//!                                   \--> Aborted
//! ```
//!
//! A round is created Open, freezes the book into its input snapshot at
//! the caller's trigger, and then either settles (trades applied to the
//! live book, record emitted) or aborts (`ClearingInconsistency`: nothing
//! mutated anywhere, the same pending orders can be retried under the
//! same round id). Settled and Aborted are terminal. Rounds never
//! self-trigger; every transition is an explicit call.

use tracing::{error, info};

use crate::engine::{ClearingEngine, ClearingResult, Matcher};
use crate::error::AuctionError;
use crate::orderbook::{BookSnapshot, OrderBook};
use crate::types::{RoundReceipt, Trade};

// ============================================================================
// RoundState
// ============================================================================

/// Lifecycle state of an auction round. Every transition is explicit and
/// exhaustively matched; there is no string flag to mistype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundState {
    /// Accepting submissions (the live book is still mutable)
    Open,
    /// Snapshot frozen; clearing and matching in progress
    Clearing,
    /// Trades committed and recorded; terminal
    Settled,
    /// Matching failed consistency checks; nothing mutated; terminal
    Aborted,
}

// ============================================================================
// SettledRound
// ============================================================================

/// Immutable record of a completed round, as appended to history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledRound {
    /// Round sequence number (1-based, gapless)
    pub round_id: u64,

    /// The frozen input book the round cleared against
    pub snapshot: BookSnapshot,

    /// Equilibrium quantity and price
    pub clearing: ClearingResult,

    /// Trades in emission order; quantities sum to the cleared quantity
    pub trades: Vec<Trade>,

    /// Commit record for the external settlement collaborator
    pub receipt: RoundReceipt,

    /// Caller-supplied close timestamp in milliseconds
    pub closed_at: u64,
}

// ============================================================================
// AuctionRound
// ============================================================================

/// Orchestrates a single round over an exclusively borrowed book.
///
/// The round object is passed between the orchestrator and the engine by
/// value; there is no process-wide current-round singleton.
#[derive(Debug)]
pub struct AuctionRound {
    round_id: u64,
    state: RoundState,
    snapshot: Option<BookSnapshot>,
}

impl AuctionRound {
    /// Create a round in the Open state.
    pub fn open(round_id: u64) -> Self {
        Self {
            round_id,
            state: RoundState::Open,
            snapshot: None,
        }
    }

    /// Round sequence number
    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    /// Current lifecycle state
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// The frozen input snapshot, once the round has left Open.
    pub fn snapshot(&self) -> Option<&BookSnapshot> {
        self.snapshot.as_ref()
    }

    /// Freeze the round's input. Open -> Clearing.
    ///
    /// # Panics
    ///
    /// Panics if the round already left the Open state.
    pub fn freeze(&mut self, snapshot: BookSnapshot) {
        assert!(
            self.state == RoundState::Open,
            "freeze called on a round that is not Open"
        );
        self.snapshot = Some(snapshot);
        self.state = RoundState::Clearing;
    }

    /// Clear and match the frozen snapshot, committing fills to `book` on
    /// success. Clearing -> Settled | Aborted.
    ///
    /// `first_trade_id` seeds the trade id sequence, `prev_root` chains
    /// the receipt into history, and `closed_at` stamps the round and its
    /// trades. On success every emitted trade's quantity has been applied
    /// to the live book (filled orders removed, partial fills decremented)
    /// and the settled record is returned for the history append.
    ///
    /// # Panics
    ///
    /// Panics if the round is not in the Clearing state.
    pub fn execute(
        &mut self,
        book: &mut OrderBook,
        first_trade_id: u64,
        prev_root: [u8; 32],
        closed_at: u64,
    ) -> Result<SettledRound, AuctionError> {
        assert!(
            self.state == RoundState::Clearing,
            "execute called on a round that is not Clearing"
        );
        let snapshot = self.snapshot.take().expect("clearing round lost its snapshot");
        let clearing = ClearingEngine::clear(&snapshot);
        self.commit(book, snapshot, clearing, first_trade_id, prev_root, closed_at)
    }

    /// Match against a clearing result and commit. Split from `execute`
    /// so the abort path is reachable from tests with a doctored result.
    fn commit(
        &mut self,
        book: &mut OrderBook,
        snapshot: BookSnapshot,
        clearing: ClearingResult,
        first_trade_id: u64,
        prev_root: [u8; 32],
        closed_at: u64,
    ) -> Result<SettledRound, AuctionError> {
        let mut working = snapshot.clone();
        let trades = match Matcher::match_trades(
            self.round_id,
            &mut working,
            &clearing,
            first_trade_id,
            closed_at,
        ) {
            Ok(trades) => trades,
            Err(err) => {
                // All-or-nothing: the live book was never touched
                self.snapshot = Some(snapshot);
                self.state = RoundState::Aborted;
                error!(round_id = self.round_id, %err, "auction round aborted");
                return Err(err);
            }
        };

        for trade in &trades {
            book.apply_fill(trade.buy_order_id, trade.quantity);
            book.apply_fill(trade.sell_order_id, trade.quantity);
        }

        let receipt = RoundReceipt::new(
            self.round_id,
            snapshot.order_count() as u64,
            trades.len() as u64,
            clearing.cleared_quantity,
            clearing.clearing_price.unwrap_or(0),
            RoundReceipt::compute_state_root(prev_root, &trades),
            closed_at,
        );

        info!(
            round_id = self.round_id,
            trades = trades.len(),
            cleared_quantity = clearing.cleared_quantity,
            clearing_price = clearing.clearing_price.unwrap_or(0),
            state_root = %receipt.state_root_hex(),
            "auction round settled"
        );

        self.state = RoundState::Settled;
        Ok(SettledRound {
            round_id: self.round_id,
            snapshot,
            clearing,
            trades,
            receipt,
            closed_at,
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
