//! Append-only log of settled rounds.
//!
//! The history append is the engine's single commit point: a round's
//! results become externally observable exactly when its record lands
//! here, in strict round-id order. Entries are never mutated or removed;
//! retention and pruning policy belongs to the embedding application.
//!
//! Receipts chain their state roots, so `verify_chain` can prove after
//! the fact that no recorded round was altered.

use crate::engine::SettledRound;
use crate::types::{RoundReceipt, Trade, GENESIS_ROOT};

/// Ordered, immutable record of every settled round.
#[derive(Debug, Default)]
pub struct History {
    rounds: Vec<SettledRound>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of settled rounds
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Check if no round has settled yet
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// The round id the next settled round must carry (1-based, gapless)
    pub fn next_round_id(&self) -> u64 {
        self.rounds.last().map_or(1, |r| r.round_id + 1)
    }

    /// State root of the most recent round, or the genesis root
    pub fn last_root(&self) -> [u8; 32] {
        self.rounds.last().map_or(GENESIS_ROOT, |r| r.receipt.state_root)
    }

    /// Append a settled round and return a reference to the stored entry.
    ///
    /// # Panics
    ///
    /// Panics if the round id is not exactly `next_round_id()` - appends
    /// must stay strictly ordered.
    pub fn append(&mut self, round: SettledRound) -> &SettledRound {
        assert_eq!(
            round.round_id,
            self.next_round_id(),
            "history appends must be strictly ordered by round id"
        );
        self.rounds.push(round);
        self.rounds.last().expect("push cannot leave history empty")
    }

    // ========================================================================
    // Queries (read-only)
    // ========================================================================

    /// The most recently settled round
    pub fn latest(&self) -> Option<&SettledRound> {
        self.rounds.last()
    }

    /// Look up a settled round by id
    pub fn get(&self, round_id: u64) -> Option<&SettledRound> {
        if round_id == 0 {
            return None;
        }
        // Round ids are 1-based and gapless, so the id indexes directly
        self.rounds.get((round_id - 1) as usize)
    }

    /// Settled rounds with ids in `[first, last]`, clamped to what exists
    pub fn range(&self, first: u64, last: u64) -> &[SettledRound] {
        let len = self.rounds.len() as u64;
        let start = first.max(1).min(len + 1) - 1;
        let end = last.min(len);
        if start >= end {
            return &[];
        }
        &self.rounds[start as usize..end as usize]
    }

    /// The most recent `n` settled rounds, oldest first
    pub fn recent(&self, n: usize) -> &[SettledRound] {
        let start = self.rounds.len().saturating_sub(n);
        &self.rounds[start..]
    }

    /// Trades of one settled round
    pub fn trades(&self, round_id: u64) -> Option<&[Trade]> {
        self.get(round_id).map(|r| r.trades.as_slice())
    }

    /// Total quantity cleared across all settled rounds
    pub fn total_volume(&self) -> u64 {
        self.rounds
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.clearing.cleared_quantity))
    }

    /// Iterate settled rounds in order
    pub fn iter(&self) -> impl Iterator<Item = &SettledRound> {
        self.rounds.iter()
    }

    /// Recompute the receipt chain from genesis and compare every root.
    ///
    /// Returns false if any recorded round's trades or receipt no longer
    /// match the chain - evidence of retroactive mutation.
    pub fn verify_chain(&self) -> bool {
        let mut prev = GENESIS_ROOT;
        for round in &self.rounds {
            let computed = RoundReceipt::compute_state_root(prev, &round.trades);
            if computed != round.receipt.state_root {
                return false;
            }
            prev = computed;
        }
        true
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
