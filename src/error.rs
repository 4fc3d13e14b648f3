//! Error taxonomy for the auction engine.
//!
//! Intake errors (`InvalidOrder`, `OrderNotFound`, `AlreadySettled`)
//! surface synchronously to the submitter and never affect a round.
//! `ClearingInconsistency` is fatal to the current round only: the round
//! aborts with no trades emitted and no order mutated, and may be retried.

use thiserror::Error;

/// Errors returned by order intake and round execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    /// Order failed validation and never entered the book.
    #[error("invalid order: {reason}")]
    InvalidOrder {
        /// What the order violated
        reason: &'static str,
    },

    /// Withdrawal target is not in the book and was never fully settled.
    #[error("order {id} not found")]
    OrderNotFound {
        /// The order id the caller supplied
        id: u64,
    },

    /// Withdrawal target was fully consumed by trades in a settled round.
    #[error("order {id} already settled")]
    AlreadySettled {
        /// The order id the caller supplied
        id: u64,
    },

    /// Internal invariant violation detected during matching.
    /// The round is aborted atomically; callers may retry.
    #[error("clearing inconsistency: {detail}")]
    ClearingInconsistency {
        /// Diagnostic description for the audit log
        detail: String,
    },
}

// ============================================================================
// Unit Tests
// ============================================================================
