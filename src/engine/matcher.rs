//! Trade pairing against the cleared quantity.
//!
//! The matcher walks the same sorted bids and asks the clearing engine
//! used, greedily pairing the highest remaining bid with the lowest
//! remaining ask until the cleared quantity is exhausted. Every pairing
//! emits one trade at the uniform clearing price and decrements both
//! orders' remaining quantity on the round's working copy - the live book
//! is only touched after the whole round succeeds, so an aborted round
//! leaves no trace.
//!
//! Conservation holds exactly: the emitted trade quantities sum to the
//! cleared quantity, or the round fails with `ClearingInconsistency` and
//! emits nothing.

use tracing::debug;

use crate::engine::ClearingResult;
use crate::error::AuctionError;
use crate::orderbook::BookSnapshot;
use crate::types::Trade;

/// Pairs bids and asks for one round.
pub struct Matcher;

impl Matcher {
    /// Emit the round's trades, consuming remaining quantity on `working`.
    ///
    /// `working` is the round's private copy of the frozen snapshot; its
    /// mutations become visible only when the round commits them back to
    /// the live book. Trade ids are assigned sequentially from
    /// `first_trade_id`, and every trade is stamped with the round's close
    /// timestamp.
    ///
    /// # Errors
    ///
    /// [`AuctionError::ClearingInconsistency`] if the cleared quantity
    /// cannot be covered by the orders in the snapshot. No trades are
    /// returned in that case.
    pub fn match_trades(
        round_id: u64,
        working: &mut BookSnapshot,
        clearing: &ClearingResult,
        first_trade_id: u64,
        timestamp: u64,
    ) -> Result<Vec<Trade>, AuctionError> {
        let cleared = clearing.cleared_quantity;
        if cleared == 0 {
            return Ok(Vec::new());
        }

        let Some(price) = clearing.clearing_price else {
            return Err(AuctionError::ClearingInconsistency {
                detail: "cleared quantity without a clearing price".to_string(),
            });
        };

        // Defensive cover check before any mutation
        let bid_available = working.bid_quantity();
        let ask_available = working.ask_quantity();
        if cleared > bid_available || cleared > ask_available {
            return Err(AuctionError::ClearingInconsistency {
                detail: format!(
                    "cleared quantity {} exceeds available (bids {}, asks {})",
                    cleared, bid_available, ask_available
                ),
            });
        }

        let mut trades = Vec::new();
        let mut matched: u64 = 0;
        let mut bi = 0usize;
        let mut ai = 0usize;

        while matched < cleared && bi < working.bids.len() && ai < working.asks.len() {
            let take = working.bids[bi]
                .remaining
                .min(working.asks[ai].remaining)
                .min(cleared - matched);
            if take == 0 {
                break;
            }

            let trade = Trade::new(
                first_trade_id + trades.len() as u64,
                round_id,
                working.bids[bi].id,
                working.asks[ai].id,
                working.bids[bi].participant.clone(),
                working.asks[ai].participant.clone(),
                price,
                take,
                timestamp,
            );

            working.bids[bi].fill(take);
            working.asks[ai].fill(take);
            matched += take;

            debug!(
                trade_id = trade.id,
                buy_order = trade.buy_order_id,
                sell_order = trade.sell_order_id,
                quantity = take,
                "matched pair"
            );
            trades.push(trade);

            if working.bids[bi].remaining == 0 {
                bi += 1;
            }
            if working.asks[ai].remaining == 0 {
                ai += 1;
            }
        }

        if matched != cleared {
            return Err(AuctionError::ClearingInconsistency {
                detail: format!("matched {} of cleared quantity {}", matched, cleared),
            });
        }

        Ok(trades)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
