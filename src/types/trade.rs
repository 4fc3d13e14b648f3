//! Trade type representing one matched bid/ask pair in a settled round.
//!
//! Every trade in a round executes at the round's single clearing price
//! (uniform-price rule). Trades are immutable once created; the canonical
//! byte encoding below feeds the round's SHA-256 state root, so any
//! retroactive change to a recorded trade is detectable.

/// A trade pairs one bid against one ask for part of the cleared quantity.
///
/// ## Price
///
/// `price` is always the round's clearing price, never either order's
/// limit price. The uniform-price invariant guarantees
/// `seller ask ≤ price ≤ buyer bid` for every emitted trade.
///
/// ## Example
///
/// ```
/// use gridclear::types::Trade;
///
/// let trade = Trade::new(
///     1,                      // trade id
///     1,                      // round id
///     100,                    // buy_order_id
///     200,                    // sell_order_id
///     "wallet-buyer",         // buyer
///     "wallet-seller",        // seller
///     950_000_000,            // price: 9.50000000
///     400_000_000,            // quantity: 4.00000000
///     1703577600000,          // timestamp
/// );
/// assert_eq!(trade.quantity, 400_000_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    /// Unique trade identifier (assigned by the engine, monotonic)
    pub id: u64,

    /// Round in which this trade was cleared
    pub round_id: u64,

    /// ID of the bid order on the buy side
    pub buy_order_id: u64,

    /// ID of the ask order on the sell side
    pub sell_order_id: u64,

    /// Opaque participant identifier of the buyer
    pub buyer: String,

    /// Opaque participant identifier of the seller
    pub seller: String,

    /// Execution price in fixed-point (scaled by 10^8)
    /// Always the round's clearing price
    pub price: u64,

    /// Executed quantity in fixed-point (scaled by 10^8)
    pub quantity: u64,

    /// Round close timestamp in milliseconds
    pub timestamp: u64,
}

impl Trade {
    /// Create a new trade
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u64,
        round_id: u64,
        buy_order_id: u64,
        sell_order_id: u64,
        buyer: impl Into<String>,
        seller: impl Into<String>,
        price: u64,
        quantity: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            round_id,
            buy_order_id,
            sell_order_id,
            buyer: buyer.into(),
            seller: seller.into(),
            price,
            quantity,
            timestamp,
        }
    }

    /// Calculate the notional value of this trade (price * quantity).
    ///
    /// Note: the result is in raw fixed-point product form, scaled by
    /// 10^16 (10^8 * 10^8). Divide by SCALE to get the notional in
    /// currency minor units.
    pub fn notional_raw(&self) -> u128 {
        (self.price as u128) * (self.quantity as u128)
    }

    /// Canonical byte encoding for state-root hashing.
    ///
    /// Layout: the six u64 fields in little-endian, followed by each
    /// participant string as a little-endian u64 length prefix plus UTF-8
    /// bytes. Stable across runs so identical rounds hash identically.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(64 + self.buyer.len() + self.seller.len());
        bytes.extend_from_slice(&self.id.to_le_bytes());
        bytes.extend_from_slice(&self.round_id.to_le_bytes());
        bytes.extend_from_slice(&self.buy_order_id.to_le_bytes());
        bytes.extend_from_slice(&self.sell_order_id.to_le_bytes());
        bytes.extend_from_slice(&self.price.to_le_bytes());
        bytes.extend_from_slice(&self.quantity.to_le_bytes());
        bytes.extend_from_slice(&self.timestamp.to_le_bytes());
        bytes.extend_from_slice(&(self.buyer.len() as u64).to_le_bytes());
        bytes.extend_from_slice(self.buyer.as_bytes());
        bytes.extend_from_slice(&(self.seller.len() as u64).to_le_bytes());
        bytes.extend_from_slice(self.seller.as_bytes());
        bytes
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
