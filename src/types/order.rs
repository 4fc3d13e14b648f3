//! Order types for the GridClear auction engine.
//!
//! ## Fixed-Point Representation
//!
//! Prices and quantities are stored as u64 scaled by 10^8 (SCALE constant):
//! prices in currency minor units per kWh, quantities in kWh minor units.
//! This provides 8 decimal places of precision without floating-point errors.
//!
//! ## Lifecycle
//!
//! An order is immutable once accepted, except for its `remaining` quantity,
//! which only the matcher decrements during the order's own round. The
//! withdrawn state is tracked by the order book, not on the order itself.

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid (buy energy) or Ask (sell energy).
///
/// Represented as u8 at serialization boundaries:
/// - Bid = 0
/// - Ask = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Bid - wants to purchase energy at or below the limit price
    #[default]
    Bid,
    /// Ask - wants to sell energy at or above the limit price
    Ask,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Bid),
            1 => Some(Side::Ask),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

// ============================================================================
// OrderStatus enum
// ============================================================================

/// Fill status of an order.
///
/// Open, PartiallyFilled, and Filled are derived from the remaining
/// quantity; Withdrawn is reported by the order book for orders the
/// caller pulled before a round consumed them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// No quantity filled yet
    Open,
    /// Some quantity filled, remainder still live for the next round
    PartiallyFilled,
    /// Entire quantity consumed by trades
    Filled,
    /// Removed by the caller before being fully matched
    Withdrawn,
}

// ============================================================================
// Order struct
// ============================================================================

/// A limit order submitted to the call auction.
///
/// ## Fields
///
/// All price/quantity fields use fixed-point representation (scaled by 10^8).
/// The participant is an opaque wallet identifier supplied by an external
/// collaborator; the engine never validates or interprets it.
///
/// ## Example
///
/// ```
/// use gridclear::types::{Order, Side};
///
/// // Bid for 5 kWh at 10.00 per kWh
/// let order = Order::new(
///     1,                      // id (caller-assigned, unique)
///     "wallet-alpha",         // participant
///     Side::Bid,              // side
///     1_000_000_000,          // price: 10.00000000
///     500_000_000,            // quantity: 5.00000000
///     1703577600000,          // submitted_at (monotonic, ms)
/// );
/// assert_eq!(order.remaining, order.quantity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique order identifier (caller-assigned, opaque to the engine)
    pub id: u64,

    /// Opaque participant identifier (wallet address or similar)
    pub participant: String,

    /// Order side
    pub side: Side,

    /// Limit price in fixed-point (scaled by 10^8)
    pub price: u64,

    /// Original quantity in fixed-point (scaled by 10^8)
    pub quantity: u64,

    /// Remaining quantity (for partial fills)
    /// Decremented as the order is matched
    pub remaining: u64,

    /// Monotonic submission timestamp in milliseconds (caller-supplied)
    pub submitted_at: u64,
}

impl Order {
    /// Create a new limit order with remaining = quantity.
    pub fn new(
        id: u64,
        participant: impl Into<String>,
        side: Side,
        price: u64,
        quantity: u64,
        submitted_at: u64,
    ) -> Self {
        Self {
            id,
            participant: participant.into(),
            side,
            price,
            quantity,
            remaining: quantity,
            submitted_at,
        }
    }

    /// Fill status derived from the remaining quantity.
    pub fn status(&self) -> OrderStatus {
        if self.remaining == 0 {
            OrderStatus::Filled
        } else if self.remaining < self.quantity {
            OrderStatus::PartiallyFilled
        } else {
            OrderStatus::Open
        }
    }

    /// Check if the order is fully filled
    pub fn is_filled(&self) -> bool {
        self.remaining == 0
    }

    /// Get the filled quantity
    pub fn filled_quantity(&self) -> u64 {
        self.quantity.saturating_sub(self.remaining)
    }

    /// Fill a portion of this order.
    ///
    /// # Returns
    ///
    /// The actual quantity filled (may be less if the order doesn't have
    /// enough remaining).
    pub fn fill(&mut self, fill_qty: u64) -> u64 {
        let actual_fill = fill_qty.min(self.remaining);
        self.remaining = self.remaining.saturating_sub(actual_fill);
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
