//! Fixed-point price and quantity utilities.
//!
//! ## Overview
//!
//! All prices and quantities in GridClear use fixed-point representation
//! to avoid floating-point errors. Values are stored as u64 scaled by 10^8:
//! prices in currency minor units per kWh, quantities in kWh.
//!
//! Floating-point arithmetic can produce different results on different
//! hardware, breaking the determinism the clearing engine guarantees.
//! Fixed-point ensures identical results everywhere.
//!
//! ## Examples
//!
//! ```
//! use gridclear::types::price::{to_fixed, from_fixed};
//!
//! // Convert 9.50 per kWh to fixed-point
//! let price = to_fixed("9.5").unwrap();
//! assert_eq!(price, 950_000_000);
//!
//! // Convert back to string
//! assert_eq!(from_fixed(price), "9.50000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point arithmetic: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

/// Maximum value that can be safely represented
///
/// u64::MAX / SCALE ≈ 184,467,440,737 (184 billion)
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If parsing fails or value is out of range
///
/// # Example
///
/// ```
/// use gridclear::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("9.5"), Some(950_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If value is negative or out of range
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use gridclear::types::price::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(950_000_000), "9.50000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Convert fixed-point u64 to a human-readable string (trimmed trailing zeros)
///
/// # Example
///
/// ```
/// use gridclear::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(950_000_000), "9.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{}", decimal.normalize())
}

// ============================================================================
// Arithmetic Functions (using rust_decimal for safety)
// ============================================================================

/// Multiply two fixed-point values
///
/// This performs proper scaling to avoid overflow.
///
/// # Returns
///
/// * `Some(u64)` - Result of a * b (properly scaled)
/// * `None` - If overflow occurs
///
/// # Example
///
/// ```
/// use gridclear::types::price::checked_mul;
///
/// // 9.5 * 4.0 = 38.0
/// let a = 950_000_000u64;
/// let b = 400_000_000u64;
/// assert_eq!(checked_mul(a, b), Some(3_800_000_000));
/// ```
pub fn checked_mul(a: u64, b: u64) -> Option<u64> {
    let da = fixed_to_decimal(a);
    let db = fixed_to_decimal(b);
    let result = da.checked_mul(db)?;
    decimal_to_fixed(result)
}

/// Divide two fixed-point values
///
/// # Returns
///
/// * `Some(u64)` - Result of a / b (properly scaled)
/// * `None` - If divisor is zero or overflow occurs
pub fn checked_div(a: u64, b: u64) -> Option<u64> {
    if b == 0 {
        return None;
    }

    let da = fixed_to_decimal(a);
    let db = fixed_to_decimal(b);
    let result = da.checked_div(db)?;
    decimal_to_fixed(result)
}

/// Add two fixed-point values
pub fn checked_add(a: u64, b: u64) -> Option<u64> {
    a.checked_add(b)
}

/// Subtract two fixed-point values
pub fn checked_sub(a: u64, b: u64) -> Option<u64> {
    a.checked_sub(b)
}

// ============================================================================
// Clearing-Price Helpers
// ============================================================================

/// Midpoint of two fixed-point prices, rounded down to the minor unit.
///
/// The sum is widened to u128 first, so the midpoint of values near
/// u64::MAX cannot overflow.
///
/// # Example
///
/// ```
/// use gridclear::types::price::floor_midpoint;
///
/// // Midpoint of 9.0 and 10.0 is 9.5
/// assert_eq!(floor_midpoint(900_000_000, 1_000_000_000), 950_000_000);
/// // Odd sums round down by one minor unit
/// assert_eq!(floor_midpoint(1, 2), 1);
/// ```
pub fn floor_midpoint(a: u64, b: u64) -> u64 {
    (((a as u128) + (b as u128)) / 2) as u64
}

/// Clamp a price into the inclusive band [low, high].
///
/// Used to enforce the marginal-ask ≤ clearing price ≤ marginal-bid
/// invariant after rounding.
pub fn clamp_to_band(price: u64, low: u64, high: u64) -> u64 {
    debug_assert!(low <= high, "band bounds inverted");
    price.max(low).min(high)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_constant() {
        assert_eq!(SCALE, 100_000_000);
    }

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("1.0"), Some(100_000_000));
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
        assert_eq!(to_fixed("9.5"), Some(950_000_000));
    }

    #[test]
    fn test_to_fixed_edge_cases() {
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("0.0"), Some(0));

        // Negative values should return None
        assert_eq!(to_fixed("-1.0"), None);

        // Invalid strings should return None
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(50_000_000), "0.50000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_from_fixed_trimmed() {
        assert_eq!(from_fixed_trimmed(100_000_000), "1");
        assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
    }

    #[test]
    fn test_roundtrip() {
        let values = ["1.0", "0.5", "9.5", "0.00000001", "123456.78901234"];

        for s in values {
            let fixed = to_fixed(s).unwrap();
            let back = from_fixed(fixed);
            // Parse both to compare (handles trailing zeros)
            let original = Decimal::from_str(s).unwrap();
            let converted = Decimal::from_str(&back).unwrap();
            assert_eq!(original, converted, "Roundtrip failed for {}", s);
        }
    }

    #[test]
    fn test_checked_mul() {
        // 9.5 * 4.0 = 38.0
        let a = to_fixed("9.5").unwrap();
        let b = to_fixed("4.0").unwrap();
        assert_eq!(checked_mul(a, b), Some(to_fixed("38.0").unwrap()));

        // 2.0 * 3.0 = 6.0
        let a = to_fixed("2.0").unwrap();
        let b = to_fixed("3.0").unwrap();
        assert_eq!(checked_mul(a, b), Some(to_fixed("6.0").unwrap()));
    }

    #[test]
    fn test_checked_div() {
        // 100.0 / 2.0 = 50.0
        let a = to_fixed("100.0").unwrap();
        let b = to_fixed("2.0").unwrap();
        assert_eq!(checked_div(a, b), Some(to_fixed("50.0").unwrap()));

        // Division by zero should return None
        assert_eq!(checked_div(a, 0), None);
    }

    #[test]
    fn test_checked_add_sub() {
        let a = to_fixed("100.0").unwrap();
        let b = to_fixed("50.5").unwrap();
        assert_eq!(checked_add(a, b), Some(to_fixed("150.5").unwrap()));
        assert_eq!(checked_sub(a, b), Some(to_fixed("49.5").unwrap()));

        // Overflow / underflow return None
        assert_eq!(checked_add(u64::MAX, 1), None);
        assert_eq!(checked_sub(0, 1), None);
    }

    #[test]
    fn test_floor_midpoint() {
        // 9.0 .. 10.0 -> 9.5
        assert_eq!(floor_midpoint(900_000_000, 1_000_000_000), 950_000_000);
        // Equal bounds
        assert_eq!(floor_midpoint(42, 42), 42);
        // Rounds down on odd sums
        assert_eq!(floor_midpoint(1, 2), 1);
        // No overflow near the top of the range
        assert_eq!(floor_midpoint(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn test_clamp_to_band() {
        assert_eq!(clamp_to_band(5, 3, 7), 5);
        assert_eq!(clamp_to_band(1, 3, 7), 3);
        assert_eq!(clamp_to_band(9, 3, 7), 7);
        // Midpoint of the band bounds always stays inside
        assert_eq!(clamp_to_band(floor_midpoint(3, 7), 3, 7), 5);
    }

    #[test]
    fn test_precision() {
        // Verify we maintain 8 decimal places of precision
        let value = "123456789.12345678";
        let fixed = to_fixed(value).unwrap();
        let back = from_fixed(fixed);
        assert_eq!(back, value);
    }
}
