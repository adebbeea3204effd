//! Fixed-point amount utilities.
//!
//! ## Overview
//!
//! All value amounts in the engine are `u64` integers in the smallest
//! native unit; the engine itself only ever compares, adds, and subtracts
//! them. This module provides the boundary conversions between native
//! units and human-readable decimal strings, scaled by 10^8.
//!
//! ## Why Fixed-Point?
//!
//! Floating-point arithmetic can produce different results on different
//! hardware, breaking determinism. Fixed-point ensures identical results
//! everywhere.
//!
//! ## Examples
//!
//! ```
//! use auctionhouse::types::amount::{to_native, from_native};
//!
//! // Convert 1.5 value units to the smallest native unit
//! let amount = to_native("1.5").unwrap();
//! assert_eq!(amount, 150_000_000);
//!
//! // Convert back to a string
//! assert_eq!(from_native(amount), "1.50000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point amounts: 10^8
///
/// One value unit equals 10^8 of the smallest native unit.
pub const SCALE: u64 = 100_000_000;

/// Maximum whole value units representable in a u64 amount
///
/// u64::MAX / SCALE ≈ 184,467,440,737 (184 billion)
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to an amount in the smallest native unit
///
/// # Arguments
///
/// * `s` - Decimal string (e.g., "1.5")
///
/// # Returns
///
/// * `Some(u64)` - The native-unit amount
/// * `None` - If parsing fails or the value is negative or out of range
///
/// # Example
///
/// ```
/// use auctionhouse::types::amount::to_native;
///
/// assert_eq!(to_native("1.0"), Some(100_000_000));
/// assert_eq!(to_native("0.00000001"), Some(1));
/// assert_eq!(to_native("-1"), None);
/// ```
pub fn to_native(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_native(decimal)
}

/// Convert a Decimal to an amount in the smallest native unit
///
/// Returns `None` if the value is negative or out of range.
pub fn decimal_to_native(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert a native-unit amount to a Decimal
pub fn native_to_decimal(amount: u64) -> Decimal {
    Decimal::from(amount) / Decimal::from(SCALE)
}

/// Convert a native-unit amount to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use auctionhouse::types::amount::from_native;
///
/// assert_eq!(from_native(100_000_000), "1.00000000");
/// assert_eq!(from_native(150_000_000), "1.50000000");
/// ```
pub fn from_native(amount: u64) -> String {
    let decimal = native_to_decimal(amount);
    format!("{:.8}", decimal)
}

/// Convert a native-unit amount to a human-readable string
/// (trailing zeros trimmed)
///
/// # Example
///
/// ```
/// use auctionhouse::types::amount::from_native_trimmed;
///
/// assert_eq!(from_native_trimmed(100_000_000), "1");
/// assert_eq!(from_native_trimmed(150_000_000), "1.5");
/// ```
pub fn from_native_trimmed(amount: u64) -> String {
    let decimal = native_to_decimal(amount);
    format!("{}", decimal.normalize())
}

// ============================================================================
// Checked Arithmetic
// ============================================================================

/// Add two amounts, returning `None` on overflow
pub fn checked_add(a: u64, b: u64) -> Option<u64> {
    a.checked_add(b)
}

/// Subtract two amounts, returning `None` on underflow
pub fn checked_sub(a: u64, b: u64) -> Option<u64> {
    a.checked_sub(b)
}

// ============================================================================
// Unit Tests
// ============================================================================
