//! Fixed-point tonnage arithmetic.
//!
//! Construction rules round weights to half tons, so all rule math is done
//! in integer half-ton units and only converted to [`Fixed`] tons at the
//! API boundary. Floating-point never enters a weight calculation.

use fixed::types::I32F32;

/// Fixed-point number type for all weights.
///
/// Uses 32 bits for integer part and 32 bits for fractional part, so every
/// half-ton value is represented exactly.
pub type Fixed = I32F32;

/// Serde support for fixed-point numbers.
///
/// Serializes fixed-point numbers as their raw bit representation (i64)
/// to preserve exact precision across serialization boundaries.
pub mod fixed_serde {
    use super::Fixed;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a fixed-point number as its raw bit representation.
    pub fn serialize<S>(value: &Fixed, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.to_bits().serialize(serializer)
    }

    /// Deserialize a fixed-point number from its raw bit representation.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Fixed, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = i64::deserialize(deserializer)?;
        Ok(Fixed::from_bits(bits))
    }
}

/// Convert a count of half tons to tons.
#[must_use]
pub fn from_half_tons(half_tons: u32) -> Fixed {
    let whole = Fixed::from_num(half_tons / 2);
    if half_tons % 2 == 0 {
        whole
    } else {
        whole + Fixed::from_bits(1 << 31)
    }
}

/// Convert a weight to half tons, rounding up.
///
/// Negative weights clamp to zero.
#[must_use]
pub fn to_half_tons_ceil(tons: Fixed) -> u32 {
    if tons <= Fixed::ZERO {
        return 0;
    }
    let doubled = tons.saturating_mul(Fixed::from_num(2));
    doubled.saturating_ceil().to_num::<u32>()
}

/// Round a weight up to the nearest half ton.
#[must_use]
pub fn ceil_to_half(tons: Fixed) -> Fixed {
    from_half_tons(to_half_tons_ceil(tons))
}

/// Integer division rounding up.
#[must_use]
pub const fn div_ceil(numerator: u32, denominator: u32) -> u32 {
    (numerator + denominator - 1) / denominator
}

/// Integer division rounding to nearest, halves rounding up.
#[must_use]
pub const fn div_round(numerator: u32, denominator: u32) -> u32 {
    (numerator * 2 + denominator) / (denominator * 2)
}

/// Check whether a weight is an exact multiple of half a ton.
#[must_use]
pub fn is_half_ton_multiple(tons: Fixed) -> bool {
    let doubled = tons.saturating_mul(Fixed::from_num(2));
    doubled.frac() == Fixed::ZERO
}
