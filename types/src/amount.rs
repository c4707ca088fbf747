//! Fixed-point value types for native currency and USD reference values.
//!
//! Amounts are represented as fixed-point integers (u128) to avoid
//! floating-point errors. Both types carry 18 decimal places; the smallest
//! unit is 1 raw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Raw units per whole native-currency unit (18 decimals).
pub const NATIVE_UNIT: u128 = 1_000_000_000_000_000_000;

/// Raw units per whole USD (18 decimals).
pub const USD_UNIT: u128 = 1_000_000_000_000_000_000;

/// An amount of the native currency.
///
/// Internally stored as raw units (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NativeAmount(u128);

impl NativeAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// A whole number of native-currency units.
    pub fn from_native(units: u128) -> Self {
        Self(units * NATIVE_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole native-currency units, truncating the fractional part.
    pub fn to_native(&self) -> u128 {
        self.0 / NATIVE_UNIT
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for NativeAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for NativeAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}

/// A USD-denominated reference value.
///
/// Internally stored as raw units (u128) for precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UsdValue(u128);

impl UsdValue {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// A whole number of USD.
    pub fn from_usd(units: u128) -> Self {
        Self(units * USD_UNIT)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Whole USD, truncating the fractional part.
    pub fn to_usd(&self) -> u128 {
        self.0 / USD_UNIT
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Add for UsdValue {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for UsdValue {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for UsdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} usd-raw", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_whole_unit_roundtrip() {
        let amount = NativeAmount::from_native(3);
        assert_eq!(amount.raw(), 3 * NATIVE_UNIT);
        assert_eq!(amount.to_native(), 3);
    }

    #[test]
    fn usd_whole_unit_roundtrip() {
        let value = UsdValue::from_usd(50);
        assert_eq!(value.raw(), 50 * USD_UNIT);
        assert_eq!(value.to_usd(), 50);
    }

    #[test]
    fn checked_add_detects_overflow() {
        let max = NativeAmount::new(u128::MAX);
        assert!(max.checked_add(NativeAmount::new(1)).is_none());
    }

    #[test]
    fn usd_ordering_matches_raw() {
        assert!(UsdValue::from_usd(20) < UsdValue::from_usd(50));
        assert!(UsdValue::from_usd(60) > UsdValue::from_usd(50));
    }
}
