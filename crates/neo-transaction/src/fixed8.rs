//! Fixed-point amounts with eight decimal places.

use std::fmt;

/// Number of base units in one whole token.
pub const FIXED8_DECIMALS: u64 = 1_0000_0000;

/// A 64-bit amount scaled by 10^8, as carried in outputs and the gas field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed8(pub u64);

impl Fixed8 {
    /// Zero.
    pub const ZERO: Fixed8 = Fixed8(0);

    /// Create an amount from raw base units.
    pub fn from_raw(units: u64) -> Self {
        Fixed8(units)
    }

    /// Create an amount from a whole number of tokens.
    ///
    /// # Returns
    /// `None` if the scaled value does not fit in 64 bits.
    pub fn from_whole(tokens: u64) -> Option<Self> {
        tokens.checked_mul(FIXED8_DECIMALS).map(Fixed8)
    }

    /// Return the raw base units.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Add two amounts, returning `None` on overflow.
    pub fn checked_add(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_add(other.0).map(Fixed8)
    }

    /// Subtract two amounts, returning `None` on underflow.
    pub fn checked_sub(self, other: Fixed8) -> Option<Fixed8> {
        self.0.checked_sub(other.0).map(Fixed8)
    }
}

impl From<u64> for Fixed8 {
    fn from(units: u64) -> Self {
        Fixed8(units)
    }
}

impl fmt::Display for Fixed8 {
    /// Display as `<whole>.<8 fractional digits>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:08}",
            self.0 / FIXED8_DECIMALS,
            self.0 % FIXED8_DECIMALS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Fixed8(0).to_string(), "0.00000000");
        assert_eq!(Fixed8(1).to_string(), "0.00000001");
        assert_eq!(Fixed8(1_0000_0000).to_string(), "1.00000000");
        assert_eq!(Fixed8(123_4567_8901).to_string(), "123.45678901");
    }

    #[test]
    fn test_from_whole() {
        assert_eq!(Fixed8::from_whole(100), Some(Fixed8(100_0000_0000)));
        assert_eq!(Fixed8::from_whole(u64::MAX), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Fixed8(5).checked_add(Fixed8(7)), Some(Fixed8(12)));
        assert_eq!(Fixed8(u64::MAX).checked_add(Fixed8(1)), None);
        assert_eq!(Fixed8(7).checked_sub(Fixed8(5)), Some(Fixed8(2)));
        assert_eq!(Fixed8(5).checked_sub(Fixed8(7)), None);
    }
}
