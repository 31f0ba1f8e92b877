//! fixed-point numerical types

/// 32-bit signed fixed point number with 16 bits of fraction.
///
/// Used for the `fontRevision` field of the `head` table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixed(i32);

impl Fixed {
    /// This type's smallest representable value
    pub const EPSILON: Self = Self(1);
    /// One.
    pub const ONE: Self = Self(1 << 16);

    /// Creates a new fixed point value from the underlying bit representation.
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Returns the underlying bit representation of the value.
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Creates a fixed point value from an integer.
    pub const fn from_i32(i: i32) -> Self {
        Self(i << 16)
    }

    /// Creates a fixed point value from a float, rounding to the nearest
    /// representable value.
    pub fn from_f64(x: f64) -> Self {
        let scaled = x * 65536.0;
        // round half away from zero without needing std
        let rounded = if scaled < 0.0 {
            scaled - 0.5
        } else {
            scaled + 0.5
        };
        Self(rounded as i32)
    }

    /// The value as a float.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }
}

impl std::fmt::Debug for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl std::fmt::Display for Fixed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.to_f64())
    }
}

crate::newtype_scalar!(Fixed, [u8; 4]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn float_conversion() {
        assert_eq!(Fixed::from_f64(1.0), Fixed::ONE);
        assert_eq!(Fixed::from_f64(2.5).to_bits(), 0x0002_8000);
        assert_eq!(Fixed::from_f64(-1.5).to_f64(), -1.5);
        assert_eq!(Fixed::from_i32(3).to_f64(), 3.0);
    }

    #[test]
    fn raw_is_big_endian_bits() {
        let fixed = Fixed::from_raw([0x00, 0x01, 0x40, 0x00]);
        assert_eq!(fixed.to_f64(), 1.25);
    }
}
