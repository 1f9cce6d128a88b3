//! Labelled protocol bytes.
//!
//! Every byte that ends up in a Busylight command buffer is carried as a
//! [`StepByte`]: the raw value plus a static label naming what it encodes.
//! The label never reaches the wire; it exists for hex dumps and logs.

#![deny(static_mut_refs)]

use core::fmt;

use crate::{ProtocolError, ProtocolResult};

/// One encoded protocol byte and its diagnostic label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StepByte {
    label: &'static str,
    value: u8,
}

impl StepByte {
    /// Sentinel for an unused position. Encodes as `0x00`.
    pub const EMPTY: Self = Self {
        label: "empty",
        value: 0,
    };

    /// Wrap an already-encoded byte.
    pub const fn new(label: &'static str, value: u8) -> Self {
        Self { label, value }
    }

    /// Build from an unsigned integer, saturating at `0xFF`.
    pub fn from_unsigned(label: &'static str, value: u32) -> Self {
        Self {
            label,
            value: u8::try_from(value).unwrap_or(u8::MAX),
        }
    }

    /// Parse a base-2 representation such as `"00010110"`.
    ///
    /// Leading zeros are allowed; anything that does not fit in eight bits
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidBinary`] for empty input, non-binary
    /// digits, or values above `0xFF`.
    pub fn from_binary(label: &'static str, bits: &str) -> ProtocolResult<Self> {
        let trimmed = bits.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ProtocolError::InvalidBinary(bits.to_string()));
        }
        u8::from_str_radix(trimmed, 2)
            .ok()
            .map(|value| Self { label, value })
            .ok_or_else(|| ProtocolError::InvalidBinary(bits.to_string()))
    }

    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Raw wire value.
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// The byte reinterpreted as two's-complement.
    pub const fn as_i8(&self) -> i8 {
        i8::from_ne_bytes([self.value])
    }

    /// Unsigned reading used by the checksum.
    pub fn to_u32(&self) -> u32 {
        u32::from(self.value)
    }

    /// Two uppercase hex digits.
    pub fn hex(&self) -> String {
        format!("{:02X}", self.value)
    }
}

impl Default for StepByte {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for StepByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:02X}", self.label, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(StepByte::EMPTY.value(), 0);
        assert_eq!(StepByte::EMPTY.to_u32(), 0);
        assert_eq!(StepByte::EMPTY.hex(), "00");
        assert_eq!(StepByte::default(), StepByte::EMPTY);
    }

    #[test]
    fn from_unsigned_clamps_to_byte_range() {
        assert_eq!(StepByte::from_unsigned("x", 0).value(), 0);
        assert_eq!(StepByte::from_unsigned("x", 250).value(), 250);
        assert_eq!(StepByte::from_unsigned("x", 255).value(), 255);
        assert_eq!(StepByte::from_unsigned("x", 256).value(), 255);
        assert_eq!(StepByte::from_unsigned("x", u32::MAX).value(), 255);
    }

    #[test]
    fn signed_and_unsigned_readings_disagree_above_0x7f() {
        let b = StepByte::new("reserved", 0xFF);
        assert_eq!(b.as_i8(), -1);
        assert_eq!(b.to_u32(), 255);

        let b = StepByte::new("timeout", 31);
        assert_eq!(b.as_i8(), 31);
        assert_eq!(b.to_u32(), 31);
    }

    #[test]
    fn hex_is_two_uppercase_digits() {
        assert_eq!(StepByte::new("a", 0x0A).hex(), "0A");
        assert_eq!(StepByte::new("a", 0xFA).hex(), "FA");
    }

    #[test]
    fn from_binary_parses_padded_bits() -> Result<(), ProtocolError> {
        assert_eq!(StepByte::from_binary("lsb", "00010110")?.value(), 0x16);
        assert_eq!(StepByte::from_binary("msb", "100")?.value(), 4);
        assert_eq!(StepByte::from_binary("msb", "11111111")?.value(), 0xFF);
        Ok(())
    }

    #[test]
    fn from_binary_rejects_garbage() {
        for bad in ["", "2", "0b101", "111111111", "10 01"] {
            assert!(
                matches!(
                    StepByte::from_binary("x", bad),
                    Err(ProtocolError::InvalidBinary(_))
                ),
                "expected InvalidBinary for {bad:?}"
            );
        }
    }

    #[test]
    fn display_includes_label() {
        assert_eq!(StepByte::new("red", 0x14).to_string(), "red=14");
    }
}
