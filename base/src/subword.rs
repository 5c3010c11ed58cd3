//! Convenience utilities for splitting 16-bit 8085 values into bytes
//! and for joining them together.
//!
//! The 8085 stores 16-bit quantities (addresses, and the data operand
//! of `LXI`) least significant byte first, so the instruction `LDA
//! 2050H` occupies the three bytes `3A 50 20`.

/// Extract the less-significant byte of a 16-bit value.
pub fn low_byte(value: u16) -> u8 {
    (value & 0xFF) as u8
}

/// Extract the more-significant byte of a 16-bit value.
pub fn high_byte(value: u16) -> u8 {
    ((value >> 8) & 0xFF) as u8
}

/// Split a 16-bit value into the two bytes which represent it in an
/// instruction.  The result is ordered as the bytes appear in memory:
/// low byte first, then high byte.
pub fn split_word(value: u16) -> (u8, u8) {
    (low_byte(value), high_byte(value))
}

/// Join a low byte and a high byte into a 16-bit value.  This is the
/// opposite of [`split_word`].
pub fn join_word(low: u8, high: u8) -> u16 {
    (u16::from(high) << 8) | u16::from(low)
}
