//! Packed binary-coded decimal helpers

/// Encode a decimal value as 2 digit BCD
///
/// Only meaningful for `0..=99`; larger values lose their hundreds digit but never panic
#[must_use]
pub const fn decimal_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode a 2 digit BCD byte, all 8 bits included
///
/// Flags sharing the byte with the tens digit must be masked off by the caller
#[must_use]
pub const fn bcd_to_decimal(bcd: u8) -> u8 {
    let ones = bcd & 0b0000_1111;
    let tens = (bcd & 0b1111_0000) >> 4;
    ones + tens * 10
}
