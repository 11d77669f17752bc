//! Calendar fields and their register encodings

use crate::{
    bcd::{bcd_to_decimal, decimal_to_bcd},
    register::{Register, CLOCK_HALT},
};

/// Century the 2 digit year register counts from
pub const CENTURY: u16 = 2000;

/// A single calendar field stored in its own register
#[expect(missing_docs, reason = "self-explanatory variants")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Weekday,
    Year,
}

impl Field {
    /// All fields in composite date-time order
    pub const ALL: [Self; 7] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Weekday,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    /// Register holding this field
    #[must_use]
    pub const fn register(self) -> Register {
        match self {
            Self::Second => Register::Second,
            Self::Minute => Register::Minute,
            Self::Hour => Register::Hour,
            Self::Day => Register::Day,
            Self::Month => Register::Month,
            Self::Weekday => Register::Weekday,
            Self::Year => Register::Year,
        }
    }

    /// Values written to this field are reduced modulo its cycle length
    #[must_use]
    pub const fn cycle(self) -> u8 {
        match self {
            Self::Second | Self::Minute => 60,
            Self::Hour => 24,
            Self::Day => 32,
            Self::Month => 13,
            Self::Weekday => 8,
            Self::Year => 100,
        }
    }

    /// Register byte for `value`, wrapped into the field's cycle
    #[must_use]
    pub const fn encode(self, value: u8) -> u8 {
        decimal_to_bcd(value % self.cycle())
    }

    /// Decimal value of a raw register byte
    ///
    /// Note: the clock halt flag is stripped from seconds; year is the 2 digit register value
    #[must_use]
    pub const fn decode(self, raw: u8) -> u8 {
        match self {
            Self::Second => bcd_to_decimal(raw & !CLOCK_HALT) % 60,
            _ => bcd_to_decimal(raw),
        }
    }
}
