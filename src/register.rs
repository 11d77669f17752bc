//! ds1302 register map
//!
//! Every register has an even command byte used for writes; the read command is the same byte
//! with bit 0 set.

/// Bit 0 of a command byte selects a read
pub const READ_BIT: u8 = 0x01;

/// Bit 7 of [`Register::Second`]; timekeeping is halted while set
pub const CLOCK_HALT: u8 = 0b1000_0000;

/// Value of [`Register::WriteProtect`] that blocks all writes
pub const WRITE_PROTECT_ON: u8 = 0b1000_0000;

/// Value of [`Register::WriteProtect`] that allows writes
pub const WRITE_PROTECT_OFF: u8 = 0;

/// Command byte of RAM slot 0
pub const RAM_BASE: u8 = 0xc0;

/// Number of scratch RAM slots
pub const RAM_SLOTS: u8 = 31;

/// Clock and control registers, by write address
#[expect(missing_docs, reason = "self-explanatory variants")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Second = 0x80,
    Minute = 0x82,
    Hour = 0x84,
    Day = 0x86,
    Month = 0x88,
    Weekday = 0x8a,
    Year = 0x8c,
    WriteProtect = 0x8e,
    Control = 0x90,
}

impl Register {
    /// Command byte to write this register
    #[must_use]
    pub const fn write_addr(self) -> u8 {
        self as u8
    }

    /// Command byte to read this register
    #[must_use]
    pub const fn read_addr(self) -> u8 {
        self as u8 | READ_BIT
    }
}

/// One byte of battery-backed scratch RAM
///
/// Indices wrap modulo [`RAM_SLOTS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct RamSlot(u8);

impl RamSlot {
    /// Select the slot for `index`, wrapping out-of-range indices
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % RAM_SLOTS)
    }

    /// Slot index in `0..RAM_SLOTS`
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Command byte to write this slot
    #[must_use]
    pub const fn write_addr(self) -> u8 {
        RAM_BASE + self.0 * 2
    }

    /// Command byte to read this slot
    #[must_use]
    pub const fn read_addr(self) -> u8 {
        self.write_addr() | READ_BIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_register_addresses() {
        let table = [
            (Register::Second, 0x80, 0x81),
            (Register::Minute, 0x82, 0x83),
            (Register::Hour, 0x84, 0x85),
            (Register::Day, 0x86, 0x87),
            (Register::Month, 0x88, 0x89),
            (Register::Weekday, 0x8a, 0x8b),
            (Register::Year, 0x8c, 0x8d),
            (Register::WriteProtect, 0x8e, 0x8f),
            (Register::Control, 0x90, 0x91),
        ];

        for (register, write, read) in table {
            assert_eq!(register.write_addr(), write, "{register:?} write address");
            assert_eq!(register.read_addr(), read, "{register:?} read address");
        }
    }

    #[test]
    fn ram_slot_addresses() {
        assert_eq!(RamSlot::new(0).write_addr(), 0xc0);
        assert_eq!(RamSlot::new(0).read_addr(), 0xc1);
        assert_eq!(RamSlot::new(30).write_addr(), 0xfc);
        assert_eq!(RamSlot::new(30).read_addr(), 0xfd);
    }

    #[test]
    fn ram_index_wraps() {
        assert_eq!(RamSlot::new(31), RamSlot::new(0));
        assert_eq!(RamSlot::new(36).index(), 5);
        assert_eq!(RamSlot::new(255).index(), 255 % 31);
    }
}
