//! Bit-banged three-wire bus
//!
//! One transaction is always: reset high, one command byte, one data byte, reset low. Bytes go
//! out least significant bit first; the chip latches data on the rising clock edge and drives
//! read data after the falling edge.

use embedded_hal::digital::{OutputPin, PinState};
use log::trace;

use crate::{
    line::{DataLine, Direction},
    register::{Register, WRITE_PROTECT_OFF, WRITE_PROTECT_ON},
    PinResult,
};

/// Clock, data and reset lines of one ds1302
///
/// Exclusively owns the lines; every transaction runs to completion before returning
#[derive(Debug)]
#[must_use]
pub struct ThreeWire<CLK, DAT, RST> {
    clk: CLK,
    dat: DAT,
    rst: RST,
}

impl<CLK, DAT, RST, E> ThreeWire<CLK, DAT, RST>
where
    CLK: OutputPin<Error = E>,
    DAT: DataLine<Error = E>,
    RST: OutputPin<Error = E>,
{
    /// Take ownership of the lines and drive clock and reset low
    ///
    /// # Errors
    /// Returns an error if either output cannot be driven
    pub fn new(mut clk: CLK, dat: DAT, mut rst: RST) -> PinResult<E, Self> {
        clk.set_low()?;
        rst.set_low()?;
        Ok(Self { clk, dat, rst })
    }

    /// Give the lines back
    #[must_use]
    pub fn release(self) -> (CLK, DAT, RST) {
        (self.clk, self.dat, self.rst)
    }

    fn pulse(&mut self) -> PinResult<E> {
        self.clk.set_high()?;
        self.clk.set_low()
    }

    /// Clock out one byte, LSB first; clock is left low
    ///
    /// # Errors
    /// Returns an error if a line operation fails
    pub fn write_byte(&mut self, value: u8) -> PinResult<E> {
        self.dat.set_direction(Direction::Output)?;
        for bit in 0..8 {
            self.dat.set_state(PinState::from((value >> bit) & 1 == 1))?;
            self.pulse()?;
        }
        Ok(())
    }

    /// Clock in one byte, LSB first; the data line is left as input and clock low
    ///
    /// # Errors
    /// Returns an error if a line operation fails
    pub fn read_byte(&mut self) -> PinResult<E, u8> {
        self.dat.set_direction(Direction::Input)?;
        let mut value = 0;
        for bit in 0..8 {
            if self.dat.is_high()? {
                value |= 1 << bit;
            }
            self.pulse()?;
        }
        Ok(value)
    }

    /// Runs one command byte plus data phase with reset asserted; reset is released even if the
    /// data phase fails, and the first error wins
    fn transaction<T>(
        &mut self,
        command: u8,
        data: impl FnOnce(&mut Self) -> PinResult<E, T>,
    ) -> PinResult<E, T> {
        self.rst.set_high()?;
        let result = self.write_byte(command).and_then(|()| data(self));
        let released = self.rst.set_low();
        result.and_then(|value| released.map(|()| value))
    }

    /// Read one register; `addr` must be a read command byte
    ///
    /// # Errors
    /// Returns an error if a line operation fails
    pub fn get_register(&mut self, addr: u8) -> PinResult<E, u8> {
        let value = self.transaction(addr, Self::read_byte)?;
        trace!("ds1302 read 0x{:02x}: 0x{:02x}", addr, value);
        Ok(value)
    }

    /// Write one register without touching write protection
    ///
    /// # Errors
    /// Returns an error if a line operation fails
    pub fn set_register(&mut self, addr: u8, value: u8) -> PinResult<E> {
        trace!("ds1302 write 0x{:02x}: 0x{:02x}", addr, value);
        self.transaction(addr, |bus| bus.write_byte(value))
    }

    /// Write one register with write protection lifted for just that write
    ///
    /// Protection is re-asserted even if clearing it or the write itself fails; the write is
    /// skipped if clearing failed
    ///
    /// # Errors
    /// Returns the first error from a line operation
    pub fn protected_write(&mut self, addr: u8, value: u8) -> PinResult<E> {
        let wp = Register::WriteProtect.write_addr();
        let result = self
            .set_register(wp, WRITE_PROTECT_OFF)
            .and_then(|()| self.set_register(addr, value));
        let restored = self.set_register(wp, WRITE_PROTECT_ON);
        result.and(restored)
    }
}
