//! ds1302 RTC abstractions and API

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::{
    bus::ThreeWire,
    datetime::{DateTime, DateTimeUpdate},
    field::{Field, CENTURY},
    line::DataLine,
    register::{RamSlot, Register, CLOCK_HALT, RAM_SLOTS, WRITE_PROTECT_ON},
    PinResult,
};

/// ds1302 real-time clock module; interfaced via three bit-banged lines
///
/// No internal state beyond the lines; every call is one or more complete bus transactions.
/// Field setters wrap out-of-range values into the field's cycle instead of rejecting them.
#[derive(Debug)]
#[must_use]
pub struct Ds1302<CLK, DAT, RST> {
    bus: ThreeWire<CLK, DAT, RST>,
}

// Specialized methods
impl<CLK, DAT, RST, E> Ds1302<CLK, DAT, RST>
where
    CLK: OutputPin<Error = E>,
    DAT: DataLine<Error = E>,
    RST: OutputPin<Error = E>,
{
    /// Connect to ds1302 by taking ownership of its clock, data and reset lines
    ///
    /// # Errors
    /// Returns an error if clock or reset cannot be driven low
    pub fn new(clk: CLK, dat: DAT, rst: RST) -> PinResult<E, Self> {
        ThreeWire::new(clk, dat, rst).map(|bus| Self { bus })
    }

    /// Disconnect to release the lines
    #[must_use]
    pub fn release(self) -> (CLK, DAT, RST) {
        self.bus.release()
    }

    /// Read a register by its raw read command byte
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn read_register(&mut self, addr: u8) -> PinResult<E, u8> {
        self.bus.get_register(addr)
    }

    /// Write a register by its raw write command byte, ignoring write protection
    ///
    /// Note: the chip discards this while write protection is set; prefer [`Self::protected_write`]
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn write_register(&mut self, addr: u8, value: u8) -> PinResult<E> {
        self.bus.set_register(addr, value)
    }

    /// Write a register by its raw write command byte, lifting write protection for that write
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn protected_write(&mut self, addr: u8, value: u8) -> PinResult<E> {
        self.bus.protected_write(addr, value)
    }

    /// Clear the clock halt bit to enable timekeeping
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn start(&mut self) -> PinResult<E> {
        let seconds = self.bus.get_register(Register::Second.read_addr())?;
        debug!("ds1302 start, seconds 0x{:02x}", seconds);
        self.bus
            .protected_write(Register::Second.write_addr(), seconds & !CLOCK_HALT)
    }

    /// Set the clock halt bit to disable timekeeping
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn stop(&mut self) -> PinResult<E> {
        let seconds = self.bus.get_register(Register::Second.read_addr())?;
        debug!("ds1302 stop, seconds 0x{:02x}", seconds);
        self.bus
            .protected_write(Register::Second.write_addr(), seconds | CLOCK_HALT)
    }

    /// Whether the clock halt bit is clear
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn is_running(&mut self) -> PinResult<E, bool> {
        self.bus
            .get_register(Register::Second.read_addr())
            .map(|seconds| seconds & CLOCK_HALT == 0)
    }

    /// Whether the write protect bit is set
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn is_write_protected(&mut self) -> PinResult<E, bool> {
        self.bus
            .get_register(Register::WriteProtect.read_addr())
            .map(|wp| wp & WRITE_PROTECT_ON != 0)
    }

    /// Get a single field as a decimal value; year is returned without its century
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_field(&mut self, field: Field) -> PinResult<E, u8> {
        self.bus
            .get_register(field.register().read_addr())
            .map(|raw| field.decode(raw))
    }

    /// Set a single field, wrapping `value` into the field's cycle
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_field(&mut self, field: Field, value: u8) -> PinResult<E> {
        self.bus
            .protected_write(field.register().write_addr(), field.encode(value))
    }
}

// Time getters
impl<CLK, DAT, RST, E> Ds1302<CLK, DAT, RST>
where
    CLK: OutputPin<Error = E>,
    DAT: DataLine<Error = E>,
    RST: OutputPin<Error = E>,
{
    /// Get complete date and time, one register at a time
    ///
    /// Note: not atomic; a rollover between register reads is not detected
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn date_time(&mut self) -> PinResult<E, DateTime> {
        Ok(DateTime {
            year: self.get_year()?,
            month: self.get_month()?,
            day: self.get_day()?,
            weekday: self.get_weekday()?,
            hour: self.get_hour()?,
            minute: self.get_minute()?,
            second: self.get_second()?,
        })
    }

    /// Get seconds; the clock halt bit does not affect the value
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_second(&mut self) -> PinResult<E, u8> {
        self.get_field(Field::Second)
    }

    /// Get minutes
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_minute(&mut self) -> PinResult<E, u8> {
        self.get_field(Field::Minute)
    }

    /// Get hours
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_hour(&mut self) -> PinResult<E, u8> {
        self.get_field(Field::Hour)
    }

    /// Get day of the month
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_day(&mut self) -> PinResult<E, u8> {
        self.get_field(Field::Day)
    }

    /// Get month
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_month(&mut self) -> PinResult<E, u8> {
        self.get_field(Field::Month)
    }

    /// Get day of the week
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_weekday(&mut self) -> PinResult<E, u8> {
        self.get_field(Field::Weekday)
    }

    /// Get full year, counted from [`CENTURY`]
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_year(&mut self) -> PinResult<E, u16> {
        self.get_field(Field::Year)
            .map(|year| CENTURY + u16::from(year))
    }
}

// Time setters
impl<CLK, DAT, RST, E> Ds1302<CLK, DAT, RST>
where
    CLK: OutputPin<Error = E>,
    DAT: DataLine<Error = E>,
    RST: OutputPin<Error = E>,
{
    /// Set date and time, one register at a time in composite order; `None` fields are skipped
    ///
    /// Accepts a [`DateTime`] for a full update
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines; fields before the failing one have
    /// already been written
    pub fn set_date_time(&mut self, time: impl Into<DateTimeUpdate>) -> PinResult<E> {
        let time = time.into();
        debug!("ds1302 set {:?}", time);

        if let Some(year) = time.year {
            self.set_year(year)?;
        }
        if let Some(month) = time.month {
            self.set_month(month)?;
        }
        if let Some(day) = time.day {
            self.set_day(day)?;
        }
        if let Some(weekday) = time.weekday {
            self.set_weekday(weekday)?;
        }
        if let Some(hour) = time.hour {
            self.set_hour(hour)?;
        }
        if let Some(minute) = time.minute {
            self.set_minute(minute)?;
        }
        if let Some(second) = time.second {
            self.set_second(second)?;
        }
        Ok(())
    }

    /// Set seconds, modulo 60
    ///
    /// Note: this also clears the clock halt bit
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_second(&mut self, second: u8) -> PinResult<E> {
        self.set_field(Field::Second, second)
    }

    /// Set minutes, modulo 60
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_minute(&mut self, minute: u8) -> PinResult<E> {
        self.set_field(Field::Minute, minute)
    }

    /// Set hours in 24-hour format, modulo 24
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_hour(&mut self, hour: u8) -> PinResult<E> {
        self.set_field(Field::Hour, hour)
    }

    /// Set day of the month, modulo 32
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_day(&mut self, day: u8) -> PinResult<E> {
        self.set_field(Field::Day, day)
    }

    /// Set month, modulo 13
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_month(&mut self, month: u8) -> PinResult<E> {
        self.set_field(Field::Month, month)
    }

    /// Set day of the week, modulo 8
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_weekday(&mut self, weekday: u8) -> PinResult<E> {
        self.set_field(Field::Weekday, weekday)
    }

    /// Set year, modulo 100; `2043` and `43` are the same year
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_year(&mut self, year: u16) -> PinResult<E> {
        self.set_field(Field::Year, (year % 100) as u8)
    }
}

// Scratch RAM
impl<CLK, DAT, RST, E> Ds1302<CLK, DAT, RST>
where
    CLK: OutputPin<Error = E>,
    DAT: DataLine<Error = E>,
    RST: OutputPin<Error = E>,
{
    /// Read one RAM byte; `index` wraps modulo [`RAM_SLOTS`]
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn read_ram(&mut self, index: u8) -> PinResult<E, u8> {
        self.bus.get_register(RamSlot::new(index).read_addr())
    }

    /// Write one RAM byte; `index` wraps modulo [`RAM_SLOTS`]
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn write_ram(&mut self, index: u8, value: u8) -> PinResult<E> {
        self.bus
            .protected_write(RamSlot::new(index).write_addr(), value)
    }

    /// Get entire RAM block
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn get_ram(&mut self) -> PinResult<E, [u8; RAM_SLOTS as usize]> {
        let mut buf = [0u8; RAM_SLOTS as usize];
        for (index, byte) in (0..RAM_SLOTS).zip(buf.iter_mut()) {
            *byte = self.read_ram(index)?;
        }
        Ok(buf)
    }

    /// Set entire RAM block
    ///
    /// # Errors
    /// Returns an error if something goes wrong on the lines
    pub fn set_ram(&mut self, ram: [u8; RAM_SLOTS as usize]) -> PinResult<E> {
        for (index, byte) in (0..RAM_SLOTS).zip(ram) {
            self.write_ram(index, byte)?;
        }
        Ok(())
    }
}
