//! Composite date and time

use core::fmt;

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

/// Complete time reading, in composite order: year, month, day, weekday, hour, minute, second
///
/// Values are whatever the chip holds; no calendar validation is performed
#[expect(missing_docs, reason = "self-explanatory fields")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub weekday: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTime {
    /// Construct from fields in composite order
    #[must_use]
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        weekday: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year,
            month,
            day,
            weekday,
            hour,
            minute,
            second,
        }
    }

    /// Fields in composite order
    #[must_use]
    pub const fn to_array(self) -> [u16; 7] {
        [
            self.year,
            self.month as u16,
            self.day as u16,
            self.weekday as u16,
            self.hour as u16,
            self.minute as u16,
            self.second as u16,
        ]
    }

    /// Construct from fields in composite order; all but the year are truncated to a byte
    #[must_use]
    pub const fn from_array(fields: [u16; 7]) -> Self {
        Self::new(
            fields[0],
            fields[1] as u8,
            fields[2] as u8,
            fields[3] as u8,
            fields[4] as u8,
            fields[5] as u8,
            fields[6] as u8,
        )
    }
}

impl From<[u16; 7]> for DateTime {
    fn from(fields: [u16; 7]) -> Self {
        Self::from_array(fields)
    }
}

impl From<DateTime> for [u16; 7] {
    fn from(time: DateTime) -> Self {
        time.to_array()
    }
}

/// `YYYY-MM-DD HH:MM:SS`
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// `YYYY-MM-DD HH:MM:SS`, same as [`fmt::Display`]
impl uDisplay for DateTime {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        // ufmt has no width/fill support
        if self.year < 1000 {
            f.write_char('0')?;
        }
        if self.year < 100 {
            f.write_char('0')?;
        }
        if self.year < 10 {
            f.write_char('0')?;
        }
        uwrite!(f, "{}", self.year)?;
        f.write_char('-')?;
        write_2digit(f, self.month)?;
        f.write_char('-')?;
        write_2digit(f, self.day)?;
        f.write_char(' ')?;
        write_2digit(f, self.hour)?;
        f.write_char(':')?;
        write_2digit(f, self.minute)?;
        f.write_char(':')?;
        write_2digit(f, self.second)
    }
}

fn write_2digit<W>(f: &mut Formatter<'_, W>, value: u8) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    if value < 10 {
        f.write_char('0')?;
    }
    uwrite!(f, "{}", value)
}

/// Partial time update; `None` slots leave the field on the chip unchanged
#[expect(missing_docs, reason = "self-explanatory fields")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTimeUpdate {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
    pub weekday: Option<u8>,
    pub hour: Option<u8>,
    pub minute: Option<u8>,
    pub second: Option<u8>,
}

impl DateTimeUpdate {
    /// Update only the date fields
    #[must_use]
    pub const fn date(year: u16, month: u8, day: u8) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            weekday: None,
            hour: None,
            minute: None,
            second: None,
        }
    }

    /// Update only the time-of-day fields
    #[must_use]
    pub const fn time(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year: None,
            month: None,
            day: None,
            weekday: None,
            hour: Some(hour),
            minute: Some(minute),
            second: Some(second),
        }
    }
}

impl From<DateTime> for DateTimeUpdate {
    fn from(time: DateTime) -> Self {
        Self {
            year: Some(time.year),
            month: Some(time.month),
            day: Some(time.day),
            weekday: Some(time.weekday),
            hour: Some(time.hour),
            minute: Some(time.minute),
            second: Some(time.second),
        }
    }
}
