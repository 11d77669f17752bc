//! Driver for the ds1302 trickle-charge timekeeping chip over three bit-banged lines
//!
//! The chip keeps seconds, minutes, hours, day, month, weekday and a 2 digit year as packed BCD
//! registers, plus 31 bytes of battery-backed scratch RAM. This crate exposes the fields as
//! plain decimal values and handles the write protect register around every mutation.
//!
//! # Wiring
//!
//! - clock: any [`OutputPin`](embedded_hal::digital::OutputPin)
//! - data: a [`DataLine`], an input/output pin whose direction is switched per byte
//! - reset (chip enable): any [`OutputPin`](embedded_hal::digital::OutputPin)
//!
//! All three must share one error type; use [`core::convert::Infallible`] pins where the HAL
//! allows it. No delays are inserted between edges, so the caller's pin operations must be slow
//! enough for the chip (about 500 kHz at 2 V, 2 MHz at 5 V).
//!
//! # Concurrency
//!
//! [`Ds1302`] owns its lines and every operation takes `&mut self`, so transactions on the same
//! chip cannot interleave. Composite reads and writes are a sequence of independent register
//! transactions and are not atomic with respect to the running clock.
#![no_std]

#[cfg(test)]
extern crate std;

pub mod bcd;
pub mod bus;
pub mod datetime;
pub mod field;
pub mod line;
pub mod register;
pub mod rtc;

#[cfg(test)]
mod sim;

pub use crate::{
    bus::ThreeWire,
    datetime::{DateTime, DateTimeUpdate},
    field::{Field, CENTURY},
    line::{DataLine, Direction},
    register::{RamSlot, Register, RAM_SLOTS},
    rtc::Ds1302,
};

/// Result of an operation on the lines, carrying the pins' shared error type
pub type PinResult<E, T = ()> = Result<T, E>;
