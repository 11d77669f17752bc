//! Desk clock built on the ds1302 driver
//!
//! Keeps time on a ds1302 and shows it on a 20x4 character LCD
#![no_std]
#![no_main]

use core::convert::Infallible;

use arduino_hal::{
    entry,
    hal::port::{PD2, PD3, PD5},
    port::{mode::Output, Pin},
    Peripherals,
};
use ds1302::{DateTime, Ds1302};
use panic_halt as _;

pub mod display;
pub mod line;

use crate::{display::Screen, line::DataPin};

const REFRESH_INTERVAL_MS: u32 = 200;

/// RAM slot holding [`SET_MARKER`] once the clock has been set
const SET_MARKER_SLOT: u8 = 0;
const SET_MARKER: u8 = 0xa5;

/// Written on first power-up, when the RAM marker is missing
const FIRST_BOOT_TIME: DateTime = DateTime::new(2025, 1, 1, 4, 0, 0, 0);

type Rtc = Ds1302<Pin<Output, PD2>, DataPin<PD3>, Pin<Output, PD5>>;

/// Desk clock state
///
/// # Pin Configuration
///
/// `PORTB`:
/// - `PB0`: LCD D4
/// - `PB1`: LCD D5
/// - `PB2`: LCD D6
/// - `PB3`: LCD D7
///
/// `PORTD`:
/// - `PD2`: ds1302 SCLK
/// - `PD3`: ds1302 I/O
/// - `PD4`: LCD enable
/// - `PD5`: ds1302 CE
/// - `PD6`: LCD RS
#[must_use]
pub struct DeskClock {
    rtc: Rtc,
    screen: Screen,
    shown: Option<DateTime>,
}

impl DeskClock {
    /// Construct the clock and interface with hardware
    pub fn new(periphs: Peripherals) -> Self {
        let pins = arduino_hal::hal::Pins::new(
            periphs.PORTB,
            periphs.PORTC,
            periphs.PORTD,
            periphs.PORTE,
            periphs.PORTF,
        );

        // Disable USB controller to prevent the production of spurious interrupts
        periphs.USB_DEVICE.usbcon().reset();

        Self {
            rtc: infallible(Ds1302::new(
                pins.pd2.into_output(),
                DataPin::new(pins.pd3),
                pins.pd5.into_output(),
            )),
            screen: Screen::new(pins.pd4, pins.pd6, pins.pb0, pins.pb1, pins.pb2, pins.pb3),
            shown: None,
        }
    }

    /// Set the time if the chip lost it, then make sure the oscillator runs
    pub fn begin(&mut self) {
        if infallible(self.rtc.read_ram(SET_MARKER_SLOT)) != SET_MARKER {
            infallible(self.rtc.set_date_time(FIRST_BOOT_TIME));
            infallible(self.rtc.write_ram(SET_MARKER_SLOT, SET_MARKER));
        }

        infallible(self.rtc.start());
    }

    fn refresh(&mut self) {
        let time = infallible(self.rtc.date_time());
        if self.shown != Some(time) {
            self.screen.show(time);
            self.shown = Some(time);
        }
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[entry]
fn main() -> ! {
    let periphs = Peripherals::take().unwrap();
    let mut clock = DeskClock::new(periphs);

    clock.begin();

    loop {
        clock.refresh();
        arduino_hal::delay_ms(REFRESH_INTERVAL_MS);
    }
}
