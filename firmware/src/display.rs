//! Display subsystem

use core::convert::Infallible;

use ag_lcd::{Blink, Cursor, LcdDisplay, Lines};
use arduino_hal::{
    hal::port::{PB0, PB1, PB2, PB3, PD4, PD6},
    port::{
        mode::{Floating, Input, Output},
        Pin,
    },
    Delay,
};
use ds1302::DateTime;
use ufmt::{uWrite, uwrite};

const BLANK_LINE: &str = "                    ";
const GREETING: &str = "Today is ";

/// Names for the weekday register; the chip only counts, 1 is Sunday by convention
const WEEKDAYS: [&str; 8] = [
    "?", "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// 20x4 character LCD on a 4-bit bus
#[must_use]
pub struct Screen {
    lcd: LcdDisplay<Pin<Output>, Delay>,
}

impl Screen {
    /// Construct and initialize the display
    pub fn new(
        d4: Pin<Input<Floating>, PD4>,
        d12: Pin<Input<Floating>, PD6>,
        led_rx: Pin<Input<Floating>, PB0>,
        sck: Pin<Input<Floating>, PB1>,
        mosi: Pin<Input<Floating>, PB2>,
        miso: Pin<Input<Floating>, PB3>,
    ) -> Self {
        let lcd = LcdDisplay::new(
            d12.into_output().downgrade(),
            d4.into_output().downgrade(),
            Delay::new(),
        )
        .with_half_bus(
            led_rx.into_output().downgrade(),
            sck.into_output().downgrade(),
            mosi.into_output().downgrade(),
            miso.into_output().downgrade(),
        )
        .with_lines(Lines::TwoLines)
        .with_cursor(Cursor::Off)
        .with_blink(Blink::Off)
        .build();

        Self { lcd }
    }

    /// Draw the weekday and the full date and time
    pub fn show(&mut self, time: DateTime) {
        // 1st row: |Today is DayName    |
        // 2nd row: |YYYY-MM-DD HH:MM:SS |
        let name = WEEKDAYS[usize::from(time.weekday) % WEEKDAYS.len()];

        self.lcd.set_position(0, 0);
        self.lcd.print(GREETING);
        self.lcd.print(name);
        self.lcd.print(&BLANK_LINE[GREETING.len() + name.len()..]);

        self.lcd.set_position(0, 1);
        let Ok(()) = uwrite!(self, "{}", time);
    }
}

impl uWrite for Screen {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.lcd.print(s);
        Ok(())
    }
}
