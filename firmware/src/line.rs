//! Bidirectional ds1302 data line on an AVR port pin

use core::convert::Infallible;

use arduino_hal::port::{
    mode::{Floating, Input, Output},
    Pin, PinOps,
};
use ds1302::{DataLine, Direction};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

enum Mode<PIN> {
    Output(Pin<Output, PIN>),
    Input(Pin<Input<Floating>, PIN>),
}

/// Port pin that is reconfigured between push-pull output and floating input on demand
///
/// Writes while configured as input are dropped; reads while configured as output return the
/// driven level
#[must_use]
pub struct DataPin<PIN> {
    // only `None` during a direction change
    mode: Option<Mode<PIN>>,
}

impl<PIN: PinOps> DataPin<PIN> {
    /// Take the pin, starting out as a floating input
    pub const fn new(pin: Pin<Input<Floating>, PIN>) -> Self {
        Self {
            mode: Some(Mode::Input(pin)),
        }
    }
}

impl<PIN> ErrorType for DataPin<PIN> {
    type Error = Infallible;
}

impl<PIN: PinOps> OutputPin for DataPin<PIN> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if let Some(Mode::Output(pin)) = &mut self.mode {
            pin.set_low();
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if let Some(Mode::Output(pin)) = &mut self.mode {
            pin.set_high();
        }
        Ok(())
    }
}

impl<PIN: PinOps> InputPin for DataPin<PIN> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(match &self.mode {
            Some(Mode::Input(pin)) => pin.is_high(),
            Some(Mode::Output(pin)) => pin.is_set_high(),
            None => false,
        })
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl<PIN: PinOps> DataLine for DataPin<PIN> {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Infallible> {
        self.mode = self.mode.take().map(|mode| match (mode, direction) {
            (Mode::Output(pin), Direction::Input) => Mode::Input(pin.into_floating_input()),
            (Mode::Input(pin), Direction::Output) => Mode::Output(pin.into_output()),
            (mode, _) => mode,
        });
        Ok(())
    }
}
