//! Logic line abstractions for the three-wire bus
//!
//! Clock and reset are plain [`OutputPin`]s. The data line changes direction twice per read
//! transaction, which `embedded-hal` 1.0 has no trait for, hence [`DataLine`].

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Direction of a bidirectional line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Line is sampled by the driver
    Input,

    /// Line is driven by the driver
    Output,
}

/// A bidirectional digital line whose direction is switched at runtime
///
/// Levels written while in [`Direction::Input`] and levels read while in [`Direction::Output`]
/// are implementation defined; the bus never does either.
pub trait DataLine: ErrorType + InputPin + OutputPin {
    /// Reconfigure the line as input or output
    ///
    /// # Errors
    /// Returns an error if the underlying pin cannot be reconfigured
    fn set_direction(&mut self, direction: Direction) -> Result<(), <Self as ErrorType>::Error>;
}
