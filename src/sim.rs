//! Simulated ds1302 driven through the same pin traits as real hardware
//!
//! Decodes the clock/data/reset trace, keeps a register file and records every completed
//! transaction so tests can check both values and bus sequencing.

use core::{cell::RefCell, convert::Infallible};
use std::{rc::Rc, vec::Vec};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::{
    line::{DataLine, Direction},
    register::{Register, READ_BIT, WRITE_PROTECT_ON},
};

/// One completed reset-high..reset-low window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub command: u8,
    pub data: u8,
    /// Rising clock edges seen in the data phase
    pub data_bits: u8,
    /// Register changed; false if write protection or a read
    pub stored: bool,
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Idle,
    Command,
    Write,
    Read,
}

#[derive(Debug)]
struct Chip {
    // indexed by (command & 0x7e) >> 1
    regs: [u8; 64],
    clk: bool,
    rst: bool,
    data_in: bool,
    direction: Direction,
    phase: Phase,
    shift: u8,
    bits: u8,
    command: u8,
    data_bits: u8,
    transfers: Vec<Transfer>,
    /// Reset toggled while clock was high
    glitches: usize,
}

const fn index(command: u8) -> usize {
    ((command & 0x7e) >> 1) as usize
}

impl Chip {
    fn new() -> Self {
        let mut regs = [0u8; 64];
        regs[index(Register::WriteProtect.write_addr())] = WRITE_PROTECT_ON;
        Self {
            regs,
            clk: false,
            rst: false,
            data_in: false,
            direction: Direction::Input,
            phase: Phase::Idle,
            shift: 0,
            bits: 0,
            command: 0,
            data_bits: 0,
            transfers: Vec::new(),
            glitches: 0,
        }
    }

    fn set_rst(&mut self, level: bool) {
        if self.clk && level != self.rst {
            self.glitches += 1;
        }
        if level && !self.rst {
            self.phase = Phase::Command;
            self.shift = 0;
            self.bits = 0;
            self.data_bits = 0;
        } else if !level && self.rst {
            let stored = matches!(self.phase, Phase::Write) && self.data_bits == 8 && self.commit();
            self.transfers.push(Transfer {
                command: self.command,
                data: self.shift,
                data_bits: self.data_bits,
                stored,
            });
            self.phase = Phase::Idle;
        }
        self.rst = level;
    }

    fn commit(&mut self) -> bool {
        let wp = self.regs[index(Register::WriteProtect.write_addr())] & WRITE_PROTECT_ON != 0;
        if wp && self.command != Register::WriteProtect.write_addr() {
            return false;
        }
        self.regs[index(self.command)] = self.shift;
        true
    }

    fn set_clk(&mut self, level: bool) {
        let rising = level && !self.clk;
        let falling = !level && self.clk;
        self.clk = level;

        match self.phase {
            Phase::Command if rising => {
                self.shift |= u8::from(self.data_in) << self.bits;
                self.bits += 1;
                if self.bits == 8 {
                    self.command = self.shift;
                    self.bits = 0;
                    self.shift = 0;
                    self.phase = if self.command & READ_BIT == 0 {
                        Phase::Write
                    } else {
                        // first data bit is driven after the falling edge of this pulse
                        self.shift = self.regs[index(self.command)];
                        Phase::Read
                    };
                }
            }
            Phase::Write if rising && self.data_bits < 8 => {
                self.shift |= u8::from(self.data_in) << self.data_bits;
                self.data_bits += 1;
            }
            Phase::Read if rising => self.data_bits += 1,
            Phase::Read if falling => self.bits = self.data_bits,
            _ => {}
        }
    }

    fn data_out(&self) -> bool {
        matches!(self.phase, Phase::Read) && self.bits < 8 && (self.shift >> self.bits) & 1 == 1
    }
}

#[derive(Debug, Clone, Copy)]
enum Line {
    Clock,
    Data,
    Reset,
}

/// Handle to one line of a [`Sim`]
#[derive(Debug)]
pub struct SimPin {
    chip: Rc<RefCell<Chip>>,
    line: Line,
}

impl SimPin {
    fn drive(&mut self, level: bool) {
        let mut chip = self.chip.borrow_mut();
        match self.line {
            Line::Clock => chip.set_clk(level),
            Line::Reset => chip.set_rst(level),
            Line::Data => {
                assert!(
                    chip.direction == Direction::Output,
                    "data driven while configured as input"
                );
                chip.data_in = level;
            }
        }
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.drive(true);
        Ok(())
    }
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let chip = self.chip.borrow();
        assert!(
            chip.direction == Direction::Input,
            "data sampled while configured as output"
        );
        Ok(chip.data_out())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl DataLine for SimPin {
    fn set_direction(&mut self, direction: Direction) -> Result<(), Infallible> {
        self.chip.borrow_mut().direction = direction;
        Ok(())
    }
}

/// Test-side view of the simulated chip
#[derive(Debug, Clone)]
pub struct Sim {
    chip: Rc<RefCell<Chip>>,
}

impl Sim {
    /// New chip with write protection set and all other registers zero, plus its clock, data
    /// and reset pins
    pub fn new() -> (Self, SimPin, SimPin, SimPin) {
        let chip = Rc::new(RefCell::new(Chip::new()));
        let pin = |line| SimPin {
            chip: Rc::clone(&chip),
            line,
        };
        let pins = (pin(Line::Clock), pin(Line::Data), pin(Line::Reset));
        (Self { chip: Rc::clone(&chip) }, pins.0, pins.1, pins.2)
    }

    /// Raw register content by write address
    pub fn register(&self, addr: u8) -> u8 {
        self.chip.borrow().regs[index(addr)]
    }

    /// Overwrite a register directly, bypassing the bus
    pub fn poke(&self, addr: u8, value: u8) {
        self.chip.borrow_mut().regs[index(addr)] = value;
    }

    /// Completed transactions since the last call
    pub fn take_transfers(&self) -> Vec<Transfer> {
        core::mem::take(&mut self.chip.borrow_mut().transfers)
    }

    /// Reset edges observed while clock was high
    pub fn glitches(&self) -> usize {
        self.chip.borrow().glitches
    }

    /// Whether clock and reset are both low
    pub fn idle(&self) -> bool {
        let chip = self.chip.borrow();
        !chip.clk && !chip.rst
    }
}
