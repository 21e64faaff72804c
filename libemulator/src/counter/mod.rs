use libisa::{Address, Byte};
use liblogic::adders::ripple_carry_adder_8bit;

use crate::regfile::Register8;


/// `addr + 1` through the ripple-carry adder, wrapping 0xFF to 0x00.
pub fn next_address(addr: Address) -> Address {
    ripple_carry_adder_8bit(addr, 0, true).0
}

/// 8-bit up counter held in a D flip-flop register.
#[derive(Debug, Clone, Default)]
pub struct BinaryCounter8 {
    register: Register8,
}

impl BinaryCounter8 {
    pub fn new() -> Self {
        Self::default()
    }

    /// One clock tick. Reset wins over enable.
    pub fn clock(&mut self, enable: bool, reset: bool) -> Byte {
        if reset {
            self.register.load(0);
        } else if enable {
            self.register.load(next_address(self.read()));
        }

        self.read()
    }

    pub fn load(&mut self, value: Byte) {
        self.register.load(value);
    }

    pub fn read(&self) -> Byte {
        self.register.read()
    }
}

/// Counter with parallel load, addressing the next instruction byte.
#[derive(Debug, Clone, Default)]
pub struct ProgramCounter(BinaryCounter8);

impl ProgramCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority is reset, then load, then increment.
    pub fn clock(&mut self, load: bool, value: Address, increment: bool, reset: bool) -> Address {
        if reset {
            self.reset();
        } else if load {
            self.load(value);
        } else if increment {
            self.increment();
        }

        self.read()
    }

    pub fn increment(&mut self) {
        self.0.clock(true, false);
    }

    pub fn load(&mut self, addr: Address) {
        self.0.load(addr);
    }

    pub fn reset(&mut self) {
        self.0.clock(false, true);
    }

    pub fn read(&self) -> Address {
        self.0.read()
    }
}
