use std::array;

use libisa::{Byte, Register};
use liblogic::{bits_to_byte, byte_to_bits, combinational::decoder_3to8, sequential::DFlipFlop};

#[cfg(test)]
mod tests;

/// Eight D flip-flops sharing one clock and enable.
#[derive(Debug, Clone, Default)]
pub struct Register8([DFlipFlop; liblogic::BITS_PER_BYTE]);

impl Register8 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&mut self, data: Byte, enable: bool, clock: bool) -> Byte {
        if enable {
            for (flip_flop, bit) in self.0.iter_mut().zip(byte_to_bits(data)) {
                flip_flop.clock(bit, clock);
            }
        }

        self.read()
    }

    /// Pulses the clock low then high so the value is captured on a rising edge.
    pub fn load(&mut self, data: Byte) {
        self.clock(data, true, false);
        self.clock(data, true, true);
    }

    pub fn read(&self) -> Byte {
        bits_to_byte(self.0.map(|flip_flop| flip_flop.read()))
    }
}

#[derive(Debug, Clone)]
pub struct RegFile([Register8; libisa::REGISTER_COUNT]);

impl RegFile {
    pub fn new() -> Self {
        Self(array::from_fn(|_| Register8::new()))
    }

    /// Out of range indices read as zero.
    pub fn read(&self, index: Register) -> Byte {
        self.0.get(index).map_or(0, Register8::read)
    }

    pub fn read_two(&self, first: Register, second: Register) -> (Byte, Byte) {
        (self.read(first), self.read(second))
    }

    /// No-op unless enabled. Writes to out of range indices are dropped.
    pub fn write(&mut self, index: Register, value: Byte, enable: bool) {
        if !enable || index >= libisa::REGISTER_COUNT {
            return;
        }

        let select = byte_to_bits(index as Byte);
        let write_lines = decoder_3to8([select[0], select[1], select[2]]);

        for (register, selected) in self.0.iter_mut().zip(write_lines) {
            if selected {
                register.load(value);
            }
        }
    }

    pub fn values(&self) -> [Byte; libisa::REGISTER_COUNT] {
        array::from_fn(|index| self.read(index))
    }
}

impl Default for RegFile {
    fn default() -> Self {
        Self::new()
    }
}
