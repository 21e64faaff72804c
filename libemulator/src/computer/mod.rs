use std::fmt::Display;

use anyhow::Context;
use libassembler::AssemblyOutput;
use libisa::{Address, Byte, Word};

use crate::{
    cpu::{Cpu, CpuState},
    LoadError,
};


/// Default range shown by [`Computer::dump_memory`].
pub const DEFAULT_DUMP_END: usize = 32;

/// CPU plus the assembler front end.
#[derive(Debug, Clone, Default)]
pub struct Computer {
    pub cpu: Cpu,
    /// Output of the last successful [`Computer::load_program`].
    pub assembly: Option<AssemblyOutput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputerState {
    pub cpu: CpuState,
    pub registers: [Byte; libisa::REGISTER_COUNT],
    pub memory: Vec<Byte>,
}

impl Display for ComputerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.cpu)?;

        for (index, value) in self.registers.iter().enumerate() {
            writeln!(f, "{}", register_line(index, *value))?;
        }

        for (row, chunk) in self.memory.chunks(16).enumerate() {
            let bytes = chunk
                .iter()
                .map(|byte| format!("{:02X}", byte))
                .collect::<Vec<_>>()
                .join(" ");

            writeln!(f, "{:02X}: {}", row * 16, bytes)?;
        }

        Ok(())
    }
}

impl Computer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles `source` and writes every instruction word at its address,
    /// then the `.byte` data. Memory outside the program is left as is.
    pub fn load_program(&mut self, source: &str) -> anyhow::Result<()> {
        let output = libassembler::assemble(source).context("Failed to assemble program")?;

        let memory = self.cpu.memory_mut();
        for instruction in &output.instructions {
            let [low, high] = libisa::word_to_bytes(instruction.word);

            memory.write(instruction.address, low, true);
            memory.write(instruction.address.wrapping_add(1), high, true);
        }

        for (address, byte) in &output.data {
            memory.write(*address, *byte, true);
        }

        self.assembly = Some(output);
        Ok(())
    }

    /// Writes `words` back to back from `start`, low byte first.
    pub fn load_machine_code(&mut self, words: &[Word], start: Address) -> Result<(), LoadError> {
        let bytes = libisa::instruction::assembler::assemble_words(words.iter().copied());
        self.cpu.load_program(&bytes, start)
    }

    pub fn run(&mut self, max_cycles: usize) -> CpuState {
        self.cpu.run(max_cycles);
        self.cpu.state()
    }

    /// Like [`Computer::run`], calling `observe` after every completed step.
    pub fn run_with<F>(&mut self, max_cycles: usize, mut observe: F) -> CpuState
    where
        F: FnMut(&Cpu),
    {
        let mut executed = 0;

        while executed < max_cycles && self.cpu.step() {
            executed += 1;
            observe(&self.cpu);
        }

        self.cpu.state()
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Source line of the instruction at `address` in the loaded program.
    pub fn source_line(&self, address: Address) -> Option<usize> {
        self.assembly.as_ref()?.line_of(address)
    }

    pub fn dump_state(&self) -> ComputerState {
        ComputerState {
            cpu: self.cpu.state(),
            registers: self.cpu.registers(),
            memory: self.cpu.memory().iter().copied().collect(),
        }
    }

    /// One `R<n>: ddd (0xHH)` line per register.
    pub fn dump_registers(&self) -> String {
        self.cpu
            .registers()
            .iter()
            .enumerate()
            .map(|(index, value)| register_line(index, *value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn dump_memory(&self, start: usize, end: usize) -> String {
        self.cpu.memory().dump(start, end)
    }
}

fn register_line(index: usize, value: Byte) -> String {
    format!("R{}: {:3} (0x{:02X})", index, value, value)
}
