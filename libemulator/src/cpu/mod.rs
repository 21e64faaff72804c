use std::fmt::Display;

use libisa::{
    instruction::{kind::InstructionKind, Instruction},
    Address, Byte, Register,
};
use log::{debug, trace, warn};

use crate::{
    alu::flags::ALUFlags, clock::Clock, control::ControlUnit, datapath::Datapath, memory::Memory,
    LoadError,
};

#[cfg(test)]
mod tests;

/// Snapshot of the architectural state outside registers and memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub pc: Address,
    pub flags: ALUFlags,
    pub halted: bool,
    pub cycle: usize,
}

impl Display for CpuState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "PC: {:#04x}  {}  cycle: {}{}",
            self.pc,
            self.flags,
            self.cycle,
            if self.halted { "  HALTED" } else { "" }
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cpu {
    pub datapath: Datapath,
    pub control: ControlUnit,
    pub halted: bool,
    /// Pulsed once per step that completes without halting.
    pub clock: Clock,
    pub current_instruction: Option<Instruction>,
    /// Address `current_instruction` was fetched from.
    pub current_address: Address,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory(memory: Memory) -> Self {
        Self {
            datapath: Datapath {
                memory,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Runs one fetch/decode/execute cycle. Returns false once the CPU is
    /// halted, including on the step that executes `HALT`.
    pub fn step(&mut self) -> bool {
        if self.halted {
            return false;
        }

        let pc = self.datapath.pc.read();
        let word = self.datapath.fetch_instruction();
        self.datapath.load_instruction(word);
        self.current_address = pc;
        trace!("Fetched {:#06x} at {:#04x}", word, pc);

        self.control.advance_phase();
        let instruction = Instruction::decode(word).unwrap_or_else(|e| {
            warn!("{} at {:#04x}, executing as NOP", e, pc);
            Instruction::Bare {
                kind: InstructionKind::Nop,
            }
        });
        self.current_instruction = Some(instruction);

        self.control.advance_phase();
        let signals = self
            .control
            .generate_signals(&instruction, self.datapath.flags());

        if instruction.kind() == InstructionKind::Halt {
            debug!("Halted at {:#04x} after {} cycles", pc, self.clock.cycle());
            self.halted = true;
            self.control.reset();
            return false;
        }

        self.datapath.execute_cycle(&signals, &instruction);

        self.control.advance_phase();
        if !signals.pc_load {
            for _ in 0..libisa::BYTES_PER_WORD {
                self.datapath.pc.increment();
            }
        }

        self.control.advance_phase();
        self.clock.pulse();
        debug!(
            "{:#04x}: {:<16} {}",
            pc,
            instruction.to_string(),
            self.datapath.flags()
        );

        true
    }

    /// Steps until halted or `max_cycles` steps have run. Returns the number
    /// of steps that completed without halting.
    pub fn run(&mut self, max_cycles: usize) -> usize {
        let mut executed = 0;

        while executed < max_cycles && self.step() {
            executed += 1;
        }

        if !self.halted {
            debug!("Cycle limit of {} reached without halting", max_cycles);
        }

        executed
    }

    /// Clears PC, halt state, phase and instruction register. Registers and
    /// memory keep their contents.
    pub fn reset(&mut self) {
        self.datapath.pc.reset();
        self.datapath.load_instruction(0);
        self.control.reset();
        self.halted = false;
        self.clock.reset();
        self.current_instruction = None;
        self.current_address = 0;
    }

    pub fn state(&self) -> CpuState {
        CpuState {
            pc: self.datapath.pc.read(),
            flags: self.datapath.flags(),
            halted: self.halted,
            cycle: self.clock.cycle(),
        }
    }

    pub fn pc(&self) -> Address {
        self.datapath.pc.read()
    }

    pub fn jump(&mut self, addr: Address) {
        self.datapath.pc.load(addr);
    }

    pub fn register(&self, index: Register) -> Byte {
        self.datapath.reg_file.read(index)
    }

    pub fn registers(&self) -> [Byte; libisa::REGISTER_COUNT] {
        self.datapath.reg_file.values()
    }

    pub fn memory(&self) -> &Memory {
        &self.datapath.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.datapath.memory
    }

    pub fn load_program(&mut self, program: &[Byte], start: Address) -> Result<(), LoadError> {
        self.datapath.memory.try_load_program(program, start)
    }
}
