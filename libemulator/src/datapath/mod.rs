use libisa::{
    instruction::{kind::InstructionKind, Instruction},
    Word,
};

use crate::{
    alu::{flags::ALUFlags, ALU},
    control::ControlSignals,
    counter::{next_address, ProgramCounter},
    memory::Memory,
    regfile::RegFile,
};

#[cfg(test)]
mod tests;

/// Wiring between the program counter, memory, register file and ALU.
#[derive(Debug, Clone, Default)]
pub struct Datapath {
    pub pc: ProgramCounter,
    pub memory: Memory,
    pub reg_file: RegFile,
    pub alu: ALU,
    /// Instruction register.
    pub ir: Word,
}

impl Datapath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the little-endian word at PC. The high byte's address is
    /// `PC + 1` through the ripple-carry adder, so 0xFF pairs with 0x00.
    pub fn fetch_instruction(&self) -> Word {
        let pc = self.pc.read();
        libisa::bytes_to_word([self.memory.read(pc), self.memory.read(next_address(pc))])
    }

    pub fn load_instruction(&mut self, word: Word) {
        self.ir = word;
    }

    /// Moves data for one instruction. The PC is incremented at most once
    /// here; stepping past a whole instruction is up to the caller.
    pub fn execute_cycle(&mut self, signals: &ControlSignals, instruction: &Instruction) {
        let rd = instruction.rd().unwrap_or(0);
        let address = instruction.address().unwrap_or(0);

        if signals.mem_read && signals.mem_to_reg {
            let value = self.memory.read(address);
            self.reg_file.write(rd, value, true);
        } else if signals.mem_write {
            self.memory.write(address, self.reg_file.read(rd), true);
        } else if signals.reg_write && !signals.mem_to_reg {
            let (a, b) = self.reg_file.read_two(
                instruction.rs1().unwrap_or(0),
                instruction.rs2().unwrap_or(0),
            );

            let value = match instruction.kind() {
                InstructionKind::Mov => a,
                _ => self.alu.execute(a, b, signals.alu_op),
            };
            self.reg_file.write(rd, value, true);
        }

        if signals.pc_load {
            self.pc.load(address);
        } else if signals.pc_inc {
            self.pc.increment();
        }
    }

    pub fn flags(&self) -> ALUFlags {
        self.alu.flags
    }
}
