use std::fmt::Display;

use libisa::instruction::{kind::InstructionKind, Instruction};

use crate::alu::{flags::ALUFlags, AluOp};

#[cfg(test)]
mod tests;

/// Lines driven by the control unit for one instruction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlSignals {
    pub pc_load: bool,
    pub pc_inc: bool,
    pub mem_read: bool,
    pub mem_write: bool,
    pub reg_write: bool,
    pub mem_to_reg: bool,
    pub alu_op: AluOp,
}

impl ControlSignals {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Fetch,
    Decode,
    Execute,
    Writeback,
}

impl Phase {
    pub fn next(self) -> Self {
        match self {
            Self::Fetch => Self::Decode,
            Self::Decode => Self::Execute,
            Self::Execute => Self::Writeback,
            Self::Writeback => Self::Fetch,
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fetch => "FETCH",
            Self::Decode => "DECODE",
            Self::Execute => "EXECUTE",
            Self::Writeback => "WRITEBACK",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControlUnit {
    pub phase: Phase,
    pub signals: ControlSignals,
}

impl ControlUnit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the signal set for `instruction` from scratch. Branches read
    /// the zero flag from `flags`.
    pub fn generate_signals(&mut self, instruction: &Instruction, flags: ALUFlags) -> ControlSignals {
        self.signals.reset();

        let zero = flags.contains(ALUFlags::ZERO);
        let kind = instruction.kind();

        if let Some(op) = AluOp::for_instruction(kind) {
            self.signals.alu_op = op;
            self.signals.reg_write = true;
        }

        match kind {
            InstructionKind::Load => {
                self.signals.mem_read = true;
                self.signals.mem_to_reg = true;
                self.signals.reg_write = true;
            }
            InstructionKind::Store => self.signals.mem_write = true,
            InstructionKind::Mov => self.signals.reg_write = true,
            InstructionKind::Jmp => self.signals.pc_load = true,
            InstructionKind::Jz => self.signals.pc_load = zero,
            InstructionKind::Jnz => self.signals.pc_load = !zero,
            _ => {}
        }

        self.signals
    }

    pub fn advance_phase(&mut self) -> Phase {
        self.phase = self.phase.next();
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = Phase::default();
        self.signals.reset();
    }
}
