use std::{fmt::Display, str::FromStr};

use bimap::BiMap;
use lazy_static::lazy_static;

use crate::Opcode;

use super::ParseKindError;

lazy_static! {
    static ref KIND_OPCODE_BIMAP: BiMap<InstructionKind, Opcode> = BiMap::from_iter([
        (InstructionKind::Nop, 0),
        (InstructionKind::Load, 1),
        (InstructionKind::Store, 2),
        (InstructionKind::Mov, 3),
        (InstructionKind::Add, 4),
        (InstructionKind::Sub, 5),
        (InstructionKind::And, 6),
        (InstructionKind::Or, 7),
        (InstructionKind::Xor, 8),
        (InstructionKind::Not, 9),
        (InstructionKind::Shl, 10),
        (InstructionKind::Shr, 11),
        (InstructionKind::Jmp, 12),
        (InstructionKind::Jz, 13),
        (InstructionKind::Jnz, 14),
        (InstructionKind::Halt, 15),
    ]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Nop,

    Load,
    Store,
    Mov,

    Add,
    Sub,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,

    Jmp,
    Jz,
    Jnz,

    Halt,
}

/// How the 12 bits below the opcode are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionFormat {
    /// `rd[11:8] rs1[7:4] rs2[3:0]`
    Register,
    /// `rd[11:8] address[7:0]`
    Memory,
    /// `unused[11:8] target[7:0]`
    Jump,
    /// Opcode only.
    Bare,
}

impl InstructionKind {
    pub fn from_opcode(opcode: Opcode) -> Option<Self> {
        KIND_OPCODE_BIMAP.get_by_right(&opcode).copied()
    }

    pub fn opcode(&self) -> Opcode {
        *KIND_OPCODE_BIMAP
            .get_by_left(self)
            .expect("No opcode mapping for instruction kind")
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..=Opcode::MAX).filter_map(Self::from_opcode)
    }

    pub fn format(&self) -> InstructionFormat {
        match self {
            Self::Load | Self::Store => InstructionFormat::Memory,
            Self::Jmp | Self::Jz | Self::Jnz => InstructionFormat::Jump,
            Self::Nop | Self::Halt => InstructionFormat::Bare,
            _ => InstructionFormat::Register,
        }
    }

    /// Register-format instructions that only read `rs1`.
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Mov | Self::Not | Self::Shl | Self::Shr)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Mov => "MOV",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Jmp => "JMP",
            Self::Jz => "JZ",
            Self::Jnz => "JNZ",
            Self::Halt => "HALT",
        }
    }
}

impl Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for InstructionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KIND_OPCODE_BIMAP
            .left_values()
            .find(|kind| kind.mnemonic().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseKindError(s.to_string()))
    }
}
