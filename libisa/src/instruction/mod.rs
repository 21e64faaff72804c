use std::fmt::Display;

use kind::{InstructionFormat, InstructionKind};
use thiserror::Error;

use crate::{Address, Opcode, Register, Word};

pub mod assembler;
pub mod kind;


const OPCODE_SHIFT: u32 = 12;
const RD_SHIFT: u32 = 8;
const RS1_SHIFT: u32 = 4;

const OPCODE_MASK: Word = 0xF;
const REGISTER_FIELD_MASK: Word = 0xF;
const ADDRESS_FIELD_MASK: Word = 0xFF;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InstructionDeassemblyError {
    #[error("Unrecognized opcode {0:#06b}")]
    UnrecognizedOpcode(Opcode),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown mnemonic `{0}`")]
pub struct ParseKindError(pub String);

/// A decoded instruction. Each format carries only the fields it encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    Register {
        kind: InstructionKind,
        rd: Register,
        rs1: Register,
        rs2: Register,
    },
    Memory {
        kind: InstructionKind,
        rd: Register,
        address: Address,
    },
    Jump {
        kind: InstructionKind,
        target: Address,
    },
    Bare {
        kind: InstructionKind,
    },
}

impl Instruction {
    /// Builds an instruction from loose fields, keeping only the ones the
    /// kind's format uses. Register fields are masked to 4 bits and the
    /// address field to 8 bits.
    pub fn from_fields(
        kind: InstructionKind,
        rd: Register,
        rs1: Register,
        rs2_or_address: usize,
    ) -> Self {
        let register = |value: usize| value & REGISTER_FIELD_MASK as usize;
        let address = (rs2_or_address & ADDRESS_FIELD_MASK as usize) as Address;

        match kind.format() {
            InstructionFormat::Register => Self::Register {
                kind,
                rd: register(rd),
                rs1: register(rs1),
                rs2: register(rs2_or_address),
            },
            InstructionFormat::Memory => Self::Memory {
                kind,
                rd: register(rd),
                address,
            },
            InstructionFormat::Jump => Self::Jump {
                kind,
                target: address,
            },
            InstructionFormat::Bare => Self::Bare { kind },
        }
    }

    pub fn kind(&self) -> InstructionKind {
        match *self {
            Self::Register { kind, .. }
            | Self::Memory { kind, .. }
            | Self::Jump { kind, .. }
            | Self::Bare { kind } => kind,
        }
    }

    pub fn opcode(&self) -> Opcode {
        self.kind().opcode()
    }

    pub fn format(&self) -> InstructionFormat {
        self.kind().format()
    }

    pub fn rd(&self) -> Option<Register> {
        match *self {
            Self::Register { rd, .. } | Self::Memory { rd, .. } => Some(rd),
            _ => None,
        }
    }

    pub fn rs1(&self) -> Option<Register> {
        match *self {
            Self::Register { rs1, .. } => Some(rs1),
            _ => None,
        }
    }

    pub fn rs2(&self) -> Option<Register> {
        match *self {
            Self::Register { rs2, .. } => Some(rs2),
            _ => None,
        }
    }

    /// Memory address of I-type instructions or jump target of J-type ones.
    pub fn address(&self) -> Option<Address> {
        match *self {
            Self::Memory { address, .. } => Some(address),
            Self::Jump { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn encode(&self) -> Word {
        let opcode = (self.opcode() as Word & OPCODE_MASK) << OPCODE_SHIFT;
        let register = |index: Register, shift: u32| {
            ((index as Word) & REGISTER_FIELD_MASK) << shift
        };

        opcode
            | match *self {
                Self::Register { rd, rs1, rs2, .. } => {
                    register(rd, RD_SHIFT) | register(rs1, RS1_SHIFT) | register(rs2, 0)
                }
                Self::Memory { rd, address, .. } => register(rd, RD_SHIFT) | address as Word,
                Self::Jump { target, .. } => target as Word,
                Self::Bare { .. } => 0,
            }
    }

    /// Splits the low 12 bits according to the opcode's format: two 4-bit
    /// register fields for R-type, a full 8-bit address for I- and J-type.
    pub fn decode(word: Word) -> Result<Self, InstructionDeassemblyError> {
        let opcode = ((word >> OPCODE_SHIFT) & OPCODE_MASK) as Opcode;
        let kind = InstructionKind::from_opcode(opcode)
            .ok_or(InstructionDeassemblyError::UnrecognizedOpcode(opcode))?;

        let rd = ((word >> RD_SHIFT) & REGISTER_FIELD_MASK) as Register;
        let address = (word & ADDRESS_FIELD_MASK) as Address;

        Ok(match kind.format() {
            InstructionFormat::Register => Self::Register {
                kind,
                rd,
                rs1: ((word >> RS1_SHIFT) & REGISTER_FIELD_MASK) as Register,
                rs2: (word & REGISTER_FIELD_MASK) as Register,
            },
            InstructionFormat::Memory => Self::Memory { kind, rd, address },
            InstructionFormat::Jump => Self::Jump {
                kind,
                target: address,
            },
            InstructionFormat::Bare => Self::Bare { kind },
        })
    }
}

/// Packs loose fields into an instruction word, zero-filling unused bits.
pub fn encode(kind: InstructionKind, rd: Register, rs1: Register, rs2_or_address: usize) -> Word {
    Instruction::from_fields(kind, rd, rs1, rs2_or_address).encode()
}

/// Like [`encode`], but by mnemonic. Unknown mnemonics encode as `NOP`.
pub fn encode_mnemonic(mnemonic: &str, rd: Register, rs1: Register, rs2_or_address: usize) -> Word {
    let kind = mnemonic.trim().parse().unwrap_or(InstructionKind::Nop);
    encode(kind, rd, rs1, rs2_or_address)
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.kind()))?;

        match *self {
            Self::Register { kind, rd, rs1, rs2 } => {
                f.write_fmt(format_args!(" R{}, R{}", rd, rs1))?;

                if !kind.is_unary() {
                    f.write_fmt(format_args!(", R{}", rs2))?;
                }
            }
            Self::Memory { rd, address, .. } => {
                f.write_fmt(format_args!(" R{}, {:#04x}", rd, address))?
            }
            Self::Jump { target, .. } => f.write_fmt(format_args!(" {:#04x}", target))?,
            Self::Bare { .. } => {}
        }

        Ok(())
    }
}
