use libisa::instruction::kind::InstructionKind;
use thiserror::Error;

/// Every variant carries the 1-based source line it was raised on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("line {line}: unknown mnemonic `{mnemonic}`")]
    UnknownMnemonic { line: usize, mnemonic: String },

    #[error("line {line}: {kind} expects {expected} operand(s), found {found}")]
    OperandCount {
        line: usize,
        kind: InstructionKind,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid register `{operand}`")]
    InvalidRegister { line: usize, operand: String },

    #[error("line {line}: invalid value `{operand}`")]
    InvalidValue { line: usize, operand: String },

    #[error("line {line}: undefined label `{label}`")]
    UndefinedLabel { line: usize, label: String },

    #[error("line {line}: label `{label}` already defined at {previous:#04x}")]
    DuplicateLabel {
        line: usize,
        label: String,
        previous: usize,
    },

    #[error("line {line}: invalid label name `{label}`")]
    InvalidLabel { line: usize, label: String },

    #[error("line {line}: unknown directive `{directive}`")]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: directive `{directive}` needs a value")]
    MissingDirectiveValue { line: usize, directive: String },

    #[error("line {line}: value {value} does not fit in 8 bits")]
    ValueOutOfRange { line: usize, value: u64 },

    #[error("line {line}: address {address:#x} is outside memory")]
    AddressOutOfRange { line: usize, address: usize },
}

impl AssemblyError {
    pub fn line(&self) -> usize {
        match *self {
            Self::UnknownMnemonic { line, .. }
            | Self::OperandCount { line, .. }
            | Self::InvalidRegister { line, .. }
            | Self::InvalidValue { line, .. }
            | Self::UndefinedLabel { line, .. }
            | Self::DuplicateLabel { line, .. }
            | Self::InvalidLabel { line, .. }
            | Self::UnknownDirective { line, .. }
            | Self::MissingDirectiveValue { line, .. }
            | Self::ValueOutOfRange { line, .. }
            | Self::AddressOutOfRange { line, .. } => line,
        }
    }
}
