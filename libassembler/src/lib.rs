//! Two-pass assembler: the first pass lays out addresses and records labels,
//! the second encodes instructions against the finished symbol table so
//! forward references resolve.

use std::collections::{BTreeMap, BTreeSet};

use bimap::BiMap;
use libisa::{
    instruction::{
        kind::{InstructionFormat, InstructionKind},
        Instruction,
    },
    Address, Byte, Register, Word,
};
use log::{debug, trace};
use parser::{Line, Statement};

pub mod error;
pub mod parser;

pub use error::AssemblyError;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembledInstruction {
    pub address: Address,
    pub word: Word,
    /// 1-based source line.
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AssemblyOutput {
    /// In source order.
    pub instructions: Vec<AssembledInstruction>,

    /// Bytes emitted by `.byte` directives.
    pub data: BTreeMap<Address, Byte>,

    pub symbols: BTreeMap<String, Address>,

    /// Instruction address (left) to source line (right) or vice versa.
    pub source_map: BiMap<Address, usize>,
}

impl AssemblyOutput {
    pub fn words(&self) -> impl Iterator<Item = Word> + '_ {
        self.instructions.iter().map(|instruction| instruction.word)
    }

    pub fn line_of(&self, address: Address) -> Option<usize> {
        self.source_map.get_by_left(&address).copied()
    }

    pub fn address_of_line(&self, line: usize) -> Option<Address> {
        self.source_map.get_by_right(&line).copied()
    }

    /// Flattens instructions and data into a memory image starting at
    /// address 0 and ending at the highest byte written. Data written by
    /// `.byte` wins over overlapping instructions.
    pub fn image(&self) -> Vec<Byte> {
        let instruction_bytes = self.instructions.iter().flat_map(|instruction| {
            libisa::word_to_bytes(instruction.word)
                .into_iter()
                .enumerate()
                .map(move |(offset, byte)| (instruction.address as usize + offset, byte))
        });
        let data_bytes = self
            .data
            .iter()
            .map(|(address, byte)| (*address as usize, *byte));

        let mut image = Vec::new();
        for (address, byte) in instruction_bytes.chain(data_bytes) {
            if image.len() <= address {
                image.resize(address + 1, 0);
            }
            image[address] = byte;
        }

        image
    }
}

struct PendingInstruction<'a> {
    address: Address,
    line: usize,
    kind: InstructionKind,
    operands: Vec<&'a str>,
}

pub fn assemble(source: &str) -> Result<AssemblyOutput, AssemblyError> {
    let lines = source
        .lines()
        .enumerate()
        .filter_map(|(index, text)| parser::parse_line(index + 1, text).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let mut output = AssemblyOutput::default();

    let (pending, past_end) = first_pass(lines, &mut output)?;
    debug!(
        "First pass: {} instruction(s), {} data byte(s), {} symbol(s)",
        pending.len(),
        output.data.len(),
        output.symbols.len()
    );

    second_pass(pending, &past_end, &mut output)?;
    debug!("Second pass: encoded {} instruction(s)", output.instructions.len());

    Ok(output)
}

fn first_pass<'a>(
    lines: Vec<Line<'a>>,
    output: &mut AssemblyOutput,
) -> Result<(Vec<PendingInstruction<'a>>, BTreeSet<&'a str>), AssemblyError> {
    let mut pending = Vec::new();
    let mut past_end: BTreeSet<&'a str> = BTreeSet::new();
    let mut cursor = 0usize;

    for line in lines {
        if let Some(label) = line.label {
            let previous = match output.symbols.get(label) {
                Some(address) => Some(*address as usize),
                None => past_end.contains(label).then_some(libisa::MEMORY_SIZE),
            };

            if let Some(previous) = previous {
                return Err(AssemblyError::DuplicateLabel {
                    line: line.number,
                    label: label.to_string(),
                    previous,
                });
            }

            // Only a reference to a label past the last byte is an error.
            if cursor >= libisa::MEMORY_SIZE {
                trace!("Label `{}` is past the end of memory", label);
                past_end.insert(label);
            } else {
                trace!("Label `{}` = {:#04x}", label, cursor);
                output.symbols.insert(label.to_string(), cursor as Address);
            }
        }

        let symbols = Symbols {
            placed: &output.symbols,
            past_end: &past_end,
        };

        match line.statement {
            None => {}

            Some(Statement::Origin(value)) => {
                cursor = symbols.resolve(line.number, value)? as usize;
            }

            Some(Statement::Byte(value)) => {
                let address = checked_address(line.number, cursor, 1)?;
                let value = symbols.resolve(line.number, value)?;

                output.data.insert(address, value);
                cursor += 1;
            }

            Some(Statement::Instruction { kind, operands }) => {
                let address = checked_address(line.number, cursor, libisa::BYTES_PER_WORD)?;

                pending.push(PendingInstruction {
                    address,
                    line: line.number,
                    kind,
                    operands,
                });
                cursor += libisa::BYTES_PER_WORD;
            }
        }
    }

    Ok((pending, past_end))
}

fn second_pass(
    pending: Vec<PendingInstruction>,
    past_end: &BTreeSet<&str>,
    output: &mut AssemblyOutput,
) -> Result<(), AssemblyError> {
    for instruction in pending {
        let symbols = Symbols {
            placed: &output.symbols,
            past_end,
        };
        let encoded = encode_instruction(&instruction, &symbols)?;
        let word = encoded.encode();

        output.source_map.insert(instruction.address, instruction.line);
        output.instructions.push(AssembledInstruction {
            address: instruction.address,
            word,
            line: instruction.line,
        });
    }

    Ok(())
}

fn encode_instruction(
    instruction: &PendingInstruction,
    symbols: &Symbols,
) -> Result<Instruction, AssemblyError> {
    let PendingInstruction {
        line,
        kind,
        operands,
        ..
    } = instruction;
    let (line, kind) = (*line, *kind);

    let expected = match kind.format() {
        InstructionFormat::Register if kind.is_unary() => 2,
        InstructionFormat::Register => 3,
        InstructionFormat::Memory => 2,
        InstructionFormat::Jump => 1,
        InstructionFormat::Bare => 0,
    };

    if operands.len() != expected {
        return Err(AssemblyError::OperandCount {
            line,
            kind,
            expected,
            found: operands.len(),
        });
    }

    let register = |index: usize| parse_register(line, operands[index]);
    let value = |index: usize| symbols.resolve(line, operands[index]);

    Ok(match kind.format() {
        InstructionFormat::Register => {
            let rs2 = if kind.is_unary() { 0 } else { register(2)? };
            Instruction::from_fields(kind, register(0)?, register(1)?, rs2)
        }
        InstructionFormat::Memory => {
            Instruction::from_fields(kind, register(0)?, 0, value(1)? as usize)
        }
        InstructionFormat::Jump => Instruction::from_fields(kind, 0, 0, value(0)? as usize),
        InstructionFormat::Bare => Instruction::from_fields(kind, 0, 0, 0),
    })
}

/// Accepts `R0` through `R7`, case-insensitive.
fn parse_register(line: usize, operand: &str) -> Result<Register, AssemblyError> {
    operand
        .strip_prefix(|c: char| c == 'R' || c == 'r')
        .filter(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .and_then(|digits| digits.parse::<Register>().ok())
        .filter(|index| *index < libisa::REGISTER_COUNT)
        .ok_or_else(|| AssemblyError::InvalidRegister {
            line,
            operand: operand.to_string(),
        })
}

/// Labels defined so far. Labels after the last byte of memory are kept
/// apart since no 8-bit address names them.
struct Symbols<'s, 'a> {
    placed: &'s BTreeMap<String, Address>,
    past_end: &'s BTreeSet<&'a str>,
}

impl Symbols<'_, '_> {
    /// Labels take precedence, then `0x` hex, then decimal.
    fn resolve(&self, line: usize, operand: &str) -> Result<Byte, AssemblyError> {
        if let Some(address) = self.placed.get(operand) {
            return Ok(*address);
        }

        if self.past_end.contains(operand) {
            return Err(AssemblyError::AddressOutOfRange {
                line,
                address: libisa::MEMORY_SIZE,
            });
        }

        let parsed = match operand
            .strip_prefix("0x")
            .or_else(|| operand.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => operand.parse::<u64>(),
        };

        match parsed {
            Ok(value) => Byte::try_from(value)
                .map_err(|_| AssemblyError::ValueOutOfRange { line, value }),

            Err(_) if parser::is_identifier(operand) => Err(AssemblyError::UndefinedLabel {
                line,
                label: operand.to_string(),
            }),

            Err(_) => Err(AssemblyError::InvalidValue {
                line,
                operand: operand.to_string(),
            }),
        }
    }
}

/// Checks that `len` bytes starting at `cursor` fit in memory.
fn checked_address(line: usize, cursor: usize, len: usize) -> Result<Address, AssemblyError> {
    if cursor + len > libisa::MEMORY_SIZE {
        return Err(AssemblyError::AddressOutOfRange {
            line,
            address: cursor,
        });
    }

    Ok(cursor as Address)
}
