//! Machine code back to assembler source. Every listing line is valid input
//! for the assembler; addresses and raw words ride along in comments.

use std::{fmt::Display, iter::Peekable};

use libisa::{
    instruction::{Instruction, InstructionDeassemblyError},
    Address, Byte, Word,
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeassembledLine {
    /// One instruction slot.
    Word {
        address: Address,
        word: Word,
        instruction: Result<Instruction, InstructionDeassemblyError>,
    },
    /// A byte left over at the end of the code.
    Byte { address: Address, value: Byte },
}

impl DeassembledLine {
    pub fn address(&self) -> Address {
        match *self {
            Self::Word { address, .. } | Self::Byte { address, .. } => address,
        }
    }

    /// The instruction, if its source form assembles back to the same word.
    pub fn assemblable_instruction(&self) -> Option<Instruction> {
        match *self {
            Self::Word {
                word,
                instruction: Ok(instruction),
                ..
            } if assembles_to(&instruction, word) => Some(instruction),
            _ => None,
        }
    }
}

impl Display for DeassembledLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Word {
                address,
                word,
                instruction,
            } => match (self.assemblable_instruction(), instruction) {
                (Some(instruction), _) => f.write_fmt(format_args!(
                    "{:<16} ; {:#04x}: {:04x}",
                    instruction.to_string(),
                    address,
                    word
                )),
                (None, decoded) => {
                    let [low, high] = libisa::word_to_bytes(word);
                    let note = match decoded {
                        Ok(instruction) => format!("not encodable as `{}`", instruction),
                        Err(e) => e.to_string(),
                    };

                    f.write_fmt(format_args!(
                        ".byte {:#04x}       ; {:#04x}: {:04x} {}\n.byte {:#04x}",
                        low, address, word, note, high
                    ))
                }
            },
            Self::Byte { address, value } => {
                f.write_fmt(format_args!(".byte {:#04x}       ; {:#04x}", value, address))
            }
        }
    }
}

/// Whether the assembler reproduces `word` from the instruction's text:
/// registers must be `R0`-`R7`, unused fields zero.
fn assembles_to(instruction: &Instruction, word: Word) -> bool {
    let registers_fit = [instruction.rd(), instruction.rs1(), instruction.rs2()]
        .into_iter()
        .flatten()
        .all(|register| register < libisa::REGISTER_COUNT);
    let unary_clean = !instruction.kind().is_unary() || instruction.rs2() == Some(0);

    registers_fit && unary_clean && instruction.encode() == word
}

pub struct Deassembler<'a, I>
where
    I: Iterator<Item = &'a u8>,
{
    code_iter: Peekable<I>,
    start: Address,
    address: usize,
}

impl<'a, I> Deassembler<'a, I>
where
    I: Iterator<Item = &'a u8>,
{
    pub fn new(code_iter: I) -> Self {
        Self::starting_at(code_iter, 0)
    }

    pub fn starting_at(code_iter: I, address: Address) -> Self {
        Self {
            code_iter: code_iter.peekable(),
            start: address,
            address: address as usize,
        }
    }

    pub fn deassemble(mut self) -> Result<Vec<DeassembledLine>, String> {
        let mut output = Vec::new();

        while self.code_iter.peek().is_some() {
            output.push(self.deassemble_instruction()?);
        }

        Ok(output)
    }

    /// Listing text, one line per instruction, preceded by `.org` when the
    /// code doesn't start at 0. Code past the end of memory is cut off with
    /// a trailing comment.
    pub fn deassemble_text(mut self) -> String {
        let mut text = String::new();

        if self.start != 0 {
            text.push_str(&format!(".org {:#04x}\n", self.start));
        }

        while self.code_iter.peek().is_some() {
            match self.deassemble_instruction() {
                Ok(line) => text.push_str(&format!("{}\n", line)),
                Err(e) => {
                    text.push_str(&format!("; {}\n", e));
                    break;
                }
            }
        }

        text
    }

    pub fn deassemble_instruction(&mut self) -> Result<DeassembledLine, String> {
        if self.address > Address::MAX as usize {
            return Err("<past end of memory>".to_string());
        }

        let address = self.address as Address;
        let low_byte = *self
            .code_iter
            .next()
            .ok_or("<out of deassembler bounds>".to_string())?;

        let Some(high_byte) = self.code_iter.next() else {
            self.address += 1;
            return Ok(DeassembledLine::Byte {
                address,
                value: low_byte,
            });
        };
        self.address += libisa::BYTES_PER_WORD;

        let word = libisa::bytes_to_word([low_byte, *high_byte]);
        Ok(DeassembledLine::Word {
            address,
            word,
            instruction: Instruction::decode(word),
        })
    }
}
