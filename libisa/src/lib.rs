pub mod instruction;

pub type Word = u16;
pub type Byte = u8;
pub type Address = u8;

pub const BYTES_PER_WORD: usize = 2;

pub type Register = usize;
pub type Opcode = u8;

pub const REGISTER_COUNT: usize = 8;
pub const MEMORY_SIZE: usize = Address::MAX as usize + 1;

/// Instruction words are stored low byte first.
pub fn word_to_bytes(word: Word) -> [Byte; BYTES_PER_WORD] {
    [(word & 0x00FF) as u8, ((word & 0xFF00) >> 8) as u8]
}

pub fn bytes_to_word(bytes: [Byte; BYTES_PER_WORD]) -> Word {
    (bytes[1] as u16) << 8 | (bytes[0] as u16)
}
