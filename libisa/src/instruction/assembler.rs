use super::Instruction;

/// Lays instructions out back to back from address 0, each as two
/// little-endian bytes.
pub fn assemble<I>(instructions: I) -> Vec<u8>
where
    I: IntoIterator<Item = Instruction>,
{
    assemble_words(instructions.into_iter().map(|instruction| instruction.encode()))
}

pub fn assemble_words<I>(words: I) -> Vec<u8>
where
    I: IntoIterator<Item = crate::Word>,
{
    words.into_iter().flat_map(crate::word_to_bytes).collect()
}
