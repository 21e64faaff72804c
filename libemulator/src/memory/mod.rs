use libisa::{Address, Byte, Word};

use crate::LoadError;


/// Byte-addressed RAM. Accesses outside the backing store read as zero and
/// writes there are dropped.
#[derive(Debug, Clone)]
pub struct Memory(Vec<Byte>);

impl Memory {
    pub fn new() -> Self {
        Self::with_size(libisa::MEMORY_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Self(vec![0; size])
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn byte(&self, addr: usize) -> Option<Byte> {
        self.0.get(addr).copied()
    }

    pub fn byte_mut(&mut self, addr: usize) -> Option<&mut Byte> {
        self.0.get_mut(addr)
    }

    pub fn read(&self, addr: Address) -> Byte {
        self.byte(addr as usize).unwrap_or(0)
    }

    pub fn write(&mut self, addr: Address, value: Byte, enable: bool) {
        if !enable {
            return;
        }

        if let Some(byte) = self.byte_mut(addr as usize) {
            *byte = value;
        }
    }

    /// Little-endian word at `addr`; the high byte wraps to address 0.
    pub fn word(&self, addr: Address) -> Word {
        libisa::bytes_to_word([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Copies `program` to consecutive addresses from `start`. Bytes that
    /// would land past the end of memory are dropped.
    pub fn load_program(&mut self, program: &[Byte], start: Address) {
        let start = start as usize;

        for (addr, byte) in (start..self.size()).zip(program) {
            self.0[addr] = *byte;
        }
    }

    pub fn try_load_program(&mut self, program: &[Byte], start: Address) -> Result<(), LoadError> {
        if start as usize + program.len() > self.size() {
            return Err(LoadError::ProgramTooLarge {
                len: program.len(),
                start,
                capacity: self.size(),
            });
        }

        self.load_program(program, start);
        Ok(())
    }

    /// `AA: VV` lines for `start..end`, clamped to the memory size.
    pub fn dump(&self, start: usize, end: usize) -> String {
        (start..end.min(self.size()))
            .map(|addr| format!("{:02X}: {:02X}", addr, self.0[addr]))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Byte> {
        self.0.iter()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
