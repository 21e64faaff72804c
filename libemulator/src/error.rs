use libisa::Address;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    #[error("Program of {len} bytes doesn't fit at {start:#04x} in {capacity} bytes of memory")]
    ProgramTooLarge {
        len: usize,
        start: Address,
        capacity: usize,
    },
}
