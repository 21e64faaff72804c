//! Gate-level model of an 8-bit CPU: register file, RAM, program counter,
//! ALU, control unit and the datapath tying them together, plus a
//! [`Computer`](computer::Computer) that loads assembly source and runs it.

pub mod alu;
pub mod clock;
pub mod computer;
pub mod control;
pub mod counter;
pub mod cpu;
pub mod datapath;
pub mod error;
pub mod memory;
pub mod regfile;

pub use error::LoadError;

/// Step budget used when the caller doesn't pick one.
pub const DEFAULT_MAX_CYCLES: usize = 1000;
