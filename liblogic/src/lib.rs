//! Single-bit logic building blocks the simulated machine is composed of.
//!
//! Bits are `bool`, bytes are `u8` and are viewed least-significant bit first.

pub mod adders;
pub mod combinational;
pub mod gates;
pub mod sequential;

pub type Bit = bool;
pub type Byte = u8;

pub const BITS_PER_BYTE: usize = 8;

/// Splits a byte into its bits, index 0 holding the least significant one.
pub fn byte_to_bits(byte: Byte) -> [Bit; BITS_PER_BYTE] {
    std::array::from_fn(|i| (byte >> i) & 1 == 1)
}

pub fn bits_to_byte(bits: [Bit; BITS_PER_BYTE]) -> Byte {
    bits.iter()
        .enumerate()
        .fold(0, |byte, (i, bit)| byte | ((*bit as Byte) << i))
}
