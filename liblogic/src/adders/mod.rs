use crate::{
    bits_to_byte, byte_to_bits,
    gates::{and, not, or, xor},
    Bit, Byte,
};


/// Returns `(sum, carry)`.
pub fn half_adder(a: Bit, b: Bit) -> (Bit, Bit) {
    (xor(a, b), and(a, b))
}

/// Returns `(sum, carry_out)`.
pub fn full_adder(a: Bit, b: Bit, carry_in: Bit) -> (Bit, Bit) {
    let (partial_sum, first_carry) = half_adder(a, b);
    let (sum, second_carry) = half_adder(partial_sum, carry_in);

    (sum, or(first_carry, second_carry))
}

/// Adds two bytes bit by bit, carry rippling from bit 0 up to bit 7.
/// Returns `(sum, carry_out)`.
pub fn ripple_carry_adder_8bit(a: Byte, b: Byte, carry_in: Bit) -> (Byte, Bit) {
    let a_bits = byte_to_bits(a);
    let b_bits = byte_to_bits(b);

    let mut sum_bits = [false; crate::BITS_PER_BYTE];
    let mut carry = carry_in;

    for (i, sum_bit) in sum_bits.iter_mut().enumerate() {
        (*sum_bit, carry) = full_adder(a_bits[i], b_bits[i], carry);
    }

    (bits_to_byte(sum_bits), carry)
}

/// Computes `a - b` as `a + !b + 1`. Returns `(difference, borrow, overflow)`
/// where borrow is set iff `a < b` unsigned and overflow is the signed
/// overflow of the subtraction.
pub fn subtractor_8bit(a: Byte, b: Byte) -> (Byte, Bit, Bit) {
    let (difference, carry) = ripple_carry_adder_8bit(a, invert(b), true);
    let borrow = not(carry);

    let [sign_a, sign_b, sign_difference] = [a, b, difference].map(sign_bit);
    let overflow = and(xor(sign_a, sign_b), xor(sign_a, sign_difference));

    (difference, borrow, overflow)
}

pub fn twos_complement(value: Byte) -> Byte {
    ripple_carry_adder_8bit(invert(value), 1, false).0
}

/// Signed overflow of `a + b` given its (truncated) sum.
pub fn add_overflow(a: Byte, b: Byte, sum: Byte) -> Bit {
    let [sign_a, sign_b, sign_sum] = [a, b, sum].map(sign_bit);
    and(not(xor(sign_a, sign_b)), xor(sign_a, sign_sum))
}

pub fn sign_bit(value: Byte) -> Bit {
    byte_to_bits(value)[crate::BITS_PER_BYTE - 1]
}

fn invert(value: Byte) -> Byte {
    bits_to_byte(byte_to_bits(value).map(not))
}
