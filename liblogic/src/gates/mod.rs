use crate::Bit;


pub fn not(a: Bit) -> Bit {
    !a
}

pub fn and(a: Bit, b: Bit) -> Bit {
    a && b
}

pub fn or(a: Bit, b: Bit) -> Bit {
    a || b
}

pub fn nand(a: Bit, b: Bit) -> Bit {
    not(and(a, b))
}

pub fn nor(a: Bit, b: Bit) -> Bit {
    not(or(a, b))
}

pub fn xor(a: Bit, b: Bit) -> Bit {
    or(and(a, not(b)), and(not(a), b))
}

pub fn xnor(a: Bit, b: Bit) -> Bit {
    not(xor(a, b))
}
