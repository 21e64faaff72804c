//! Routing circuits. Select lines are given least-significant bit first.

use crate::{
    gates::{and, not, or},
    Bit,
};


pub fn mux_2to1(a: Bit, b: Bit, select: Bit) -> Bit {
    or(and(a, not(select)), and(b, select))
}

pub fn mux_4to1(inputs: [Bit; 4], select: [Bit; 2]) -> Bit {
    let low = mux_2to1(inputs[0], inputs[1], select[0]);
    let high = mux_2to1(inputs[2], inputs[3], select[0]);

    mux_2to1(low, high, select[1])
}

pub fn mux_8to1(inputs: [Bit; 8], select: [Bit; 3]) -> Bit {
    let [i0, i1, i2, i3, i4, i5, i6, i7] = inputs;

    let low = mux_4to1([i0, i1, i2, i3], [select[0], select[1]]);
    let high = mux_4to1([i4, i5, i6, i7], [select[0], select[1]]);

    mux_2to1(low, high, select[2])
}

pub fn demux_1to2(data: Bit, select: Bit) -> [Bit; 2] {
    [and(data, not(select)), and(data, select)]
}

pub fn demux_1to4(data: Bit, select: [Bit; 2]) -> [Bit; 4] {
    decoder_2to4(select).map(|line| and(data, line))
}

pub fn decoder_2to4(select: [Bit; 2]) -> [Bit; 4] {
    let [s0, s1] = select;
    let [n0, n1] = [not(s0), not(s1)];

    [and(n1, n0), and(n1, s0), and(s1, n0), and(s1, s0)]
}

pub fn decoder_3to8(select: [Bit; 3]) -> [Bit; 8] {
    let [s0, s1, s2] = select;
    let low = decoder_2to4([s0, s1]);

    std::array::from_fn(|i| {
        let half = if i < 4 { not(s2) } else { s2 };
        and(half, low[i % 4])
    })
}

/// Priority encoder, the highest active input wins. All-zero input encodes as 0.
pub fn encoder_4to2(inputs: [Bit; 4]) -> [Bit; 2] {
    let [_, i1, i2, i3] = inputs;

    [or(i3, and(i1, not(i2))), or(i2, i3)]
}

/// Priority encoder, the highest active input wins. All-zero input encodes as 0.
pub fn encoder_8to3(inputs: [Bit; 8]) -> [Bit; 3] {
    let [_, i1, i2, i3, i4, i5, i6, i7] = inputs;
    let any_upper = or(or(i4, i5), or(i6, i7));

    let out0 = or(
        or(i7, and(i5, not(i6))),
        and(not(any_upper), or(i3, and(i1, not(i2)))),
    );
    let out1 = or(or(i6, i7), and(not(any_upper), or(i2, i3)));

    [out0, out1, any_upper]
}
