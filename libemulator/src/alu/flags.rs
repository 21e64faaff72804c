use std::fmt::Display;

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ALUFlags: u8 {
        const CARRY    = 0b0001;
        const ZERO     = 0b0010;
        const NEGATIVE = 0b0100;
        const OVERFLOW = 0b1000;
    }
}

impl Display for ALUFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bit = |flag| u8::from(self.contains(flag));

        f.write_fmt(format_args!(
            "Z={} C={} N={} V={}",
            bit(Self::ZERO),
            bit(Self::CARRY),
            bit(Self::NEGATIVE),
            bit(Self::OVERFLOW),
        ))
    }
}
