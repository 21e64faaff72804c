use flags::ALUFlags;
use libisa::{instruction::kind::InstructionKind, Byte};
use liblogic::{
    adders::{add_overflow, ripple_carry_adder_8bit, sign_bit, subtractor_8bit},
    bits_to_byte, byte_to_bits, gates, Bit,
};

pub mod flags;


/// 4-bit ALU operation codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AluOp {
    #[default]
    Add = 0,
    Sub = 1,
    And = 2,
    Or = 3,
    Xor = 4,
    Not = 5,
    Shl = 6,
    Shr = 7,
    /// Subtracts for the flags only, the result is `a` unchanged.
    Cmp = 8,
}

impl AluOp {
    pub const ALL: [Self; 9] = [
        Self::Add,
        Self::Sub,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Not,
        Self::Shl,
        Self::Shr,
        Self::Cmp,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// The operation an ALU instruction drives, `None` for instructions that
    /// don't go through the ALU.
    pub fn for_instruction(kind: InstructionKind) -> Option<Self> {
        match kind {
            InstructionKind::Add => Some(Self::Add),
            InstructionKind::Sub => Some(Self::Sub),
            InstructionKind::And => Some(Self::And),
            InstructionKind::Or => Some(Self::Or),
            InstructionKind::Xor => Some(Self::Xor),
            InstructionKind::Not => Some(Self::Not),
            InstructionKind::Shl => Some(Self::Shl),
            InstructionKind::Shr => Some(Self::Shr),
            _ => None,
        }
    }
}

/// 8-bit ALU. `flags` holds the status of the last operation.
#[derive(Debug, Clone)]
pub struct ALU {
    pub flags: ALUFlags,
}

impl ALU {
    pub fn new() -> Self {
        Self {
            flags: ALUFlags::empty(),
        }
    }

    /// Stateless evaluation. Codes outside the defined operations pass `a`
    /// through with the flags of a logical operation.
    pub fn evaluate(a: Byte, b: Byte, code: u8) -> (Byte, ALUFlags) {
        let mut alu = Self::new();
        let value = alu.execute_code(a, b, code);

        (value, alu.flags)
    }

    pub fn execute_code(&mut self, a: Byte, b: Byte, code: u8) -> Byte {
        match AluOp::from_code(code) {
            Some(op) => self.execute(a, b, op),
            None => self.flags_by(a, false, false),
        }
    }

    pub fn execute(&mut self, a: Byte, b: Byte, op: AluOp) -> Byte {
        match op {
            AluOp::Add => self.add(a, b),
            AluOp::Sub => self.sub(a, b),
            AluOp::And => self.and(a, b),
            AluOp::Or => self.or(a, b),
            AluOp::Xor => self.xor(a, b),
            AluOp::Not => self.not(a),
            AluOp::Shl => self.shl(a),
            AluOp::Shr => self.shr(a),
            AluOp::Cmp => self.cmp(a, b),
        }
    }

    pub fn add(&mut self, a: Byte, b: Byte) -> Byte {
        let (value, carry) = ripple_carry_adder_8bit(a, b, false);
        let overflow = add_overflow(a, b, value);

        self.flags_by(value, carry, overflow)
    }

    /// Carry holds the borrow, set when `a < b` unsigned.
    pub fn sub(&mut self, a: Byte, b: Byte) -> Byte {
        let (value, borrow, overflow) = subtractor_8bit(a, b);
        self.flags_by(value, borrow, overflow)
    }

    pub fn and(&mut self, a: Byte, b: Byte) -> Byte {
        let value = bitwise(a, b, gates::and);
        self.flags_by(value, false, false)
    }

    pub fn or(&mut self, a: Byte, b: Byte) -> Byte {
        let value = bitwise(a, b, gates::or);
        self.flags_by(value, false, false)
    }

    pub fn xor(&mut self, a: Byte, b: Byte) -> Byte {
        let value = bitwise(a, b, gates::xor);
        self.flags_by(value, false, false)
    }

    pub fn not(&mut self, a: Byte) -> Byte {
        let value = bits_to_byte(byte_to_bits(a).map(gates::not));
        self.flags_by(value, false, false)
    }

    /// Carry receives the bit shifted out of bit 7.
    pub fn shl(&mut self, a: Byte) -> Byte {
        let carry = sign_bit(a);
        self.flags_by(a << 1, carry, false)
    }

    /// Carry receives the bit shifted out of bit 0.
    pub fn shr(&mut self, a: Byte) -> Byte {
        let carry = byte_to_bits(a)[0];
        self.flags_by(a >> 1, carry, false)
    }

    pub fn cmp(&mut self, a: Byte, b: Byte) -> Byte {
        self.sub(a, b);
        a
    }

    fn flags_by(&mut self, value: Byte, carry: Bit, overflow: Bit) -> Byte {
        self.flags = ALUFlags::empty();
        self.flags.set(ALUFlags::ZERO, value == 0);
        self.flags.set(ALUFlags::CARRY, carry);
        self.flags.set(ALUFlags::NEGATIVE, sign_bit(value));
        self.flags.set(ALUFlags::OVERFLOW, overflow);

        value
    }
}

impl Default for ALU {
    fn default() -> Self {
        Self::new()
    }
}

fn bitwise(a: Byte, b: Byte, gate: fn(Bit, Bit) -> Bit) -> Byte {
    let [a_bits, b_bits] = [a, b].map(byte_to_bits);
    bits_to_byte(std::array::from_fn(|i| gate(a_bits[i], b_bits[i])))
}
