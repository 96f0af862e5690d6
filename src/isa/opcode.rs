//! Opcode enumeration and per-opcode classification.
//!
//! Every instruction is 16 bits with the opcode in the top 4 bits, so all
//! sixteen 4-bit values name a valid opcode and decoding is total.

/// The canonical encoding of `NOP`: opcode `1111` over twelve zero bits.
pub const NOP_WORD: u16 = 0xF000;

/// Encoding shape of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// `opcode | rs | rt | rd | 000`: register arithmetic.
    Register,
    /// `opcode | rs | rt | imm6`: immediates, memory, branches.
    Immediate,
    /// `opcode | addr12`: absolute jumps.
    Jump,
    /// `JR` and `NOP`.
    Special,
}

/// The sixteen opcodes, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Opcode {
    Add,
    Sub,
    And,
    Or,
    Slt,
    Addi,
    Andi,
    Ori,
    Lw,
    Sw,
    Beq,
    Bne,
    J,
    Jal,
    Jr,
    #[default]
    Nop,
}

impl Opcode {
    /// Decodes the top nibble of an instruction word.
    pub fn from_bits(bits: u16) -> Self {
        match bits & 0xF {
            0b0000 => Opcode::Add,
            0b0001 => Opcode::Sub,
            0b0010 => Opcode::And,
            0b0011 => Opcode::Or,
            0b0100 => Opcode::Slt,
            0b0101 => Opcode::Addi,
            0b0110 => Opcode::Andi,
            0b0111 => Opcode::Ori,
            0b1000 => Opcode::Lw,
            0b1001 => Opcode::Sw,
            0b1010 => Opcode::Beq,
            0b1011 => Opcode::Bne,
            0b1100 => Opcode::J,
            0b1101 => Opcode::Jal,
            0b1110 => Opcode::Jr,
            _ => Opcode::Nop,
        }
    }

    /// Returns the 4-bit encoding of this opcode.
    pub fn bits(self) -> u16 {
        match self {
            Opcode::Add => 0b0000,
            Opcode::Sub => 0b0001,
            Opcode::And => 0b0010,
            Opcode::Or => 0b0011,
            Opcode::Slt => 0b0100,
            Opcode::Addi => 0b0101,
            Opcode::Andi => 0b0110,
            Opcode::Ori => 0b0111,
            Opcode::Lw => 0b1000,
            Opcode::Sw => 0b1001,
            Opcode::Beq => 0b1010,
            Opcode::Bne => 0b1011,
            Opcode::J => 0b1100,
            Opcode::Jal => 0b1101,
            Opcode::Jr => 0b1110,
            Opcode::Nop => 0b1111,
        }
    }

    /// Returns the canonical upper-case mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Slt => "SLT",
            Opcode::Addi => "ADDI",
            Opcode::Andi => "ANDI",
            Opcode::Ori => "ORI",
            Opcode::Lw => "LW",
            Opcode::Sw => "SW",
            Opcode::Beq => "BEQ",
            Opcode::Bne => "BNE",
            Opcode::J => "J",
            Opcode::Jal => "JAL",
            Opcode::Jr => "JR",
            Opcode::Nop => "NOP",
        }
    }

    /// Looks up an opcode by its upper-case mnemonic.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        Some(match name {
            "ADD" => Opcode::Add,
            "SUB" => Opcode::Sub,
            "AND" => Opcode::And,
            "OR" => Opcode::Or,
            "SLT" => Opcode::Slt,
            "ADDI" => Opcode::Addi,
            "ANDI" => Opcode::Andi,
            "ORI" => Opcode::Ori,
            "LW" => Opcode::Lw,
            "SW" => Opcode::Sw,
            "BEQ" => Opcode::Beq,
            "BNE" => Opcode::Bne,
            "J" => Opcode::J,
            "JAL" => Opcode::Jal,
            "JR" => Opcode::Jr,
            "NOP" => Opcode::Nop,
            _ => return None,
        })
    }

    /// Returns the encoding shape of this opcode.
    pub fn format(self) -> Format {
        match self {
            Opcode::Add | Opcode::Sub | Opcode::And | Opcode::Or | Opcode::Slt => Format::Register,
            Opcode::Addi
            | Opcode::Andi
            | Opcode::Ori
            | Opcode::Lw
            | Opcode::Sw
            | Opcode::Beq
            | Opcode::Bne => Format::Immediate,
            Opcode::J | Opcode::Jal => Format::Jump,
            Opcode::Jr | Opcode::Nop => Format::Special,
        }
    }

    /// Whether this instruction reads the `rs` field as a source register.
    pub fn reads_rs(self) -> bool {
        !matches!(self, Opcode::J | Opcode::Jal | Opcode::Nop)
    }

    /// Whether this instruction reads the `rt` field as a source register.
    ///
    /// For `SW` the `rt` register carries the store data; for the
    /// arithmetic immediates `rt` is a destination and is not read.
    pub fn reads_rt(self) -> bool {
        matches!(
            self,
            Opcode::Add
                | Opcode::Sub
                | Opcode::And
                | Opcode::Or
                | Opcode::Slt
                | Opcode::Sw
                | Opcode::Beq
                | Opcode::Bne
        )
    }
}
