//! Assembler and disassembler for the textual assembly dialect.
//!
//! The assembler is a line-oriented total function: every source line maps
//! to at most one 16-bit word, and any line that cannot be encoded becomes
//! a `NOP` with a recorded warning. No labels or symbolic addresses exist
//! in the dialect; jump targets are absolute instruction indices.
//!
//! Dialect rules:
//!
//! * `#` starts a comment running to end of line.
//! * Commas and parentheses are interchangeable with whitespace, which is
//!   what makes the `LW rt, imm(rs)` memory spelling tokenize as
//!   `rt imm rs`.
//! * Mnemonics are case-insensitive; registers accept an optional `$` or
//!   `r`/`R` prefix and the numeric tail is taken modulo 8.
//! * Immediates are decimal and silently truncated to their field width.

use std::fmt;

use crate::common::constants::{ADDR_MASK, IMM_MASK};
use crate::isa::decode::{decode, word_from_bits};
use crate::isa::opcode::{Opcode, NOP_WORD};

/// Disassembly of an input that is not a 16-bit binary string.
pub const INVALID: &str = "INVALID";

/// Result of assembling a source text.
#[derive(Clone, Debug, Default)]
pub struct Program {
    /// Machine words, one per source instruction line.
    pub words: Vec<u16>,
    /// Diagnostics for lines that were absorbed as `NOP`.
    pub warnings: Vec<Warning>,
}

impl Program {
    /// Renders the program in the serialised binary-string form consumed
    /// by [`crate::core::Cpu::load_program`].
    pub fn binary_lines(&self) -> Vec<String> {
        self.words
            .iter()
            .map(|&w| crate::isa::decode::word_to_bits(w))
            .collect()
    }
}

/// A diagnostic attached to a source line that assembled to `NOP`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Warning {
    /// 1-based source line number.
    pub line: usize,
    pub kind: WarningKind,
}

/// Why a source line could not be encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// The first token is not one of the sixteen mnemonics.
    UnknownMnemonic(String),
    /// An operand token is not a register or decimal immediate.
    BadOperand(String),
    /// The mnemonic requires more operands than the line provides.
    MissingOperand,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnknownMnemonic(name) => {
                write!(
                    f,
                    "unknown instruction '{}' at line {}, inserting NOP",
                    name, self.line
                )
            }
            WarningKind::BadOperand(token) => {
                write!(
                    f,
                    "malformed operand '{}' at line {}, inserting NOP",
                    token, self.line
                )
            }
            WarningKind::MissingOperand => {
                write!(f, "missing operand at line {}, inserting NOP", self.line)
            }
        }
    }
}

/// Assembles a source text into machine words.
///
/// Blank and comment-only lines produce nothing; every other line produces
/// exactly one word, falling back to `NOP` (with a warning) when the line
/// cannot be encoded.
pub fn assemble(source: &str) -> Program {
    let mut program = Program::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let cleaned: String = line
            .chars()
            .map(|c| if matches!(c, ',' | '(' | ')') { ' ' } else { c })
            .collect();
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let Some((first, operands)) = tokens.split_first() else {
            continue;
        };

        let mnemonic = first.to_ascii_uppercase();
        match Opcode::from_mnemonic(&mnemonic) {
            Some(op) => match encode(op, operands) {
                Ok(word) => program.words.push(word),
                Err(kind) => {
                    program.warnings.push(Warning {
                        line: line_num,
                        kind,
                    });
                    program.words.push(NOP_WORD);
                }
            },
            None => {
                program.warnings.push(Warning {
                    line: line_num,
                    kind: WarningKind::UnknownMnemonic(mnemonic),
                });
                program.words.push(NOP_WORD);
            }
        }
    }

    program
}

/// Encodes one instruction from its mnemonic's operand order.
fn encode(op: Opcode, operands: &[&str]) -> Result<u16, WarningKind> {
    let top = op.bits() << 12;
    let word = match op {
        // R-type arithmetic is written destination first: `ADD rd, rs, rt`.
        Opcode::Add | Opcode::Sub | Opcode::And | Opcode::Or | Opcode::Slt => {
            let rd = parse_register(operand(operands, 0)?)?;
            let rs = parse_register(operand(operands, 1)?)?;
            let rt = parse_register(operand(operands, 2)?)?;
            top | rs << 9 | rt << 6 | rd << 3
        }
        Opcode::Jr => {
            let rs = parse_register(operand(operands, 0)?)?;
            top | rs << 9
        }
        Opcode::Addi | Opcode::Andi | Opcode::Ori => {
            let rt = parse_register(operand(operands, 0)?)?;
            let rs = parse_register(operand(operands, 1)?)?;
            let imm = parse_immediate(operand(operands, 2)?)? & IMM_MASK;
            top | rs << 9 | rt << 6 | imm
        }
        // `LW rt, imm(rs)` arrives as the tokens `rt imm rs`; an omitted
        // base register reads as r0.
        Opcode::Lw | Opcode::Sw => {
            let rt = parse_register(operand(operands, 0)?)?;
            let imm = parse_immediate(operand(operands, 1)?)? & IMM_MASK;
            let rs = match operands.get(2) {
                Some(token) => parse_register(token)?,
                None => 0,
            };
            top | rs << 9 | rt << 6 | imm
        }
        Opcode::Beq | Opcode::Bne => {
            let rs = parse_register(operand(operands, 0)?)?;
            let rt = parse_register(operand(operands, 1)?)?;
            let imm = parse_immediate(operand(operands, 2)?)? & IMM_MASK;
            top | rs << 9 | rt << 6 | imm
        }
        Opcode::J | Opcode::Jal => {
            let addr = parse_immediate(operand(operands, 0)?)? & ADDR_MASK;
            top | addr
        }
        Opcode::Nop => NOP_WORD,
    };
    Ok(word)
}

fn operand<'a>(operands: &[&'a str], idx: usize) -> Result<&'a str, WarningKind> {
    operands.get(idx).copied().ok_or(WarningKind::MissingOperand)
}

/// Parses a register token (`r3`, `R3`, `$3`, or bare `3`); the numeric
/// tail is taken modulo 8.
fn parse_register(token: &str) -> Result<u16, WarningKind> {
    let lowered = token.to_ascii_lowercase();
    let tail = lowered
        .strip_prefix('$')
        .or_else(|| lowered.strip_prefix('r'))
        .unwrap_or(&lowered);
    tail.parse::<i64>()
        .map(|n| (n & 0x7) as u16)
        .map_err(|_| WarningKind::BadOperand(token.to_string()))
}

/// Parses a signed decimal immediate; callers mask to the field width.
fn parse_immediate(token: &str) -> Result<u16, WarningKind> {
    token
        .parse::<i64>()
        .map(|n| n as u16)
        .map_err(|_| WarningKind::BadOperand(token.to_string()))
}

/// Disassembles a 16-bit binary string into canonical assembly text.
///
/// Inputs that are not exactly sixteen binary digits yield [`INVALID`].
/// Immediate fields are printed as their unsigned field value, matching
/// what re-assembly would encode.
pub fn disassemble(bits: &str) -> String {
    let Some(word) = word_from_bits(bits) else {
        return INVALID.to_string();
    };
    let d = decode(word);
    let name = d.opcode.mnemonic();
    match d.opcode {
        Opcode::Add | Opcode::Sub | Opcode::And | Opcode::Or | Opcode::Slt => {
            format!("{} r{}, r{}, r{}", name, d.rd, d.rs, d.rt)
        }
        Opcode::Jr => format!("JR r{}", d.rs),
        Opcode::Addi | Opcode::Andi | Opcode::Ori => {
            format!("{} r{}, r{}, {}", name, d.rt, d.rs, d.imm)
        }
        Opcode::Lw | Opcode::Sw => format!("{} r{}, {}(r{})", name, d.rt, d.imm, d.rs),
        Opcode::Beq | Opcode::Bne => format!("{} r{}, r{}, {}", name, d.rs, d.rt, d.imm),
        Opcode::J | Opcode::Jal => format!("{} {}", name, d.addr),
        Opcode::Nop => "NOP".to_string(),
    }
}
