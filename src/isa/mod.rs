//! Instruction Set Architecture definitions.
//!
//! This module defines the sixteen opcodes of the 16-bit instruction set,
//! their encoding shapes, the pure decode of a machine word into named
//! fields, and the binary bit-string codec used at the external interface.

/// Well-known register indices.
pub mod abi;

/// Instruction word decoding and the bit-string codec.
pub mod decode;

/// Opcode enumeration and per-opcode classification.
pub mod opcode;

pub use decode::{decode, sign_extend_imm, word_from_bits, word_to_bits, Decoded};
pub use opcode::{Format, Opcode, NOP_WORD};
