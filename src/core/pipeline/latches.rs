//! Pipeline latch records for inter-stage communication.
//!
//! Each latch on the engine is an `Option` of one of these records: `None`
//! is a bubble, `Some` carries the full snapshot a stage produced during
//! the most recent cycle. A latch is never partially populated.

use crate::isa::opcode::Opcode;

/// Entry in the IF/ID latch (Fetch to Decode).
#[derive(Clone, Debug, Default)]
pub struct IfIdEntry {
    /// Raw 16-bit instruction word.
    pub word: u16,
    /// Program counter the word was fetched at.
    pub pc: u16,
}

/// Entry in the ID/EX latch (Decode to Execute).
///
/// Carries the decoded fields plus the register values read at decode
/// time; operand forwarding replaces those values in the execute stage
/// when a newer result is in flight.
#[derive(Clone, Debug, Default)]
pub struct IdExEntry {
    pub opcode: Opcode,
    /// First source register index.
    pub rs: usize,
    /// Second source register index.
    pub rt: usize,
    /// R-type destination register index.
    pub rd: usize,
    /// Value of `rs` read from the register file at decode.
    pub rs_value: u16,
    /// Value of `rt` read from the register file at decode.
    pub rt_value: u16,
    /// Raw 6-bit immediate field.
    pub imm: u16,
    /// 12-bit jump address field.
    pub addr: u16,
    /// Program counter the instruction was fetched at.
    pub pc: u16,
}

/// Entry in the EX/MEM latch (Execute to Memory).
#[derive(Clone, Debug, Default)]
pub struct ExMemEntry {
    pub opcode: Opcode,
    /// ALU output: the result for arithmetic, the address for memory ops.
    pub alu_result: u16,
    /// Forwarded `rt` value, written to memory by `SW`.
    pub store_data: u16,
    /// Destination register index (0 when nothing is written).
    pub rd: usize,
    /// Whether the instruction commits a register in writeback.
    pub write_reg: bool,
}

/// Entry in the MEM/WB latch (Memory to Writeback).
#[derive(Clone, Debug, Default)]
pub struct MemWbEntry {
    pub opcode: Opcode,
    /// Value committed to the register file: loaded data for `LW`, the ALU
    /// result otherwise.
    pub write_data: u16,
    /// Destination register index.
    pub rd: usize,
    /// Whether the instruction commits a register in writeback.
    pub write_reg: bool,
}
