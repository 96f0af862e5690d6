//! Data hazard detection and operand forwarding.
//!
//! Two mechanisms resolve read-after-write hazards:
//!
//! * A one-cycle **stall** when a load's destination is read by the
//!   instruction immediately behind it; forwarding alone cannot cover this
//!   because the loaded value does not exist until the memory stage.
//! * **Forwarding** in the execute stage, bypassing the register file with
//!   results still in flight in the EX/MEM and MEM/WB latches.

use std::fmt;

use crate::isa::decode::decode;
use crate::isa::opcode::Opcode;

use super::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};

/// Checks whether the pipeline must stall for a load-use hazard.
///
/// Fires when ID/EX holds an `LW` and the not-yet-decoded instruction in
/// IF/ID reads the register the load will write. Which fields count as
/// reads is opcode-dependent (see [`Opcode::reads_rs`] and
/// [`Opcode::reads_rt`]). A load targeting r0 changes nothing and never
/// stalls.
pub fn need_stall_load_use(id_ex: &Option<IdExEntry>, if_id: &Option<IfIdEntry>) -> bool {
    let Some(ex_inst) = id_ex else {
        return false;
    };
    if ex_inst.opcode != Opcode::Lw || ex_inst.rt == 0 {
        return false;
    }
    let Some(fetched) = if_id else {
        return false;
    };

    let next = decode(fetched.word);
    let load_dest = ex_inst.rt;
    (next.opcode.reads_rs() && next.rs == load_dest)
        || (next.opcode.reads_rt() && next.rt == load_dest)
}

/// Which bypass path supplied a forwarded operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// The ALU result still in the EX/MEM latch.
    ExMem,
    /// The write-back value in the MEM/WB latch.
    MemWb,
}

impl fmt::Display for ForwardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardSource::ExMem => write!(f, "EX/MEM"),
            ForwardSource::MemWb => write!(f, "MEM/WB"),
        }
    }
}

/// An operand value after forwarding, with its origin.
#[derive(Clone, Copy, Debug)]
pub struct ForwardedOperand {
    pub value: u16,
    /// `None` when the register-file value captured at decode was used.
    pub source: Option<ForwardSource>,
}

/// Resolves both source operands of the instruction entering execute.
///
/// `mem_wb` is the latch the memory stage wrote earlier in this same
/// cycle, so it carries the value of the immediately preceding instruction
/// (a load's data included). `wb_latch` is the copy taken before the
/// memory stage ran, carrying the value the instruction two ahead retired
/// with at the start of the cycle. Together they form the MEM/WB bypass.
pub fn forward_operands(
    id: &IdExEntry,
    ex_mem: &Option<ExMemEntry>,
    mem_wb: &Option<MemWbEntry>,
    wb_latch: &Option<MemWbEntry>,
) -> (ForwardedOperand, ForwardedOperand) {
    (
        forward_one(id.rs, id.rs_value, ex_mem, mem_wb, wb_latch),
        forward_one(id.rt, id.rt_value, ex_mem, mem_wb, wb_latch),
    )
}

fn forward_one(
    src: usize,
    reg_value: u16,
    ex_mem: &Option<ExMemEntry>,
    mem_wb: &Option<MemWbEntry>,
    wb_latch: &Option<MemWbEntry>,
) -> ForwardedOperand {
    if src != 0 {
        // EX/MEM bypass. A load is skipped here: its latch holds the
        // address, not the data, so the value must come from MEM/WB.
        if let Some(ex) = ex_mem {
            if ex.write_reg && ex.rd == src && ex.opcode != Opcode::Lw {
                return ForwardedOperand {
                    value: ex.alu_result,
                    source: Some(ForwardSource::ExMem),
                };
            }
        }

        // MEM/WB bypass, newest copy first.
        for wb in [mem_wb, wb_latch] {
            if let Some(wb) = wb {
                if wb.write_reg && wb.rd == src {
                    return ForwardedOperand {
                        value: wb.write_data,
                        source: Some(ForwardSource::MemWb),
                    };
                }
            }
        }
    }

    ForwardedOperand {
        value: reg_value,
        source: None,
    }
}
