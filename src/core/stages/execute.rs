use crate::common::constants::PC_MASK;
use crate::core::cpu::Cpu;
use crate::core::pipeline::hazards::{self, ForwardSource};
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::isa::abi;
use crate::isa::decode::sign_extend_imm;
use crate::isa::opcode::Opcode;

pub fn execute_stage(cpu: &mut Cpu) {
    let Some(id) = cpu.id_ex.clone() else {
        cpu.ex_mem = None;
        return;
    };

    let (fwd_rs, fwd_rt) = hazards::forward_operands(&id, &cpu.ex_mem, &cpu.mem_wb, &cpu.wb_latch);
    record_forwards(cpu, &id, fwd_rs.source, fwd_rt.source);
    let rs_value = fwd_rs.value;
    let rt_value = fwd_rt.value;

    let mut alu_result: u16 = 0;
    let mut rd: usize = 0;
    let mut write_reg = false;
    let mut redirect = None;

    match id.opcode {
        Opcode::Add => {
            alu_result = rs_value.wrapping_add(rt_value);
            rd = id.rd;
            write_reg = true;
        }
        Opcode::Sub => {
            alu_result = rs_value.wrapping_sub(rt_value);
            rd = id.rd;
            write_reg = true;
        }
        Opcode::And => {
            alu_result = rs_value & rt_value;
            rd = id.rd;
            write_reg = true;
        }
        Opcode::Or => {
            alu_result = rs_value | rt_value;
            rd = id.rd;
            write_reg = true;
        }
        Opcode::Slt => {
            // Unsigned comparison on the raw 16-bit values.
            alu_result = (rs_value < rt_value) as u16;
            rd = id.rd;
            write_reg = true;
        }
        // The arithmetic immediates take the 6-bit field as unsigned
        // (0..63); only loads, stores, and branches sign-extend it.
        Opcode::Addi => {
            alu_result = rs_value.wrapping_add(id.imm);
            rd = id.rt;
            write_reg = true;
        }
        Opcode::Andi => {
            alu_result = rs_value & id.imm;
            rd = id.rt;
            write_reg = true;
        }
        Opcode::Ori => {
            alu_result = rs_value | id.imm;
            rd = id.rt;
            write_reg = true;
        }
        Opcode::Lw => {
            alu_result = rs_value.wrapping_add(sign_extend_imm(id.imm));
            rd = id.rt;
            write_reg = true;
        }
        Opcode::Sw => {
            alu_result = rs_value.wrapping_add(sign_extend_imm(id.imm));
        }
        Opcode::Beq => {
            if rs_value == rt_value {
                redirect = Some(branch_target(id.pc, id.imm));
            }
        }
        Opcode::Bne => {
            if rs_value != rt_value {
                redirect = Some(branch_target(id.pc, id.imm));
            }
        }
        Opcode::J => {
            redirect = Some(id.addr & PC_MASK);
        }
        Opcode::Jal => {
            // The return address commits straight to r7 in this cycle; it
            // does not travel down the pipeline.
            cpu.regs
                .write(abi::REG_RA, id.pc.wrapping_add(1) & PC_MASK);
            redirect = Some(id.addr & PC_MASK);
        }
        Opcode::Jr => {
            redirect = Some(rs_value & PC_MASK);
        }
        Opcode::Nop => {}
    }

    if let Some(target) = redirect {
        cpu.pc = target;
        cpu.flush = true;
        cpu.stats.flushes += 1;
        cpu.hazard_msg = "Control hazard: taken branch, IF and ID flushed".to_string();
        if cpu.trace {
            eprintln!("EX  pc={} {:?} redirect -> {}", id.pc, id.opcode, target);
        }
    } else if cpu.trace {
        eprintln!("EX  pc={} {:?} alu={}", id.pc, id.opcode, alu_result);
    }

    cpu.ex_mem = Some(ExMemEntry {
        opcode: id.opcode,
        alu_result,
        store_data: rt_value,
        rd,
        write_reg,
    });
}

/// Displacements are measured in instructions from the slot after the
/// branch.
fn branch_target(pc: u16, imm: u16) -> u16 {
    pc.wrapping_add(1).wrapping_add(sign_extend_imm(imm)) & PC_MASK
}

fn record_forwards(
    cpu: &mut Cpu,
    id: &IdExEntry,
    rs_source: Option<ForwardSource>,
    rt_source: Option<ForwardSource>,
) {
    let mut parts = Vec::new();
    for (reg, source) in [(id.rs, rs_source), (id.rt, rt_source)] {
        let Some(source) = source else {
            continue;
        };
        match source {
            ForwardSource::ExMem => cpu.stats.forwards_ex_mem += 1,
            ForwardSource::MemWb => cpu.stats.forwards_mem_wb += 1,
        }
        parts.push(format!("R{} from {}", reg, source));
    }
    if !parts.is_empty() {
        cpu.forwarding_msg = format!("Forwarding: {}", parts.join(", "));
    }
}
