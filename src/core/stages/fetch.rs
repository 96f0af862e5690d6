use crate::common::constants::PC_MASK;
use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::IfIdEntry;

pub fn fetch_stage(cpu: &mut Cpu) {
    let mut fetched = None;

    // On a flush the PC already points at the redirect target, so the
    // stage only discards the word it would have fetched.
    if !cpu.flush && (cpu.pc as usize) < cpu.instr_mem.len() {
        let word = cpu.instr_mem[cpu.pc as usize];
        if cpu.trace {
            eprintln!("IF  pc={} inst={:016b}", cpu.pc, word);
        }
        fetched = Some(IfIdEntry { word, pc: cpu.pc });
        cpu.pc = cpu.pc.wrapping_add(1) & PC_MASK;
    }

    cpu.if_id = fetched;
}
