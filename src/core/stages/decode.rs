use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::IdExEntry;
use crate::isa::decode::decode;

pub fn decode_stage(cpu: &mut Cpu) {
    let mut decoded = None;

    if !cpu.flush {
        if let Some(fetched) = &cpu.if_id {
            let d = decode(fetched.word);
            // Register values are captured here; forwarding in EX replaces
            // them when a newer result is still in flight.
            let rs_value = cpu.regs.read(d.rs);
            let rt_value = cpu.regs.read(d.rt);

            if cpu.trace {
                eprintln!(
                    "ID  pc={} {:?} rs=r{} v={} rt=r{} v={} rd=r{} imm={}",
                    fetched.pc, d.opcode, d.rs, rs_value, d.rt, rt_value, d.rd, d.imm
                );
            }

            decoded = Some(IdExEntry {
                opcode: d.opcode,
                rs: d.rs,
                rt: d.rt,
                rd: d.rd,
                rs_value,
                rt_value,
                imm: d.imm,
                addr: d.addr,
                pc: fetched.pc,
            });
            cpu.stats.instructions += 1;
        }
    }

    cpu.id_ex = decoded;
}
