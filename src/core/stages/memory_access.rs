use crate::common::constants::DATA_MEM_WORDS;
use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::MemWbEntry;
use crate::isa::opcode::Opcode;

pub fn mem_stage(cpu: &mut Cpu) {
    let mut result = None;

    if let Some(ex) = &cpu.ex_mem {
        let mut write_data = ex.alu_result;
        let mut write_reg = ex.write_reg;

        // Addresses reduce modulo the memory size, so out-of-bounds
        // accesses cannot occur.
        match ex.opcode {
            Opcode::Lw => {
                let addr = ex.alu_result as usize % DATA_MEM_WORDS;
                write_data = cpu.memory[addr];
                write_reg = true;
                if cpu.trace {
                    eprintln!("MEM load mem[{}] -> {}", addr, write_data);
                }
            }
            Opcode::Sw => {
                let addr = ex.alu_result as usize % DATA_MEM_WORDS;
                cpu.memory[addr] = ex.store_data;
                write_reg = false;
                if cpu.trace {
                    eprintln!("MEM store mem[{}] <- {}", addr, ex.store_data);
                }
            }
            _ => {}
        }

        result = Some(MemWbEntry {
            opcode: ex.opcode,
            write_data,
            rd: ex.rd,
            write_reg,
        });
    }

    cpu.mem_wb = result;
}
