use crate::core::cpu::Cpu;
use crate::isa::abi;

pub fn wb_stage(cpu: &mut Cpu) {
    if let Some(wb) = &cpu.mem_wb {
        if wb.write_reg && wb.rd != abi::REG_ZERO {
            if cpu.trace {
                eprintln!("WB  r{} <= {}", wb.rd, wb.write_data);
            }
            cpu.regs.write(wb.rd, wb.write_data);
        }
    }
}
