//! Per-stage behaviour and universal invariant tests for the engine.

use mips16_emulator::asm::assemble;
use mips16_emulator::core::cpu::{Cpu, NO_FORWARDING, NO_HAZARD};
use mips16_emulator::isa::word_to_bits;

/// Assembles a source text and loads it into a fresh engine.
fn cpu_with(source: &str) -> Cpu {
    let program = assemble(source);
    assert!(program.warnings.is_empty(), "{:?}", program.warnings);
    let mut cpu = Cpu::new();
    cpu.load_program(&program.binary_lines());
    cpu
}

/// Steps until the program completes, panicking past a safety cap.
fn run(cpu: &mut Cpu) {
    for _ in 0..1000 {
        if cpu.is_program_complete() {
            return;
        }
        cpu.step();
    }
    panic!("program did not complete");
}

/// Tests that writes to r0 have no observable effect.
#[test]
fn test_r0_write_ignored() {
    let mut cpu = cpu_with("ADDI r0, r0, 5\nADD r0, r0, r0\nNOP\nNOP\nNOP");
    run(&mut cpu);
    assert_eq!(cpu.regs.read(0), 0);
}

/// Tests that arithmetic wraps modulo 2^16.
#[test]
fn test_wrapping_arithmetic() {
    let mut cpu = cpu_with(
        "ADDI r1, r0, 1\n\
         NOP\nNOP\n\
         SUB r2, r0, r1\n\
         NOP\nNOP\n\
         ADD r3, r2, r1\n\
         NOP\nNOP\nNOP",
    );
    run(&mut cpu);
    assert_eq!(cpu.regs.read(1), 1);
    assert_eq!(cpu.regs.read(2), 0xFFFF);
    assert_eq!(cpu.regs.read(3), 0);
}

/// Tests that SLT compares raw 16-bit values as unsigned.
#[test]
fn test_slt_unsigned_compare() {
    let mut cpu = cpu_with(
        "ADDI r1, r0, 1\n\
         SUB r2, r0, r1\n\
         NOP\nNOP\n\
         SLT r4, r1, r2\n\
         SLT r5, r2, r1\n\
         NOP\nNOP\nNOP",
    );
    run(&mut cpu);
    assert_eq!(cpu.regs.read(2), 0xFFFF);
    assert_eq!(cpu.regs.read(4), 1, "1 < 65535 unsigned");
    assert_eq!(cpu.regs.read(5), 0, "65535 < 1 is false unsigned");
}

/// Tests that data addresses reduce modulo the memory size.
#[test]
fn test_memory_address_wraps() {
    let mut cpu = cpu_with(
        "ADDI r1, r0, 63\n\
         ADDI r1, r1, 5\n\
         ADDI r2, r0, 9\n\
         NOP\nNOP\n\
         SW r2, 0(r1)\n\
         NOP\nNOP\nNOP",
    );
    run(&mut cpu);
    // 63 + 5 = 68, which addresses word 4.
    assert_eq!(cpu.memory[4], 9);
}

/// Tests the latch fill sequence as one instruction flows down the
/// pipeline.
#[test]
fn test_latch_progression() {
    let mut cpu = cpu_with("ADDI r1, r0, 7\nNOP\nNOP\nNOP\nNOP");

    cpu.step();
    assert!(cpu.if_id.is_some());
    assert!(cpu.id_ex.is_none());
    assert_eq!(cpu.pc, 1);

    cpu.step();
    assert!(cpu.id_ex.is_some());
    assert_eq!(cpu.stats.instructions, 1);

    cpu.step();
    let ex = cpu.ex_mem.as_ref().expect("EX/MEM populated");
    assert_eq!(ex.alu_result, 7);
    assert!(ex.write_reg);
    assert_eq!(ex.rd, 1);
    assert_eq!(cpu.regs.read(1), 0, "not yet retired");

    cpu.step();
    let wb = cpu.mem_wb.as_ref().expect("MEM/WB populated");
    assert_eq!(wb.write_data, 7);

    cpu.step();
    assert_eq!(cpu.regs.read(1), 7, "retired in WB");
}

/// Tests that a finished program leaves the PC past instruction memory
/// with all latches drained.
#[test]
fn test_program_completes_and_drains() {
    let mut cpu = cpu_with("ADDI r1, r0, 1\nNOP\nNOP");
    run(&mut cpu);
    assert!(cpu.is_program_complete());
    assert!(cpu.is_pipeline_empty());
    assert_eq!(cpu.pc as usize, cpu.instr_mem.len());
    // Stepping an empty machine stays well-defined.
    cpu.step();
    assert!(cpu.is_program_complete());
}

/// Tests the stall cycle contract: EX/MEM bubbled, front latches and PC
/// frozen, hazard message set, and only one stall per load-use pair.
#[test]
fn test_stall_cycle_contract() {
    let mut cpu = cpu_with(
        "ADDI r1, r0, 4\n\
         LW r2, 0(r1)\n\
         ADD r3, r2, r2\n\
         NOP\nNOP\nNOP",
    );
    cpu.memory[4] = 42;

    let mut stall_cycles = 0;
    for _ in 0..100 {
        if cpu.is_program_complete() {
            break;
        }
        let pc_before = cpu.pc;
        let if_id_before = cpu.if_id.as_ref().map(|e| e.pc);
        cpu.step();
        if cpu.stall {
            stall_cycles += 1;
            assert!(cpu.ex_mem.is_none(), "stall must bubble EX/MEM");
            assert_eq!(cpu.pc, pc_before, "stall must not advance the PC");
            assert_eq!(
                cpu.if_id.as_ref().map(|e| e.pc),
                if_id_before,
                "stall must freeze IF/ID"
            );
            assert!(cpu.hazard_msg.contains("Load-use"), "{}", cpu.hazard_msg);
        }
    }

    assert_eq!(stall_cycles, 1);
    assert_eq!(cpu.stats.stalls, 1);
    assert_eq!(cpu.regs.read(2), 42);
    assert_eq!(cpu.regs.read(3), 84);
}

/// Tests the flush cycle contract: both front latches emptied, PC
/// redirected, hazard message set.
#[test]
fn test_flush_cycle_contract() {
    let mut cpu = cpu_with(
        "BEQ r0, r0, 2\n\
         ADDI r1, r0, 9\n\
         ADDI r2, r0, 9\n\
         ADDI r3, r0, 7\n\
         NOP\nNOP\nNOP",
    );

    let mut flush_cycles = 0;
    for _ in 0..100 {
        if cpu.is_program_complete() {
            break;
        }
        cpu.step();
        if cpu.flush {
            flush_cycles += 1;
            assert!(cpu.if_id.is_none(), "flush must empty IF/ID");
            assert!(cpu.id_ex.is_none(), "flush must empty ID/EX");
            assert_eq!(cpu.pc, 3, "PC redirected to the branch target");
            assert!(cpu.hazard_msg.contains("Control hazard"), "{}", cpu.hazard_msg);
        }
    }

    assert_eq!(flush_cycles, 1);
    assert_eq!(cpu.regs.read(1), 0, "flushed");
    assert_eq!(cpu.regs.read(2), 0, "never fetched");
    assert_eq!(cpu.regs.read(3), 7);
}

/// Universal invariants checked after every cycle of a mixed program.
#[test]
fn test_invariants_every_cycle() {
    let mut cpu = cpu_with(
        "ADDI r1, r0, 3\n\
         SW r1, 2(r0)\n\
         LW r2, 2(r0)\n\
         ADD r3, r2, r1\n\
         BEQ r3, r0, 1\n\
         ORI r4, r3, 1\n\
         NOP\nNOP\nNOP",
    );

    for _ in 0..100 {
        if cpu.is_program_complete() {
            break;
        }
        cpu.step();

        assert_eq!(cpu.regs.read(0), 0);
        assert!(cpu.pc < 4096);
        assert!(
            cpu.stats.instructions <= cpu.stats.cycles - cpu.stats.stalls,
            "at most one instruction enters decode per non-stall cycle"
        );
        if !cpu.stall {
            assert_eq!(cpu.hazard_msg == NO_HAZARD, !cpu.flush);
        }
    }
    assert!(cpu.is_program_complete());
    assert_eq!(cpu.regs.read(2), 3);
    assert_eq!(cpu.regs.read(3), 6);
    assert_eq!(cpu.regs.read(4), 7);
}

/// Tests that reset clears state but keeps the loaded program, and that a
/// rerun reproduces the same result.
#[test]
fn test_reset_preserves_program() {
    let mut cpu = cpu_with("ADDI r1, r0, 9\nNOP\nNOP\nNOP");
    run(&mut cpu);
    assert_eq!(cpu.regs.read(1), 9);
    let loaded = cpu.instruction_bits();

    cpu.reset();
    assert_eq!(cpu.regs.read(1), 0);
    assert_eq!(cpu.pc, 0);
    assert_eq!(cpu.stats.cycles, 0);
    assert_eq!(cpu.hazard_msg, NO_HAZARD);
    assert_eq!(cpu.forwarding_msg, NO_FORWARDING);
    assert_eq!(cpu.instruction_bits(), loaded);

    run(&mut cpu);
    assert_eq!(cpu.regs.read(1), 9);
}

/// Tests that a malformed binary string loads as NOP.
#[test]
fn test_malformed_binary_loads_as_nop() {
    let mut cpu = Cpu::new();
    cpu.load_program(&["banana".to_string(), word_to_bits(0x0000)]);
    assert_eq!(cpu.instruction_bits()[0], "1111000000000000");
    assert_eq!(cpu.instruction_bits()[1], "0000000000000000");
    run(&mut cpu);
}

/// Tests that an empty program is complete before the first cycle.
#[test]
fn test_empty_program_is_complete() {
    let mut cpu = Cpu::new();
    cpu.load_program(&[]);
    assert!(cpu.is_program_complete());
}

/// Tests the per-cycle forwarding status line.
#[test]
fn test_forwarding_message_names_register() {
    let mut cpu = cpu_with("ADDI r1, r0, 5\nADDI r2, r1, 3\nNOP\nNOP\nNOP");

    let mut saw_forward = false;
    for _ in 0..100 {
        if cpu.is_program_complete() {
            break;
        }
        cpu.step();
        if cpu.forwarding_msg != NO_FORWARDING {
            saw_forward = true;
            assert!(
                cpu.forwarding_msg.contains("R1 from EX/MEM"),
                "{}",
                cpu.forwarding_msg
            );
        }
    }
    assert!(saw_forward);
    assert_eq!(cpu.regs.read(2), 8);
}
