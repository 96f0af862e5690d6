//! The pipelined engine.
//!
//! `Cpu` owns all architectural state (registers, data memory, instruction
//! memory, program counter), the four inter-stage latches, and the
//! bookkeeping counters. `step` advances exactly one cycle; it is the sole
//! mutator and cannot fail.

use crate::common::constants::DATA_MEM_WORDS;
use crate::common::reg::RegisterFile;
use crate::isa::decode::{word_from_bits, word_to_bits};
use crate::isa::opcode::NOP_WORD;
use crate::stats::SimStats;

use super::pipeline::hazards;
use super::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use super::stages;

/// Hazard status line for a cycle with no hazard.
pub const NO_HAZARD: &str = "No hazard";
/// Forwarding status line for a cycle with no forwards.
pub const NO_FORWARDING: &str = "No forwarding";

/// The 16-bit pipelined CPU.
///
/// All fields are observable between cycles; observers must not retain
/// references into the latches across a `step`.
pub struct Cpu {
    /// General-purpose registers r0-r7, with r0 hardwired to zero.
    pub regs: RegisterFile,
    /// Word-addressed data memory.
    pub memory: [u16; DATA_MEM_WORDS],
    /// Instruction memory, loaded once per program.
    pub instr_mem: Vec<u16>,
    /// 12-bit program counter naming the next word to fetch.
    pub pc: u16,
    /// Emit a per-stage trace line for every cycle.
    pub trace: bool,

    /// IF/ID latch.
    pub if_id: Option<IfIdEntry>,
    /// ID/EX latch.
    pub id_ex: Option<IdExEntry>,
    /// EX/MEM latch.
    pub ex_mem: Option<ExMemEntry>,
    /// MEM/WB latch.
    pub mem_wb: Option<MemWbEntry>,
    /// Copy of MEM/WB taken before the memory stage overwrites it, holding
    /// the value retired at the start of the current cycle. Feeds the
    /// MEM/WB bypass; not part of the architectural latch set.
    pub wb_latch: Option<MemWbEntry>,

    /// Whether the current cycle was a load-use stall.
    pub stall: bool,
    /// Whether a redirect flushed IF and ID this cycle.
    pub flush: bool,

    /// Human-readable summary of the most recent cycle's hazard.
    pub hazard_msg: String,
    /// Human-readable summary of the most recent cycle's forwarding.
    pub forwarding_msg: String,

    /// Bookkeeping counters.
    pub stats: SimStats,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            memory: [0; DATA_MEM_WORDS],
            instr_mem: Vec::new(),
            pc: 0,
            trace: false,
            if_id: None,
            id_ex: None,
            ex_mem: None,
            mem_wb: None,
            wb_latch: None,
            stall: false,
            flush: false,
            hazard_msg: NO_HAZARD.to_string(),
            forwarding_msg: NO_FORWARDING.to_string(),
            stats: SimStats::default(),
        }
    }

    /// Replaces instruction memory and resets all other state.
    ///
    /// Each instruction is a 16-character binary string; a malformed word
    /// is absorbed as `NOP`.
    pub fn load_program(&mut self, instructions: &[String]) {
        self.instr_mem = instructions
            .iter()
            .map(|bits| word_from_bits(bits).unwrap_or(NOP_WORD))
            .collect();
        self.reset();
    }

    /// Clears registers, memory, PC, latches, and counters. Instruction
    /// memory is kept.
    pub fn reset(&mut self) {
        self.regs.clear();
        self.memory = [0; DATA_MEM_WORDS];
        self.pc = 0;
        self.if_id = None;
        self.id_ex = None;
        self.ex_mem = None;
        self.mem_wb = None;
        self.wb_latch = None;
        self.stall = false;
        self.flush = false;
        self.hazard_msg = NO_HAZARD.to_string();
        self.forwarding_msg = NO_FORWARDING.to_string();
        self.stats = SimStats::default();
    }

    /// Advances the pipeline by exactly one cycle.
    ///
    /// Stages are evaluated in reverse order (WB, MEM, EX, ID, IF) so each
    /// one reads the latch produced in the previous cycle before it is
    /// overwritten.
    pub fn step(&mut self) {
        self.stats.cycles += 1;
        let stalled_last_cycle = self.stall;
        self.stall = false;
        self.flush = false;
        self.hazard_msg = NO_HAZARD.to_string();
        self.forwarding_msg = NO_FORWARDING.to_string();

        // Load-use detection runs before any stage evaluates. A stall
        // freezes the load in ID/EX, so the detector would fire again next
        // cycle; the previous-cycle check keeps it to one stall per pair,
        // which is all the MEM/WB bypass needs.
        if !stalled_last_cycle && hazards::need_stall_load_use(&self.id_ex, &self.if_id) {
            self.stall_cycle();
            return;
        }

        stages::wb_stage(self);
        self.wb_latch = self.mem_wb.clone();
        stages::mem_stage(self);
        stages::execute_stage(self);
        stages::decode_stage(self);
        stages::fetch_stage(self);
    }

    /// Runs the back half of the pipeline and injects a bubble into
    /// EX/MEM. IF/ID and ID/EX keep their instructions and the PC does not
    /// move.
    fn stall_cycle(&mut self) {
        self.stall = true;
        self.stats.stalls += 1;
        self.hazard_msg = "Load-use hazard: pipeline stalled".to_string();

        stages::wb_stage(self);
        self.wb_latch = self.mem_wb.clone();
        stages::mem_stage(self);
        self.ex_mem = None;
    }

    /// Whether all four latches are empty.
    pub fn is_pipeline_empty(&self) -> bool {
        self.if_id.is_none()
            && self.id_ex.is_none()
            && self.ex_mem.is_none()
            && self.mem_wb.is_none()
    }

    /// Whether the PC has run past instruction memory and the pipeline has
    /// drained.
    pub fn is_program_complete(&self) -> bool {
        (self.pc as usize) >= self.instr_mem.len() && self.is_pipeline_empty()
    }

    /// The loaded program in its serialised binary-string form.
    pub fn instruction_bits(&self) -> Vec<String> {
        self.instr_mem.iter().map(|&w| word_to_bits(w)).collect()
    }

    /// Dumps the PC, registers, and non-zero memory words to stdout.
    pub fn dump_state(&self) {
        println!("PC = {}", self.pc);
        self.regs.dump();
        for (addr, &word) in self.memory.iter().enumerate() {
            if word != 0 {
                println!("mem[{:02}] = {}", addr, word);
            }
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
