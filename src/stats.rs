//! Simulation statistics collection and reporting.
//!
//! Tracks cycle counts, instructions entering decode, hazard events, and
//! operand forwards.

/// Bookkeeping counters accumulated over a program run.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Cycles executed.
    pub cycles: u64,
    /// Instructions that reached the decode stage.
    pub instructions: u64,
    /// Stall cycles inserted for load-use hazards.
    pub stalls: u64,
    /// Taken branches and jumps that flushed IF and ID.
    pub flushes: u64,
    /// Operands forwarded from the EX/MEM latch.
    pub forwards_ex_mem: u64,
    /// Operands forwarded from the MEM/WB latch.
    pub forwards_mem_wb: u64,
}

impl SimStats {
    /// Total operand forwards from either bypass path.
    pub fn forwards_total(&self) -> u64 {
        self.forwards_ex_mem + self.forwards_mem_wb
    }

    /// Cycles per instruction.
    pub fn cpi(&self) -> f64 {
        self.cycles as f64 / self.instructions.max(1) as f64
    }

    /// Prints a formatted summary of the run.
    pub fn print(&self) {
        let cyc = self.cycles.max(1);

        println!("\n==================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("--------------------------------------------------");
        println!("HAZARD RESOLUTION");
        println!(
            "  stalls.load_use        {} ({:.2}%)",
            self.stalls,
            (self.stalls as f64 / cyc as f64) * 100.0
        );
        println!("  flushes.control        {}", self.flushes);
        println!("  forwards.ex_mem        {}", self.forwards_ex_mem);
        println!("  forwards.mem_wb        {}", self.forwards_mem_wb);
        println!("  forwards.total         {}", self.forwards_total());
        println!("==================================================");
    }
}
