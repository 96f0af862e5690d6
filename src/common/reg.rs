//! General-Purpose Register File.
//!
//! This module implements the register file, containing eight 16-bit
//! registers (r0-r7). It enforces the architectural invariant that
//! register r0 is always hardwired to zero.

use crate::common::constants::REG_COUNT;

/// General-purpose register file.
///
/// Contains eight 16-bit registers (r0-r7). Register r0 is hardwired to
/// zero and cannot be modified.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    regs: [u16; REG_COUNT],
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; REG_COUNT],
        }
    }

    /// Reads a register value.
    ///
    /// Register r0 (index 0) always returns 0 regardless of storage.
    pub fn read(&self, idx: usize) -> u16 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register.
    ///
    /// Writes to register r0 (index 0) are silently ignored as r0 is
    /// hardwired to zero.
    pub fn write(&mut self, idx: usize, val: u16) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Resets all registers to zero.
    pub fn clear(&mut self) {
        self.regs = [0; REG_COUNT];
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs (two per line) with hexadecimal
    /// formatting.
    pub fn dump(&self) {
        for i in (0..REG_COUNT).step_by(2) {
            println!(
                "r{}={:#06x} r{}={:#06x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
