//! Common constants and types used throughout the simulator.
//!
//! This module provides the fixed architectural parameters of the machine
//! and the register file shared by the pipeline stages.

/// Architectural size constants and encoding field masks.
pub mod constants;

/// Register file implementation.
pub mod reg;

pub use constants::{ADDR_MASK, DATA_MEM_WORDS, IMM_MASK, PC_MASK, REG_COUNT};
pub use reg::RegisterFile;
