//! Pipeline latches and hazard resolution.

/// Load-use stall detection and operand forwarding.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB).
pub mod latches;

pub use latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
