//! Well-known register indices.

/// Register r0 (hardwired to zero).
pub const REG_ZERO: usize = 0;
/// Register r7 (link register written by `JAL`).
pub const REG_RA: usize = 7;
