//! Architectural size constants and encoding field masks.

/// Number of general-purpose registers (r0-r7).
pub const REG_COUNT: usize = 8;

/// Number of 16-bit words of data memory.
pub const DATA_MEM_WORDS: usize = 64;

/// Mask for the 12-bit program counter.
pub const PC_MASK: u16 = 0x0FFF;

/// Mask for the 6-bit I-type immediate field.
pub const IMM_MASK: u16 = 0x003F;

/// Mask for the 12-bit J-type address field.
pub const ADDR_MASK: u16 = 0x0FFF;
