//! Pipeline stage implementations.
//!
//! One function per stage, each consuming the latch the previous stage
//! produced and writing its own. The engine calls them in reverse order
//! (WB, MEM, EX, ID, IF) so the single-buffered latches are read before
//! being overwritten.

mod decode;
mod execute;
mod fetch;
mod memory_access;
mod write_back;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory_access::mem_stage;
pub use write_back::wb_stage;
