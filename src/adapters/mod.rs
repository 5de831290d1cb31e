// Adapters layer: concrete implementations of the domain ports.

pub mod audit;
pub mod memory;
pub mod system;

pub use audit::{FileAudit, NullAudit};
pub use memory::MemoryDirectory;
pub use system::SystemDirectory;
