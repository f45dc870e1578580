pub mod assistant;
pub mod memory;
pub mod providers;

pub use assistant::Assistant;
pub use memory::MemoryStore;
