//! Bar feed adapters

mod jsonl;
mod memory;

pub use jsonl::JsonLinesFeed;
pub use memory::MemoryFeed;
