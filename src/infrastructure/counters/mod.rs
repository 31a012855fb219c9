//! Process-local redirect counters.

mod in_memory;

pub use in_memory::InMemoryRedirectionCountRepository;
