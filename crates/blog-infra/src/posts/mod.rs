//! Post repository implementations - PostgreSQL lives in `database`, this is the in-memory fallback.

mod memory;

pub use memory::InMemoryPostRepository;
