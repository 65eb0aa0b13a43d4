pub mod memory;
pub mod postgres;
pub mod sink;

pub use memory::{CountingSink, MemorySink};
pub use postgres::{PostgresKeywordSink, MAX_BATCH_ROWS};
pub use sink::KeywordSink;
