//! Save-game storage adapters.

mod memory;
mod sqlite;

pub use memory::InMemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;
