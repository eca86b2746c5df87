pub mod prefs;

pub use prefs::{FileStore, KeyValueStore};
#[cfg(test)]
pub use prefs::MemoryStore;
