// Fri Oct 16 2026 - Alex

pub mod entry;
pub mod error;
pub mod store;

pub use entry::CacheEntry;
pub use error::{CacheError, CacheResult};
pub use store::CacheStore;

pub const DEFAULT_CACHE_FILE: &str = "streaming_cache.json";
