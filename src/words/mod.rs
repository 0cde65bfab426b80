pub mod bundled;
pub mod loader;
pub mod pool;

pub use bundled::BundledList;
pub use loader::{load_or_fallback, load_word_list, LoadOptions, PoolOrigin, WordSource};
pub use pool::{WordEntry, WordPool};
