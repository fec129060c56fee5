mod translation;

pub use translation::CacheError;
pub use translation::Lookup;
pub use translation::TranslationCache;
pub use translation::flush_snapshot;
pub use translation::load_snapshot;
