pub mod entries;
pub mod error;
pub mod translation_map;

pub use entries::load_entries;
pub use error::LoadError;
pub use translation_map::TranslationMap;
