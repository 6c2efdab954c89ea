pub mod dictionary;
pub mod format;
pub mod lemmatizer;
pub mod loader;
pub mod processor;

pub use dictionary::{DictionaryError, EnglishDictionary, EnglishEntry, LemmaMatch};
pub use format::format_entry_html;
pub use lemmatizer::EnglishLemmatizer;
pub use loader::EnglishDictionaryLoader;
pub use processor::EnglishProcessor;
