pub mod dictionary;
pub mod entry;
pub mod error;
pub mod index;
pub mod language;
pub mod library;
pub mod matcher;
pub mod normalize;
pub mod preprocess;
pub mod protect;
pub mod redirect;
pub mod render;
pub mod store;
pub mod titles;
pub mod vocabulary;

pub use entry::{Entry, parse_redirect};
pub use error::ResolveError;
pub use index::EntryIndex;
pub use library::{Library, LookupHit, Page, Translation};
pub use matcher::match_entries;
pub use normalize::normalize;
pub use protect::{PlaceholderTable, Protected, SpanKind, protect};
pub use redirect::{Resolved, Resolver, resolve};
pub use render::{RenderOptions, RenderedPage, Renderer, render};
pub use store::{EntryStore, MemoryStore};
pub use titles::TitleMap;
pub use vocabulary::{VocabularyMap, translate_by_vocabulary};
