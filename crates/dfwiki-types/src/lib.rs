pub mod types;

pub use types::{Language, TitlePair};
