pub mod core {
    pub mod markup;
    pub mod model;
    pub mod matcher;
    pub mod extractor;
    pub mod renderer;
    pub mod loader;
}

pub mod utils {
    pub mod normalization;
    pub mod wrap;
    pub mod dictionary;
}

pub mod error;

pub use crate::core::extractor::EntryExtractor;
pub use crate::core::loader::{letter_key, LetterSource, XmlDirectoryLoader};
pub use crate::core::markup::{MarkupNode, MarkupTree};
pub use crate::core::matcher::{build_female, find_entries, Matches};
pub use crate::core::model::{Citation, Definition, Entry, EntryHeader, HistoryItem, SubItem, Variant};
pub use crate::core::renderer::{PlaintextRenderer, RenderOptions};
pub use crate::error::{LittreError, Result};
pub use crate::utils::dictionary::Dictionary;
