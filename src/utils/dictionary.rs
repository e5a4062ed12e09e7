use crate::core::extractor::EntryExtractor;
use crate::core::loader::{letter_key, LetterSource, XmlDirectoryLoader};
use crate::core::matcher::find_entries;
use crate::core::model::Definition;
use crate::core::renderer::{PlaintextRenderer, RenderOptions};
use crate::error::{LittreError, Result};
use log::{debug, info};
use rayon::prelude::*;
use std::path::PathBuf;

/// Query entry point: word in, [`Definition`] or rendered text out.
pub struct Dictionary<S: LetterSource = XmlDirectoryLoader> {
    source: S,
}

impl Dictionary<XmlDirectoryLoader> {
    /// Dictionary backed by a directory of `a.xml` … `z.xml` files.
    pub fn open(directory: impl Into<PathBuf>) -> Self {
        Self::new(XmlDirectoryLoader::new(directory))
    }
}

impl<S: LetterSource> Dictionary<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Every sense of `word`, keyed by sense id.
    pub fn lookup(&self, word: &str) -> Result<Definition> {
        let word = word.trim();
        let first = word
            .chars()
            .next()
            .ok_or_else(|| LittreError::InvalidLetterInput(String::new()))?;
        let letter = letter_key(&first.to_string())?;
        let tree = self.source.letter_tree(letter)?;

        let entries = find_entries(&tree, word)?
            .map(EntryExtractor::extract)
            .collect::<Result<Vec<_>>>()?;
        debug!("{} matched {} entries in letter {}", word, entries.len(), letter);

        Ok(Definition::from_entries(word.to_uppercase(), entries))
    }

    /// Look `word` up and render it as plaintext.
    pub fn define(&self, word: &str, options: &RenderOptions) -> Result<String> {
        let definition = self.lookup(word)?;
        Ok(PlaintextRenderer::new(*options).render(&definition))
    }

    /// Look several words up in parallel. Results keep the order of `words`.
    pub fn lookup_many<W: AsRef<str> + Sync>(&self, words: &[W]) -> Vec<(String, Result<Definition>)> {
        info!("looking up {} words", words.len());
        words
            .par_iter()
            .map(|w| (w.as_ref().to_string(), self.lookup(w.as_ref())))
            .collect()
    }
}
