use crate::core::markup::MarkupTree;
use crate::error::{LittreError, Result};
use crate::utils::normalization::fold_accents;
use log::{debug, info};
use memmap2::Mmap;
use rayon::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Files above this size are memory-mapped instead of read into a buffer.
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;
const LETTER_COUNT: usize = 26;

/// Anything that can hand out the parsed tree of one letter of the dictionary.
pub trait LetterSource: Send + Sync {
    /// `letter` is a lowercase ASCII letter, as returned by [`letter_key`].
    fn letter_tree(&self, letter: char) -> Result<Arc<MarkupTree>>;
}

/// Reduce the first letter of a word to the key selecting its letter file:
/// accent-folded, lowercase, exactly one ASCII alphabetic character.
pub fn letter_key(input: &str) -> Result<char> {
    let folded = fold_accents(input).to_lowercase();
    let mut chars = folded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c),
        _ => Err(LittreError::InvalidLetterInput(input.to_string())),
    }
}

/// Loads `{directory}/{letter}.xml` files on first use and keeps them for the
/// loader's lifetime. Each letter is parsed at most once, even under concurrent
/// first access; distinct letters load in parallel.
pub struct XmlDirectoryLoader {
    directory: PathBuf,
    slots: Vec<Mutex<Option<Arc<MarkupTree>>>>,
}

impl XmlDirectoryLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            slots: (0..LETTER_COUNT).map(|_| Mutex::new(None)).collect(),
        }
    }

    pub fn letter_path(&self, letter: char) -> PathBuf {
        self.directory.join(format!("{letter}.xml"))
    }

    /// Load several letters in parallel, stopping at the first failure.
    pub fn preload(&self, letters: &str) -> Result<()> {
        let keys = letters
            .chars()
            .map(|c| letter_key(&c.to_string()))
            .collect::<Result<Vec<_>>>()?;
        keys.par_iter().try_for_each(|&letter| self.letter_tree(letter).map(|_| ()))
    }

    /// Letters whose tree is already cached, in alphabetical order.
    pub fn cached_letters(&self) -> Vec<char> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.lock().map(|tree| tree.is_some()).unwrap_or(false))
            .map(|(i, _)| (b'a' + i as u8) as char)
            .collect()
    }

    fn read_tree(&self, path: &Path) -> Result<MarkupTree> {
        let io_err = |source| LittreError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_err)?;
        let size = file.metadata().map_err(io_err)?.len();

        if size > MMAP_THRESHOLD {
            debug!("mapping {} ({} bytes)", path.display(), size);
            let mmap = unsafe { Mmap::map(&file).map_err(io_err)? };
            MarkupTree::parse(std::str::from_utf8(&mmap)?)
        } else {
            let xml = std::fs::read_to_string(path).map_err(io_err)?;
            MarkupTree::parse(&xml)
        }
    }
}

impl LetterSource for XmlDirectoryLoader {
    fn letter_tree(&self, letter: char) -> Result<Arc<MarkupTree>> {
        let letter = letter_key(&letter.to_string())?;
        let index = (letter as u8 - b'a') as usize;
        let mut slot = self.slots[index].lock().map_err(|_| LittreError::LockPoisoned)?;

        if let Some(tree) = slot.as_ref() {
            return Ok(Arc::clone(tree));
        }

        let path = self.letter_path(letter);
        let tree = Arc::new(self.read_tree(&path)?);
        info!(
            "loaded letter {} from {} ({} entries)",
            letter,
            path.display(),
            tree.entries().count()
        );
        *slot = Some(Arc::clone(&tree));
        Ok(tree)
    }
}
