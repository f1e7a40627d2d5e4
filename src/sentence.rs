use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use itertools::Itertools;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::error::{Error, Result};

static VOCAB_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/vocab");

pub const DEFAULT_WORD_COUNT: usize = 10;

/// A non-empty list of words to build sentences from
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "RawVocabulary")]
pub struct Vocabulary {
    name: String,
    words: Vec<String>,
}

#[derive(Deserialize)]
struct RawVocabulary {
    name: String,
    words: Vec<String>,
}

impl TryFrom<RawVocabulary> for Vocabulary {
    type Error = Error;

    fn try_from(raw: RawVocabulary) -> Result<Self> {
        Vocabulary::new(raw.name, raw.words)
    }
}

impl Vocabulary {
    pub fn new(name: impl Into<String>, words: Vec<String>) -> Result<Self> {
        let name = name.into();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Err(Error::EmptyVocabulary(name));
        }

        Ok(Self { name, words })
    }

    /// The word list compiled into the binary
    pub fn builtin() -> Result<Self> {
        let file = VOCAB_DIR
            .get_file("default.json")
            .ok_or_else(|| Error::VocabularyNotFound("default.json".into()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::EmptyVocabulary("default".to_string()))?;

        Ok(serde_json::from_str(contents)?)
    }

    /// Load a word list from disk.
    ///
    /// `.json` files use the same `{ "name": .., "words": [..] }` shape as the
    /// builtin list; anything else is read as whitespace separated words.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::VocabularyNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let vocabulary = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents)?
        } else {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string());
            Self::new(name, contents.split_whitespace().map(str::to_string).collect())?
        };

        log::info!("loaded vocabulary from {}", path.display());
        Ok(vocabulary)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// Provides the sentence for each new game
pub trait SentenceSource {
    fn next_sentence(&mut self) -> String;
}

impl<S: SentenceSource + ?Sized> SentenceSource for Box<S> {
    fn next_sentence(&mut self) -> String {
        (**self).next_sentence()
    }
}

/// `count` words drawn uniformly, with replacement, joined by single spaces
pub struct RandomWords<R: Rng> {
    vocabulary: Vocabulary,
    count: usize,
    rng: R,
}

impl RandomWords<ThreadRng> {
    pub fn new(vocabulary: Vocabulary, count: usize) -> Self {
        Self::with_rng(vocabulary, count, rand::thread_rng())
    }
}

impl RandomWords<StdRng> {
    pub fn seeded(vocabulary: Vocabulary, count: usize, seed: u64) -> Self {
        Self::with_rng(vocabulary, count, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomWords<R> {
    pub fn with_rng(vocabulary: Vocabulary, count: usize, rng: R) -> Self {
        Self {
            vocabulary,
            count,
            rng,
        }
    }
}

impl<R: Rng> SentenceSource for RandomWords<R> {
    fn next_sentence(&mut self) -> String {
        let words = &self.vocabulary.words;
        let rng = &mut self.rng;
        (0..self.count)
            .filter_map(|_| words.choose(&mut *rng))
            .join(" ")
    }
}

/// Always the same sentence, for `--prompt`
#[derive(Debug, Clone)]
pub struct FixedPrompt(pub String);

impl SentenceSource for FixedPrompt {
    fn next_sentence(&mut self) -> String {
        self.0.clone()
    }
}
