//! Text normalization: raw text -> token sequence.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Debug;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::error::Result;

/// English stopwords removed when stopword filtering is enabled
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "you", "your", "yours", "yourself", "yourselves",
];

/// Reduces a token to its base form.
///
/// Plug a custom implementation into [`Preprocessor`] to bring in an external
/// NLP library; the engine itself only needs this trait.
pub trait Lemmatizer: Debug + Send + Sync {
    fn lemma<'a>(&self, token: &'a str) -> Cow<'a, str>;
}

/// Identity lemmatizer, the default
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLemmatizer;

impl Lemmatizer for NoLemmatizer {
    #[inline]
    fn lemma<'a>(&self, token: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(token)
    }
}

/// Snowball (Porter2) English stemmer
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
}

impl SnowballLemmatizer {
    pub fn english() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl Debug for SnowballLemmatizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SnowballLemmatizer(English)")
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn lemma<'a>(&self, token: &'a str) -> Cow<'a, str> {
        self.stemmer.stem(token)
    }
}

/// Set of tokens dropped before vectorization
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOP_WORDS)
    }

    /// Words are lowercased to match normalized tokens
    pub fn from_words<T>(words: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut stop_words = Self::new();
        stop_words.extend(words);
        stop_words
    }

    pub fn extend<T>(&mut self, words: &[T])
    where
        T: AsRef<str>,
    {
        self.words
            .extend(words.iter().map(|w| w.as_ref().to_lowercase().into_boxed_str()));
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Text preprocessor
///
/// Lowercases, extracts word-character runs, then optionally drops stopwords
/// and lemmatizes what is left. The default configuration does neither.
#[derive(Debug)]
pub struct Preprocessor {
    pattern: Option<Regex>,
    stop_words: Option<StopWords>,
    lemmatizer: Box<dyn Lemmatizer>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self {
            pattern: None,
            stop_words: None,
            lemmatizer: Box::new(NoLemmatizer),
        }
    }
}

impl Preprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom token regex instead of word-character runs.
    /// Every non-overlapping match becomes one token.
    pub fn with_token_pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    pub fn with_lemmatizer<L>(mut self, lemmatizer: L) -> Self
    where
        L: Lemmatizer + 'static,
    {
        self.lemmatizer = Box::new(lemmatizer);
        self
    }

    /// Normalize `text` into tokens.
    ///
    /// # Arguments
    /// * `text` - raw document text
    ///
    /// # Returns
    /// * `Vec<String>` - tokens in document order, empty for empty input
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let raw: Vec<&str> = match &self.pattern {
            Some(re) => re
                .find_iter(&lowered)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .collect(),
            None => lowered
                .split(|c: char| !is_word_char(c))
                .filter(|s| !s.is_empty())
                .collect(),
        };

        raw.into_iter()
            .filter(|tok| {
                self.stop_words
                    .as_ref()
                    .map_or(true, |stop| !stop.contains(tok))
            })
            .map(|tok| self.lemmatizer.lemma(tok).into_owned())
            .filter(|tok| !tok.is_empty())
            .collect()
    }
}

/// `\w` semantics: alphanumerics and the connector `_`
#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Preprocess with the default preprocessor (no stopwords, no lemmatizer)
pub fn preprocess(text: &str) -> Vec<String> {
    Preprocessor::default().preprocess(text)
}
