use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// keep document count and per-term document frequency
///
/// A term counts once per document no matter how often it occurs there.
/// `add_num`/`sub_num` double as a generation number: any membership change
/// moves it, which is how cached IDF tables notice they are stale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// documents added so far
    pub add_num: u64,
    /// documents dropped by `clear`
    pub sub_num: u64,
    /// document frequency per term
    #[serde(with = "indexmap::map::serde_seq")]
    pub term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from tokenized documents
    pub fn from_documents<T>(documents: &[Vec<T>]) -> Self
    where
        T: AsRef<str>,
    {
        let mut corpus = Self::new();
        for doc in documents {
            corpus.add_document(doc);
        }
        corpus
    }

    /// Add a document given its token sequence (duplicates allowed)
    pub fn add_document<T>(&mut self, tokens: &[T])
    where
        T: AsRef<str>,
    {
        self.add_num += 1;
        let mut seen: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
        seen.sort_unstable();
        seen.dedup();
        self.bump(&seen);
    }

    fn bump<T>(&mut self, terms: &[T])
    where
        T: AsRef<str>,
    {
        for term in terms {
            let term = term.as_ref();
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(Box::from(term), 1);
            }
        }
    }

    /// Drop every document; the generation keeps moving forward
    pub fn clear(&mut self) {
        self.sub_num = self.add_num;
        self.term_counts.clear();
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.add_num - self.sub_num
    }

    /// Get the generation number of the corpus
    #[inline]
    pub fn get_gen_num(&self) -> u64 {
        self.add_num + self.sub_num
    }

    /// Number of documents containing `term`
    #[inline]
    pub fn get_term_count(&self, term: &str) -> u64 {
        self.term_counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.term_counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.get_doc_num() == 0
    }

    /// `(term, document frequency)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.term_counts.iter().map(|(t, c)| (t.as_ref(), *c))
    }
}
