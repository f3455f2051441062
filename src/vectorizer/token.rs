use indexmap::IndexMap;
use num::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::utils::math::vector::SparseVec;

/// TermFrequency
/// Counts term occurrences within one document.
/// Base data for TF (term frequency) calculation.
///
/// # Examples
/// ```
/// use plagiarism_checker::TermFrequency;
/// let mut freq = TermFrequency::new();
/// freq.add_terms(&["hello", "world", "hello", "test"]);
///
/// let tf = freq.tf_vec::<f64>();
/// assert_eq!(tf.get("hello"), Some(0.5));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<Box<str>, u64>,
    total_term_count: u64,
}

/// term add / remove
impl TermFrequency {
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Count one occurrence of `term`
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(Box::from(term), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Count every occurrence in `terms`
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Reset all counts
    #[inline]
    pub fn clear(&mut self) {
        self.term_count.clear();
        self.total_term_count = 0;
    }
}

/// statistics
impl TermFrequency {
    /// occurrences of `term`, 0 when absent
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// total number of counted occurrences (document length in tokens)
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// distinct terms in first-seen order
    #[inline]
    pub fn term_set_ref_str(&self) -> Vec<&str> {
        self.term_count.keys().map(|t| t.as_ref()).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_term_count == 0
    }

    /// Term frequency vector: count / total for every distinct term.
    /// Empty when nothing has been counted.
    pub fn tf_vec<N>(&self) -> SparseVec<N>
    where
        N: Float,
    {
        if self.total_term_count == 0 {
            return SparseVec::new();
        }
        let total = self.total_term_count as f64;
        SparseVec::from_entries(self.term_count.iter().map(|(term, &count)| {
            let tf = <N as NumCast>::from(count as f64 / total).unwrap_or_else(N::zero);
            (term.clone(), tf)
        }))
    }
}

impl<T> FromIterator<T> for TermFrequency
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut freq = TermFrequency::new();
        for term in iter {
            freq.add_term(term.as_ref());
        }
        freq
    }
}

/// Term frequency of a token sequence.
///
/// Each distinct term maps to (occurrences / token count). An empty sequence
/// gives an empty vector.
pub fn term_frequency<T>(tokens: &[T]) -> SparseVec<f64>
where
    T: AsRef<str>,
{
    let mut freq = TermFrequency::new();
    freq.add_terms(tokens);
    freq.tf_vec()
}
