use std::fmt::Debug;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{utils::math::vector::SparseVec, vectorizer::{corpus::Corpus, token::TermFrequency}};

/// TF-IDF calculation engine.
///
/// Decides how a corpus turns into IDF weights. The TF side is plain
/// count / length for every engine shipped here.
pub trait TFIDFEngine: Debug + Send + Sync {
    /// IDF weight of a term found in `doc_freq` of `doc_num` documents.
    /// Only called with `1 <= doc_freq <= doc_num`.
    fn idf(&self, doc_num: u64, doc_freq: u64) -> f64;

    /// IDF table for every term of `corpus`
    fn idf_table(&self, corpus: &Corpus) -> IdfTable {
        let doc_num = corpus.get_doc_num();
        let weights = corpus
            .iter()
            .filter(|(_, doc_freq)| *doc_freq > 0)
            .map(|(term, doc_freq)| (Box::from(term), self.idf(doc_num, doc_freq)))
            .collect();
        IdfTable {
            weights,
            doc_num,
            latest_generation: corpus.get_gen_num(),
        }
    }

    /// TF vector of one document
    fn tf_vec(&self, freq: &TermFrequency) -> SparseVec<f64> {
        freq.tf_vec()
    }
}

/// Smoothed IDF, the default engine.
///
/// `idf = ln((1 + N) / (1 + df)) + 1`
///
/// Stays strictly positive for terms found in every document, so those terms
/// still count towards similarity on tiny corpora.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(&self, doc_num: u64, doc_freq: u64) -> f64 {
        ((1.0 + doc_num as f64) / (1.0 + doc_freq as f64)).ln() + 1.0
    }
}

/// Classic IDF: `idf = ln(N / df)`.
/// Terms present in every document weigh zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicTFIDFEngine;

impl TFIDFEngine for ClassicTFIDFEngine {
    #[inline]
    fn idf(&self, doc_num: u64, doc_freq: u64) -> f64 {
        if doc_freq == 0 || doc_num == 0 {
            return 0.0;
        }
        (doc_num as f64 / doc_freq as f64).ln().max(0.0)
    }
}

/// Runtime choice between the shipped engines (configuration / CLI)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdfFormula {
    #[default]
    Smoothed,
    Classic,
}

impl TFIDFEngine for IdfFormula {
    #[inline]
    fn idf(&self, doc_num: u64, doc_freq: u64) -> f64 {
        match self {
            IdfFormula::Smoothed => DefaultTFIDFEngine.idf(doc_num, doc_freq),
            IdfFormula::Classic => ClassicTFIDFEngine.idf(doc_num, doc_freq),
        }
    }
}

impl std::str::FromStr for IdfFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "smoothed" => Ok(IdfFormula::Smoothed),
            "classic" => Ok(IdfFormula::Classic),
            other => Err(format!("unknown idf formula `{other}` (expected smoothed or classic)")),
        }
    }
}

/// IDF weights of one corpus snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdfTable {
    #[serde(with = "indexmap::map::serde_seq")]
    weights: IndexMap<Box<str>, f64>,
    /// number of documents the table was computed over
    pub doc_num: u64,
    /// corpus generation the table was computed from
    pub latest_generation: u64,
}

impl IdfTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, term: &str) -> Option<f64> {
        self.weights.get(term).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.weights.iter().map(|(t, w)| (t.as_ref(), *w))
    }
}

/// Smoothed IDF over a tokenized corpus.
/// Zero documents give an empty table.
pub fn inverse_document_frequency<T>(corpus: &[Vec<T>]) -> IdfTable
where
    T: AsRef<str>,
{
    DefaultTFIDFEngine.idf_table(&Corpus::from_documents(corpus))
}

/// TF-IDF vector: `tf[term] * idf[term]` for exactly the terms of `tf`.
/// A term missing from `idf` weighs zero.
pub fn tfidf(tf: &SparseVec<f64>, idf: &IdfTable) -> SparseVec<f64> {
    tf.map_values(|term, value| value * idf.get(term).unwrap_or(0.0))
}
