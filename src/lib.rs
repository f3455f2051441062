/// This crate is a Plagiarism Checker using TF-IDF vectors and cosine similarity.
pub mod vectorizer;
pub mod utils;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

/// Plagiarism Checker
/// The top-level struct of this crate.
/// It holds an ordered working set of documents and scores every pair of them
/// by cosine similarity of their TF-IDF vectors.
///
/// Internally, it holds:
/// - The documents (name, text, tokens, TF vector)
/// - The corpus statistics of the working set
/// - An IDF cache, refreshed when the working set changes
/// - A preprocessor
/// - A TF-IDF calculation engine
///
/// `PlagiarismChecker<E>` has one generic parameter:
/// - `E`: TF-IDF calculation engine type (e.g., IdfFormula, DefaultTFIDFEngine)
///
/// IDF is shared across the working set: adding a document can change the
/// score of pairs that do not involve it.
pub use vectorizer::PlagiarismChecker;

/// Single comparison with default settings
pub use vectorizer::check_plagiarism;

/// Corpus statistics
/// Manages:
/// - The number of documents
/// - The number of documents in which each term appears
///
/// It is the base data for IDF (Inverse Document Frequency) calculation.
pub use vectorizer::corpus::Corpus;

/// Term Frequency structure
/// Counts term occurrences within one document and the total number of terms.
/// Used as base data for TF (Term Frequency) calculation.
pub use vectorizer::token::{term_frequency, TermFrequency};

/// TF IDF Calculation Engine Trait
/// Defines how a corpus turns into IDF weights.
///
/// Provided engines:
/// - `DefaultTFIDFEngine`: smoothed IDF, `ln((1 + N) / (1 + df)) + 1`
/// - `ClassicTFIDFEngine`: textbook IDF, `ln(N / df)`
/// - `IdfFormula`: runtime choice between the two
pub use vectorizer::tfidf::{
    inverse_document_frequency, tfidf, ClassicTFIDFEngine, DefaultTFIDFEngine, IdfFormula, IdfTable,
    TFIDFEngine,
};

/// Text preprocessing: lowercasing, tokenization, optional stopword removal
/// and lemmatization.
pub use vectorizer::preprocess::{preprocess, Preprocessor, StopWords};

/// Cosine similarity of two sparse vectors, clamped to [0, 1]
pub use vectorizer::compare::cosine_similarity;

/// Sparse vector keyed by term
pub use utils::math::vector::SparseVec;

/// Pair results
/// - `PairHits`: every compared pair, with sorting and threshold filtering
/// - `PairHit`: one pair and its score
/// - `DocKey`: position and name of a document
pub use vectorizer::evaluate::scoring::{DocKey, PairHit, PairHits};

pub use config::CheckerConfig;
pub use error::{CheckerError, Result};
