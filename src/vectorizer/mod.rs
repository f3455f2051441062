pub mod compare;
pub mod corpus;
pub mod evaluate;
pub mod preprocess;
pub mod tfidf;
pub mod token;

use std::borrow::Borrow;

use rayon::prelude::*;

use crate::config::CheckerConfig;
use crate::error::Result;
use crate::utils::math::vector::SparseVec;
use crate::vectorizer::{
    compare::cosine_similarity,
    corpus::Corpus,
    evaluate::scoring::{DocKey, PairHit, PairHits},
    preprocess::Preprocessor,
    tfidf::{tfidf, IdfFormula, IdfTable, TFIDFEngine},
    token::TermFrequency,
};

/// One document of the working set
///
/// Tokens and the TF vector are computed once, when the document is added.
#[derive(Debug, Clone)]
pub struct Document {
    key: DocKey,
    text: String,
    tokens: Vec<String>,
    tf_vec: SparseVec<f64>,
}

impl Document {
    pub fn key(&self) -> &DocKey {
        &self.key
    }

    pub fn index(&self) -> usize {
        self.key.index
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn tf_vec(&self) -> &SparseVec<f64> {
        &self.tf_vec
    }
}

/// Default name of the document at 1-based `position`
pub fn default_document_name(position: usize) -> String {
    format!("Document {}", position)
}

/// Plagiarism checker: document store and pairwise comparator.
///
/// Holds an ordered working set of documents and scores every unordered
/// pair by cosine similarity of their TF-IDF vectors. IDF weights are shared
/// across the whole set, so the score of a pair depends on which other
/// documents are present. [`compare_documents`](Self::compare_documents)
/// scores two texts against a corpus of just those two.
///
/// `E` decides the IDF formula; the default [`IdfFormula`] is smoothed
/// unless configured otherwise.
///
/// One checker per caller session. Mutation goes through `&mut self`.
#[derive(Debug)]
pub struct PlagiarismChecker<E = IdfFormula>
where
    E: TFIDFEngine,
{
    documents: Vec<Document>,
    corpus: Corpus,
    /// IDF cache, stale when its generation differs from the corpus
    idf_cache: IdfTable,
    preprocessor: Preprocessor,
    engine: E,
}

impl PlagiarismChecker<IdfFormula> {
    pub fn new() -> Self {
        Self::with_engine(IdfFormula::default())
    }

    /// Checker with the preprocessing and IDF formula of `config`
    pub fn from_config(config: &CheckerConfig) -> Result<Self> {
        Ok(Self::with_engine(config.scoring.idf).with_preprocessor(config.build_preprocessor()?))
    }
}

impl Default for PlagiarismChecker<IdfFormula> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> PlagiarismChecker<E>
where
    E: TFIDFEngine,
{
    pub fn with_engine(engine: E) -> Self {
        let mut instance = Self {
            documents: Vec::new(),
            corpus: Corpus::new(),
            idf_cache: IdfTable::new(),
            preprocessor: Preprocessor::default(),
            engine,
        };
        instance.re_calc_idf();
        instance
    }

    /// Replace the preprocessor.
    /// Documents already in the working set keep their tokens.
    pub fn with_preprocessor(mut self, preprocessor: Preprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Tokenize `text` with this checker's preprocessor
    pub fn preprocess(&self, text: &str) -> Vec<String> {
        self.preprocessor.preprocess(text)
    }

    fn term_frequency(&self, tokens: &[String]) -> SparseVec<f64> {
        let mut freq = TermFrequency::new();
        freq.add_terms(tokens);
        self.engine.tf_vec(&freq)
    }
}

/// working set
impl<E> PlagiarismChecker<E>
where
    E: TFIDFEngine,
{
    /// Add a document to the working set.
    /// Without a name it is called `Document {n}`, n being its 1-based position.
    pub fn add_document(&mut self, text: &str, name: Option<&str>) -> DocKey {
        let index = self.documents.len();
        let name = match name {
            Some(name) => name.to_string(),
            None => default_document_name(index + 1),
        };
        let tokens = self.preprocess(text);
        let tf_vec = self.term_frequency(&tokens);
        self.corpus.add_document(&tokens);

        tracing::debug!(
            index,
            name = %name,
            tokens = tokens.len(),
            terms = tf_vec.len(),
            "document added"
        );

        let key = DocKey::new(index, name);
        self.documents.push(Document {
            key: key.clone(),
            text: text.to_string(),
            tokens,
            tf_vec,
        });
        key
    }

    /// Empty the working set
    pub fn clear_documents(&mut self) {
        tracing::debug!(removed = self.documents.len(), "documents cleared");
        self.documents.clear();
        self.corpus.clear();
        self.re_calc_idf();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// IDF table of the working set as of the last refresh
    pub fn idf(&self) -> &IdfTable {
        &self.idf_cache
    }

    /// Recompute the IDF table if the working set changed since the last one
    pub fn update_idf(&mut self) {
        if self.corpus.get_gen_num() != self.idf_cache.latest_generation {
            self.re_calc_idf();
        }
    }

    fn re_calc_idf(&mut self) {
        self.idf_cache = self.engine.idf_table(&self.corpus);
        tracing::debug!(
            documents = self.idf_cache.doc_num,
            terms = self.idf_cache.len(),
            generation = self.idf_cache.latest_generation,
            "idf recalculated"
        );
    }
}

/// comparison
impl<E> PlagiarismChecker<E>
where
    E: TFIDFEngine,
{
    /// Similarity of two texts.
    ///
    /// IDF is computed over a corpus of exactly these two texts, so the
    /// result does not depend on the working set. A checker holding exactly
    /// these two documents gives the same score from `check_all_pairs`.
    pub fn compare_documents(&self, text1: &str, text2: &str) -> f64 {
        let tokens = [self.preprocess(text1), self.preprocess(text2)];
        let tf_vecs = [self.term_frequency(&tokens[0]), self.term_frequency(&tokens[1])];
        let idf = self.engine.idf_table(&Corpus::from_documents(&tokens));
        let vectors = vectorize(&tf_vecs, &idf);
        let score = cosine_similarity(&vectors[0], &vectors[1]);
        tracing::trace!(score, "compared two documents");
        score
    }

    /// Similarity of every unordered pair in the working set.
    ///
    /// All documents are vectorized against one IDF table built from the
    /// whole set. Pairs `(i, j)`, `i < j`, come in ascending order;
    /// fewer than two documents give an empty result.
    pub fn check_all_pairs(&mut self) -> PairHits {
        self.update_idf();
        self.check_all_pairs_uncheck_idf()
    }

    /// Same as [`check_all_pairs`](Self::check_all_pairs) without refreshing
    /// the IDF cache first. Call `update_idf()` yourself after adding
    /// documents.
    pub fn check_all_pairs_uncheck_idf(&self) -> PairHits {
        if self.documents.len() < 2 {
            return PairHits::default();
        }
        let tf_vecs: Vec<&SparseVec<f64>> = self.documents.iter().map(|doc| &doc.tf_vec).collect();
        let vectors = vectorize(&tf_vecs, &self.idf_cache);
        let keys: Vec<&DocKey> = self.documents.iter().map(|doc| &doc.key).collect();
        let hits = all_pairs(&keys, &vectors);
        tracing::debug!(
            documents = self.documents.len(),
            pairs = hits.len(),
            "checked all pairs"
        );
        hits
    }

    /// One-shot pairwise comparison of `texts` with a shared IDF table.
    ///
    /// Leaves the working set untouched. Documents get default names and
    /// their position in `texts` as index.
    pub fn compare_multiple_documents<T>(&self, texts: &[T]) -> PairHits
    where
        T: AsRef<str>,
    {
        if texts.len() < 2 {
            return PairHits::default();
        }
        let tokens: Vec<Vec<String>> = texts.iter().map(|t| self.preprocess(t.as_ref())).collect();
        let tf_vecs: Vec<SparseVec<f64>> = tokens.iter().map(|t| self.term_frequency(t)).collect();
        let idf = self.engine.idf_table(&Corpus::from_documents(&tokens));
        let vectors = vectorize(&tf_vecs, &idf);
        let keys: Vec<DocKey> = (0..texts.len())
            .map(|i| DocKey::new(i, default_document_name(i + 1)))
            .collect();
        let key_refs: Vec<&DocKey> = keys.iter().collect();
        all_pairs(&key_refs, &vectors)
    }
}

/// TF-IDF vectors of every TF vector against one IDF table, order kept
fn vectorize<V>(tf_vecs: &[V], idf: &IdfTable) -> Vec<SparseVec<f64>>
where
    V: Borrow<SparseVec<f64>> + Sync,
{
    tf_vecs.par_iter().map(|tf| tfidf(tf.borrow(), idf)).collect()
}

/// Every unordered pair `(i, j)`, `i < j`, in ascending order
fn all_pairs(keys: &[&DocKey], vectors: &[SparseVec<f64>]) -> PairHits {
    let n = vectors.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();
    let list = pairs
        .par_iter()
        .map(|&(i, j)| {
            let score = cosine_similarity(&vectors[i], &vectors[j]);
            tracing::trace!(left = i, right = j, score, "pair scored");
            PairHit {
                left: keys[i].clone(),
                right: keys[j].clone(),
                score,
            }
        })
        .collect();
    PairHits::new(list)
}

/// Similarity of two texts with a default checker
pub fn check_plagiarism(text1: &str, text2: &str) -> f64 {
    PlagiarismChecker::new().compare_documents(text1, text2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::tfidf::{ClassicTFIDFEngine, DefaultTFIDFEngine};

    #[test]
    fn default_names_are_one_based() {
        let mut checker = PlagiarismChecker::new();
        let first = checker.add_document("one", None);
        let second = checker.add_document("two", Some("essay.txt"));
        let third = checker.add_document("three", None);
        assert_eq!(&*first.name, "Document 1");
        assert_eq!(&*second.name, "essay.txt");
        assert_eq!(&*third.name, "Document 3");
        assert_eq!(third.index, 2);
    }

    #[test]
    fn documents_keep_text_and_tokens() {
        let mut checker = PlagiarismChecker::new();
        checker.add_document("Hello, World!", None);
        let doc = checker.document(0).unwrap();
        assert_eq!(doc.text(), "Hello, World!");
        assert_eq!(doc.tokens(), ["hello", "world"]);
        assert_eq!(doc.tf_vec().get("hello"), Some(0.5));
    }

    #[test]
    fn idf_refreshes_after_membership_changes() {
        let mut checker = PlagiarismChecker::new();
        checker.add_document("a b", None);
        checker.add_document("a c", None);
        assert!(checker.idf().is_empty());
        checker.check_all_pairs();
        assert_eq!(checker.idf().doc_num, 2);

        checker.add_document("a d", None);
        checker.check_all_pairs();
        assert_eq!(checker.idf().doc_num, 3);
        assert_eq!(checker.idf().get("a"), Some(1.0));
    }

    #[test]
    fn clear_resets_everything() {
        let mut checker = PlagiarismChecker::new();
        checker.add_document("a b", None);
        checker.add_document("a c", None);
        checker.check_all_pairs();
        checker.clear_documents();
        assert!(checker.is_empty());
        assert!(checker.corpus().is_empty());
        assert!(checker.idf().is_empty());
        assert!(checker.check_all_pairs().is_empty());

        let key = checker.add_document("fresh", None);
        assert_eq!(&*key.name, "Document 1");
    }

    #[test]
    fn fewer_than_two_documents_give_no_pairs() {
        let mut checker = PlagiarismChecker::new();
        assert!(checker.check_all_pairs().is_empty());
        checker.add_document("only one", None);
        assert!(checker.check_all_pairs().is_empty());
        assert!(checker.compare_multiple_documents(&["only one"]).is_empty());
    }

    #[test]
    fn uncheck_idf_uses_the_cached_table() {
        let mut checker = PlagiarismChecker::with_engine(DefaultTFIDFEngine);
        checker.add_document("alpha beta", None);
        checker.add_document("alpha gamma", None);
        checker.update_idf();
        let cached = checker.check_all_pairs_uncheck_idf();
        assert_eq!(cached, checker.check_all_pairs());
    }

    #[test]
    fn classic_engine_ignores_shared_terms() {
        // every shared term weighs zero under ln(N / df)
        let checker = PlagiarismChecker::with_engine(ClassicTFIDFEngine);
        assert_eq!(checker.compare_documents("same words here", "same words there"), 0.0);
        assert!(check_plagiarism("same words here", "same words there") > 0.0);
    }

    #[test]
    fn from_config_applies_preprocessing() {
        let config = CheckerConfig::from_toml_str("[preprocess]\nstopwords = true").unwrap();
        let checker = PlagiarismChecker::from_config(&config).unwrap();
        assert_eq!(checker.preprocess("the cat"), vec!["cat"]);
        assert_eq!(checker.compare_documents("the cat", "a cat"), 1.0);
    }
}
