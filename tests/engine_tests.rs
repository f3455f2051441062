use plagiarism_checker::{
    check_plagiarism, cosine_similarity, inverse_document_frequency, preprocess, term_frequency,
    tfidf, PlagiarismChecker, SparseVec,
};

const ML_A: &str = "Machine learning is a subset of artificial intelligence.";
const ML_B: &str = "Machine learning represents a branch of artificial intelligence.";

#[test]
fn related_sentences_score_in_the_middle() {
    let checker = PlagiarismChecker::new();
    let score = checker.compare_documents(ML_A, ML_B);
    assert!(score > 0.4 && score < 0.8, "score was {score}");
}

#[test]
fn identical_text_scores_one() {
    let checker = PlagiarismChecker::new();
    assert_eq!(checker.compare_documents(ML_A, ML_A), 1.0);
    assert_eq!(check_plagiarism("Hello, world", "hello world!"), 1.0);
}

#[test]
fn unrelated_text_scores_zero() {
    let checker = PlagiarismChecker::new();
    assert_eq!(checker.compare_documents("abc", "xyz"), 0.0);
    assert_eq!(checker.compare_documents("", "xyz"), 0.0);
    assert_eq!(checker.compare_documents("", ""), 0.0);
    assert_eq!(checker.compare_documents("...", "!!!"), 0.0);
}

#[test]
fn comparison_is_symmetric() {
    let checker = PlagiarismChecker::new();
    assert_eq!(
        checker.compare_documents(ML_A, ML_B),
        checker.compare_documents(ML_B, ML_A)
    );
}

#[test]
fn free_functions_compose_into_a_score() {
    let docs = vec![preprocess(ML_A), preprocess(ML_B)];
    let idf = inverse_document_frequency(&docs);
    let a = tfidf(&term_frequency(&docs[0]), &idf);
    let b = tfidf(&term_frequency(&docs[1]), &idf);
    let score = cosine_similarity(&a, &b);
    assert_eq!(score, PlagiarismChecker::new().compare_documents(ML_A, ML_B));
}

#[test]
fn all_pairs_come_in_lexical_order() {
    let mut checker = PlagiarismChecker::new();
    for text in ["one two", "two three", "three four", "four five"] {
        checker.add_document(text, None);
    }
    let hits = checker.check_all_pairs();
    assert_eq!(hits.len(), 4 * 3 / 2);
    let order: Vec<(usize, usize)> = hits.iter().map(|h| (h.left.index, h.right.index)).collect();
    assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    assert_eq!(&*hits.list[0].left.name, "Document 1");
    assert_eq!(&*hits.list[5].right.name, "Document 4");
}

#[test]
fn shared_and_disjoint_documents() {
    let mut checker = PlagiarismChecker::new();
    checker.add_document("the quick brown fox", Some("A"));
    checker.add_document("the quick brown fox", Some("B"));
    checker.add_document("lorem ipsum dolor", Some("C"));
    let hits = checker.check_all_pairs();
    let scores: Vec<(usize, usize, f64)> = hits.iter().map(|h| h.as_tuple()).collect();
    assert_eq!(scores.len(), 3);
    assert_eq!((scores[0].0, scores[0].1), (0, 1));
    assert!((scores[0].2 - 1.0).abs() < 1e-9);
    assert_eq!(scores[1], (0, 2, 0.0));
    assert_eq!(scores[2], (1, 2, 0.0));
}

#[test]
fn store_of_two_matches_direct_comparison() {
    let mut checker = PlagiarismChecker::new();
    checker.add_document(ML_A, None);
    checker.add_document(ML_B, None);
    let hits = checker.check_all_pairs();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.list[0].score, checker.compare_documents(ML_A, ML_B));
}

#[test]
fn third_document_changes_shared_idf() {
    let a = "apple banana cherry";
    let b = "apple banana date";
    let mut checker = PlagiarismChecker::new();
    checker.add_document(a, None);
    checker.add_document(b, None);
    checker.add_document("apple grape", None);
    let shared = checker.check_all_pairs().get(0, 1).map(|h| h.score).unwrap();
    let isolated = checker.compare_documents(a, b);
    assert!((shared - isolated).abs() > 1e-6, "{shared} vs {isolated}");
}

#[test]
fn multiple_documents_leave_the_working_set_alone() {
    let mut checker = PlagiarismChecker::new();
    checker.add_document("kept", None);
    let hits = checker.compare_multiple_documents(&["a b", "a c", "d"]);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits.get(2, 0).map(|h| h.score), Some(0.0));
    assert_eq!(checker.len(), 1);
    assert!(checker.check_all_pairs().is_empty());
}

#[test]
fn scores_stay_in_unit_range() {
    let texts = [
        "to be or not to be",
        "to be is to do",
        "do be do be do",
        "",
        "not not not",
    ];
    let hits = PlagiarismChecker::new().compare_multiple_documents(&texts);
    assert_eq!(hits.len(), 10);
    for hit in &hits {
        assert!((0.0..=1.0).contains(&hit.score), "{hit:?}");
    }
}

#[test]
fn empty_vector_never_matches() {
    let v: SparseVec = [("x", 1.0)].into_iter().collect();
    assert_eq!(cosine_similarity(&v, &SparseVec::new()), 0.0);
    assert_eq!(cosine_similarity(&SparseVec::<f64>::new(), &SparseVec::new()), 0.0);
}

#[test]
fn extreme_magnitudes_keep_their_scores() {
    let huge: SparseVec = [("x", 1e200)].into_iter().collect();
    assert_eq!(cosine_similarity(&huge, &huge), 1.0);

    let a: SparseVec = [("x", 1e-160)].into_iter().collect();
    let b: SparseVec = [("x", 1e-160), ("y", 1e-160)].into_iter().collect();
    let score = cosine_similarity(&a, &b);
    assert!((score - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12, "score was {score}");
}
