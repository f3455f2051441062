use plagiarism_checker::{check_plagiarism, PlagiarismChecker, Preprocessor, StopWords};

fn main() {
    let original = "Machine learning is a subset of artificial intelligence.";
    let suspect = "Machine learning represents a branch of artificial intelligence.";

    // one-off comparison
    println!("check_plagiarism: {:.4}", check_plagiarism(original, suspect));

    // working set with shared IDF
    let mut checker = PlagiarismChecker::new()
        .with_preprocessor(Preprocessor::new().with_stop_words(StopWords::english()));
    checker.add_document(original, Some("original"));
    checker.add_document(suspect, Some("suspect"));
    checker.add_document("Rust is a systems programming language.", None);

    let mut hits = checker.check_all_pairs();
    hits.sort_by_score_desc();

    // print result
    println!("Pair Results: \n{}", hits);
    // debug
    println!("{:#?}", hits);
}
