use sift_core::{Analyzer, Token};

#[test]
fn it_normalizes_and_stems() {
    let analyzer = Analyzer::new();
    let words: Vec<String> = analyzer
        .analyze("Running Runners RUN!")
        .map(|t| t.term)
        .collect();
    assert!(words.contains(&"run".to_string()));
    assert!(!words.iter().any(|w| w.chars().any(|c| c.is_uppercase())));
}

#[test]
fn it_filters_stopwords() {
    let analyzer = Analyzer::new();
    let words: Vec<String> = analyzer
        .analyze("The quick brown fox and the lazy dog")
        .map(|t| t.term)
        .collect();
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn offsets_index_the_original_text() {
    let analyzer = Analyzer::new();
    let text = "Stemming keeps Offsets honest, even with 武汉 and café!";
    let tokens: Vec<Token> = analyzer.analyze(text).collect();
    assert!(!tokens.is_empty());

    let mut previous_end = 0;
    for token in &tokens {
        assert!(token.start < token.end);
        assert!(token.end <= text.len());
        assert!(token.start >= previous_end, "offsets must not overlap");
        previous_end = token.end;
        // The span must slice cleanly out of the original input.
        let slice = &text[token.start..token.end];
        assert!(!slice.is_empty());
    }
}

#[test]
fn positions_keep_gaps_for_stopwords() {
    let analyzer = Analyzer::new();
    let positions: Vec<u32> = analyzer.analyze("alpha the beta").map(|t| t.position).collect();
    assert_eq!(positions, [0, 2]);
}

#[test]
fn analysis_is_idempotent() {
    let analyzer = Analyzer::new();
    let text = "Deterministic analyzers produce identical token streams.";
    let first: Vec<Token> = analyzer.analyze(text).collect();
    let second: Vec<Token> = analyzer.analyze(text).collect();
    assert_eq!(first, second);
}

#[test]
fn empty_input_yields_empty_stream() {
    let analyzer = Analyzer::new();
    assert_eq!(analyzer.analyze("").count(), 0);
    assert_eq!(analyzer.analyze("   \n\t ").count(), 0);
}
