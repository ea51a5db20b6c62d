use ir_core::tokenizer::{tokenize, TokenizerOptions};

const FULL: TokenizerOptions = TokenizerOptions { stoplist: true, stemming: true };

#[test]
fn it_normalizes_and_stems() {
    let words = tokenize("Running Runners ＲＵＮ! The menu.", FULL);
    // Stemming to "run" should appear
    assert!(words.contains(&"run".to_string()));
    // NFKC folds full-width letters
    assert_eq!(words.iter().filter(|w| *w == "run").count(), 2);
    assert!(words.contains(&"menu".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog", FULL);
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
}

#[test]
fn stoplist_is_optional() {
    let words = tokenize("The quick brown fox and the lazy dog", TokenizerOptions { stoplist: false, stemming: false });
    assert_eq!(words.len(), 8);
    assert_eq!(words[0], "the");
}
