use ir_core::{FeedbackConfig, RawIndex, Retriever, Score, WeightingScheme};

fn index(entries: &[(&str, &[(u32, u32)])]) -> RawIndex {
    entries
        .iter()
        .map(|(term, docs)| (term.to_string(), docs.iter().copied().collect()))
        .collect()
}

fn pets() -> RawIndex {
    index(&[("cat", &[(1, 2), (2, 1)]), ("dog", &[(2, 3)])])
}

/// A small collection large enough for feedback to matter.
fn library() -> RawIndex {
    index(&[
        ("rust", &[(1, 4), (2, 2), (3, 1)]),
        ("borrow", &[(1, 3), (4, 1)]),
        ("checker", &[(1, 2), (4, 2)]),
        ("python", &[(5, 5), (6, 2)]),
        ("snake", &[(6, 3), (7, 1)]),
        ("compiler", &[(2, 3), (3, 2), (8, 1)]),
        ("lifetime", &[(1, 1), (2, 1), (4, 1)]),
        ("garden", &[(7, 4), (8, 2)]),
    ])
}

#[test]
fn binary_ties_resolve_by_document_id() {
    let r = Retriever::new(pets(), WeightingScheme::Binary, false).unwrap();
    let v = r.vectorize(&["cat"]);
    assert_eq!(v.get("cat"), Some(1.0));
    let ranked = r.rank(&["cat"]);
    assert_eq!(ranked.iter().map(|d| d.doc_id).collect::<Vec<_>>(), vec![1, 2]);
    assert!(ranked.iter().all(|d| d.score == Score::Scored(1.0)));
}

#[test]
fn tf_single_document_example() {
    let r = Retriever::new(index(&[("cat", &[(1, 4)])]), WeightingScheme::Tf, false).unwrap();
    assert_eq!(r.num_docs(), 1);
    let w = r.index().weight("cat", 1).unwrap();
    assert!((w - 2.386_294).abs() < 1e-6);

    let v = r.vectorize(&["cat", "cat"]);
    assert!((v.get("cat").unwrap() - 1.693_147).abs() < 1e-6);

    let ranked = r.rank(&["cat", "cat"]);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].doc_id, 1);
    assert!((ranked[0].score.value() - 1.693_147).abs() < 1e-6);
}

#[test]
fn unknown_terms_give_no_results() {
    for scheme in WeightingScheme::ALL {
        let r = Retriever::new(library(), scheme, false).unwrap();
        assert!(r.for_query(&["haskell", "monad"]).is_empty());
        assert!(r.for_query::<&str>(&[]).is_empty());
    }
}

#[test]
fn weights_are_non_negative() {
    for scheme in WeightingScheme::ALL {
        let r = Retriever::new(library(), scheme, false).unwrap();
        assert!(r.index().terms().all(|(_, docs)| docs.values().all(|&w| w >= 0.0)));
    }
}

#[test]
fn scoring_is_repeatable() {
    let r = Retriever::new(library(), WeightingScheme::TfIdf, true).unwrap();
    let query = ["rust", "compiler", "rust"];
    let first = r.rank(&query);
    let second = r.rank(&query);
    assert_eq!(first, second);
}

#[test]
fn rankings_are_non_increasing() {
    for scheme in WeightingScheme::ALL {
        let r = Retriever::new(library(), scheme, false).unwrap();
        let ranked = r.rank(&["rust", "lifetime", "garden"]);
        assert!(!ranked.is_empty());
        assert!(ranked.windows(2).all(|w| w[0].score.value() >= w[1].score.value()));
    }
}

#[test]
fn feedback_reaches_related_documents() {
    let plain = Retriever::new(library(), WeightingScheme::TfIdf, false).unwrap();
    let with_feedback = Retriever::new(library(), WeightingScheme::TfIdf, true).unwrap();

    let mut before = plain.for_query(&["borrow"]);
    before.sort();
    assert_eq!(before, vec![1, 4]);

    // expansion pulls rust and lifetime in from document 1
    let after = with_feedback.for_query(&["borrow"]);
    assert!(after.len() > before.len());
    assert!(after.contains(&2));
    assert!(!after.contains(&5));
}

#[test]
fn feedback_with_no_first_pass_results_is_plain_retrieval() {
    let r = Retriever::new(library(), WeightingScheme::Tf, true).unwrap();
    assert!(r.for_query(&["unknown"]).is_empty());
}

#[test]
fn feedback_depth_is_bounded_by_first_pass() {
    let narrow = FeedbackConfig { top_docs: 1, top_terms: 1 };
    let r = Retriever::new(library(), WeightingScheme::TfIdf, true).unwrap().with_feedback_config(narrow);
    // a single feedback term from the top document of the first pass
    let ranked = r.for_query(&["python"]);
    let wide = Retriever::new(library(), WeightingScheme::TfIdf, true)
        .unwrap()
        .with_feedback_config(FeedbackConfig { top_docs: 1000, top_terms: 1000 });
    let wider = wide.for_query(&["python"]);
    assert!(!ranked.is_empty());
    assert!(wider.len() >= ranked.len());
}

#[test]
fn retriever_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Retriever>();
}
