//! Integration tests for token identity and the copy model.

use arbor::token::TokenNode;

fn subject() -> TokenNode {
    let node = TokenNode::from_word("Pudong");
    node.set_doc_id("d1");
    node.set_sentence_index(0);
    node.set_token_index(2);
    node.set_lemma("Pudong");
    node
}

#[test]
fn test_soft_copy_chain_resolves_to_true_original() {
    let original = subject();
    let first = original.make_soft_copy_indexed(1);
    let second = first.make_soft_copy();

    assert_eq!(second.copy_index(), 2);
    assert_eq!(second.original().unwrap(), &original);
    assert_ne!(second.original().unwrap(), &first);
}

#[test]
fn test_hard_copy_is_unequal_and_diverges() {
    let original = subject();
    let copy = original.make_copy(1);

    assert_ne!(original, copy);

    copy.set_lemma("elsewhere");
    assert_eq!(original.lemma(), "Pudong");
    assert_eq!(copy.lemma(), "elsewhere");
}

#[test]
fn test_coordination_distribution_scenario() {
    // Two soft copies of one subject, as coordination distribution creates.
    let original = subject();
    let first = original.make_soft_copy();
    let second = original.make_soft_copy();

    // Mutually unequal: distinct copy indices.
    assert_ne!(first, second);
    assert_ne!(first, original);
    assert_ne!(second, original);

    // Live edits flow through the shared store.
    first.set_lemma("shore");
    assert_eq!(second.lemma(), "shore");
    assert_eq!(original.lemma(), "shore");

    // Both report the same original.
    assert_eq!(first.original().unwrap(), second.original().unwrap());
    assert_eq!(first.original().unwrap(), &original);
}

#[test]
fn test_ordering_totality_and_sentinel() {
    let make = |doc: &str, sentence: usize, token: usize| {
        let node = TokenNode::from_word("w");
        node.set_doc_id(doc);
        node.set_sentence_index(sentence);
        node.set_token_index(token);
        node
    };

    let mut nodes = vec![
        make("b", 0, 1),
        make("a", 1, 1),
        make("a", 0, 2),
        make("a", 0, 1),
    ];
    let sentinel = TokenNode::no_word();

    for x in &nodes {
        assert!(sentinel < *x);
        assert_ne!(sentinel, *x);
        for y in &nodes {
            let held = [x < y, x == y, y < x].iter().filter(|&&h| h).count();
            assert_eq!(held, 1, "ordering must be total");
        }
    }
    assert_eq!(sentinel, TokenNode::no_word());

    nodes.sort();
    let order: Vec<_> = nodes
        .iter()
        .map(|n| (n.doc_id(), n.sentence_index(), n.token_index()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a".to_string(), Some(0), Some(1)),
            ("a".to_string(), Some(0), Some(2)),
            ("a".to_string(), Some(1), Some(1)),
            ("b".to_string(), Some(0), Some(1)),
        ]
    );
}

#[test]
fn test_pseudo_position_precedence() {
    let mut spliced = subject();
    let anchor = {
        let node = TokenNode::from_word("anchor");
        node.set_doc_id("d1");
        node.set_sentence_index(0);
        node.set_token_index(1);
        node
    };

    // Naturally, anchor (token 1) precedes the subject (token 2).
    assert!(anchor < spliced);

    // A fractional pseudo-position splices the subject before token 1.
    spliced.set_pseudo_position(0.5);
    assert!(spliced < anchor);
}

#[test]
fn test_copies_usable_in_hash_sets() {
    use std::collections::HashSet;

    let original = subject();
    let soft = original.make_soft_copy();
    let hard = original.make_copy(2);

    let mut set = HashSet::new();
    assert!(set.insert(original.clone()));
    assert!(set.insert(soft.clone()));
    assert!(set.insert(hard.clone()));
    assert_eq!(set.len(), 3);

    assert!(set.contains(&original));
    assert!(set.contains(&soft));
    assert!(!set.insert(original.make_soft_copy_indexed(1)));
}
