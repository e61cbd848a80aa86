//! Integration tests for the conversion pipeline.

use arbor::prelude::*;

fn converter() -> DependencyConverter {
    DependencyConverter::chinese().unwrap()
}

#[test]
fn test_scenario_head_percolation() -> Result<()> {
    let tree = Tree::parse("(IP (NP (NR Shanghai) (NR Pudong)) (VP (VV develops)))")?;
    let graph = converter().convert(&tree, DependencyMode::Basic)?;

    // The NP head percolates to the rightmost noun, the IP head to the verb.
    assert_eq!(graph.root().word(), "develops");
    assert_eq!(graph.len(), 2);

    let rendered = graph.render(&RenderOptions { show_indices: false });
    assert!(rendered.contains("nsubj(develops, Pudong)"), "{rendered}");
    assert!(rendered.contains("compound:nn(Pudong, Shanghai)"), "{rendered}");

    // No token is orphaned: every non-root has exactly one incoming edge.
    for token in tree.tokens() {
        let incoming = graph.governors_of(token).len();
        if token == graph.root() {
            assert_eq!(incoming, 0);
        } else {
            assert_eq!(incoming, 1);
        }
    }
    Ok(())
}

#[test]
fn test_build_is_deterministic() -> Result<()> {
    let text = "(IP (NP (NR Shanghai) (NR Pudong)) \
                (VP (VV develops) (NP (NN industry))) (PU .))";
    let converter = converter();

    let mut renderings = Vec::new();
    for _ in 0..3 {
        let tree = Tree::parse(text)?;
        let graph = converter.convert(&tree, DependencyMode::Basic)?;
        renderings.push(graph.to_string());
    }
    assert_eq!(renderings[0], renderings[1]);
    assert_eq!(renderings[1], renderings[2]);
    Ok(())
}

#[test]
fn test_collapsed_mode_merges_prepositions() -> Result<()> {
    let tree = Tree::parse(
        "(IP (NP (NR Pudong)) (VP (VV cooperates) (PP (P with) (NP (NR Shanghai)))))",
    )?;
    let converter = converter();

    let basic = converter.convert(&tree, DependencyMode::Basic)?;
    let relations: Vec<_> = basic.edges().iter().map(|e| e.relation.as_str()).collect();
    assert!(relations.contains(&"prep"));
    assert!(relations.contains(&"pobj"));

    let collapsed = converter.convert(&tree, DependencyMode::Collapsed)?;
    let relations: Vec<_> = collapsed
        .edges()
        .iter()
        .map(|e| e.relation.as_str())
        .collect();
    assert!(relations.contains(&"prep:with"), "{relations:?}");
    assert!(!relations.contains(&"prep"));
    assert!(!relations.contains(&"pobj"));

    // The preposition token itself no longer appears in any live edge.
    for edge in collapsed.edges() {
        assert_ne!(edge.governor.word(), "with");
        assert_ne!(edge.dependent.word(), "with");
    }
    Ok(())
}

#[test]
fn test_rewrite_is_idempotent_via_modes() -> Result<()> {
    use arbor::graph::rewrite::{GraphRewriter, collapse_rules};

    let tree = Tree::parse(
        "(IP (NP (NR Pudong)) (VP (VV cooperates) (PP (P with) (NP (NR Shanghai)))))",
    )?;
    let collapsed = converter().convert(&tree, DependencyMode::Collapsed)?;

    let rewriter = GraphRewriter::new(collapse_rules()?);
    let again = rewriter.rewrite(&collapsed);
    assert_eq!(collapsed.to_string(), again.to_string());
    Ok(())
}

#[test]
fn test_coordination_collapse_and_distribution() -> Result<()> {
    let tree = Tree::parse(
        "(IP (NP (NR Pudong)) (VP (VP (VV develops)) (CC and) (VP (VV grows))))",
    )?;
    let converter = converter();

    let collapsed = converter.convert(&tree, DependencyMode::Collapsed)?;
    assert!(
        collapsed
            .edges()
            .iter()
            .any(|edge| edge.relation == "conj:and"),
        "{collapsed}"
    );

    let processed = converter.convert(&tree, DependencyMode::CcProcessed)?;
    // The second conjunct receives a soft copy of the shared subject.
    let distributed: Vec<_> = processed
        .edges()
        .iter()
        .filter(|edge| edge.relation == "nsubj")
        .collect();
    assert_eq!(distributed.len(), 2, "{processed}");
    assert!(
        distributed
            .iter()
            .any(|edge| edge.dependent.copy_index() > 0)
    );
    Ok(())
}

#[test]
fn test_degenerate_trees() -> Result<()> {
    let converter = converter();

    let single = Tree::parse("(VP (VV go))")?;
    let graph = converter.convert(&single, DependencyMode::Basic)?;
    assert_eq!(graph.root().word(), "go");
    assert!(graph.is_empty());

    let bare = Tree::parse("go")?;
    let graph = converter.convert(&bare, DependencyMode::Basic)?;
    assert!(graph.is_empty());
    Ok(())
}

#[test]
fn test_contract_error_is_distinct_and_recoverable() {
    let converter = converter();

    let bad = arbor::tree::Tree::interior("IP", vec![]);
    let error = converter.convert(&bad, DependencyMode::Basic).unwrap_err();
    assert!(matches!(error, ArborError::TreeContract(_)));

    // The next sentence still converts: failures stop at the sentence
    // boundary.
    let good = Tree::parse("(IP (NP (NR Pudong)) (VP (VV develops)))").unwrap();
    assert!(converter.convert(&good, DependencyMode::Basic).is_ok());
}

#[test]
fn test_coverage_gaps_are_not_errors() -> Result<()> {
    // FW under IP matches no rule and falls back to the generic relation.
    let tree = Tree::parse("(IP (FW foo) (VP (VV go)))")?;
    let graph = converter().convert(&tree, DependencyMode::Basic)?;
    assert!(graph.edges().iter().any(|edge| edge.relation == "dep"));
    Ok(())
}

#[test]
fn test_registry_exposed_for_downstream_lookup() {
    let converter = converter();
    let nsubj = converter.registry().by_short_name("nsubj").unwrap();
    assert_eq!(nsubj.long_name, "nominal subject");
    assert!(converter.registry().is_ancestor("subj", "nsubj"));
}
