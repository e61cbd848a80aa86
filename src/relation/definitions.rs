//! Relation definitions for Chinese (Penn Chinese Treebank categories).
//!
//! Declaration order is load-bearing: it is the classifier's precedence
//! order. Abstract relations (no rules) come first to root the hierarchy,
//! then concrete relations from most to least constrained where shapes
//! overlap - e.g. `conj` before `compound:nn`, since a nominal conjunct also
//! looks like a noun compound, and `neg` before `advmod`, since negators are
//! adverbs.
//!
//! Coverage is intentionally partial; anything unmatched classifies as the
//! generic `dep`.

use crate::error::Result;
use crate::pattern::ShapePattern;
use crate::relation::registry::{Relation, RelationRegistry, ShapeRule};

fn cat(pattern: &str) -> Result<ShapePattern> {
    ShapePattern::category(pattern)
}

fn word(pattern: &str) -> Result<ShapePattern> {
    ShapePattern::word(pattern)
}

fn all(patterns: Vec<ShapePattern>) -> ShapePattern {
    ShapePattern::all(patterns)
}

fn rel(
    short_name: &'static str,
    long_name: &'static str,
    parent: &'static str,
    scope: Option<&str>,
    dependent_patterns: Vec<ShapePattern>,
) -> Result<Relation> {
    let rules = dependent_patterns
        .into_iter()
        .map(ShapeRule::on_dependent)
        .collect();
    Relation::new(short_name, long_name, Some(parent), scope, rules)
}

/// Build the Chinese relation registry.
pub fn chinese_relation_registry() -> Result<RelationRegistry> {
    let relations = vec![
        // Hierarchy skeleton. The root `dep` is also the classifier fallback.
        Relation::new("dep", "dependent", None, None, vec![])?,
        Relation::new("arg", "argument", Some("dep"), None, vec![])?,
        Relation::new("subj", "subject", Some("arg"), None, vec![])?,
        Relation::new("comp", "complement", Some("arg"), None, vec![])?,
        Relation::new("mod", "modifier", Some("dep"), None, vec![])?,
        rel("punct", "punctuation", "dep", None, vec![cat("PU")?])?,
        // Subjects. Passive and topic shapes are narrower than the plain
        // subject and must precede it.
        rel(
            "nsubjpass",
            "nominal passive subject",
            "subj",
            Some("IP"),
            vec![all(vec![
                cat("NP|QP")?,
                ShapePattern::precedes_sibling(all(vec![
                    cat("VP")?,
                    ShapePattern::descendant(cat("LB|SB")?),
                ])),
            ])],
        )?,
        rel(
            "top",
            "topic",
            "subj",
            Some("IP"),
            vec![all(vec![
                cat("NP|QP")?,
                ShapePattern::precedes_sibling(all(vec![
                    cat("VP")?,
                    ShapePattern::child(cat("VC|VE")?),
                ])),
            ])],
        )?,
        rel(
            "nsubj",
            "nominal subject",
            "subj",
            Some("IP"),
            vec![all(vec![
                cat("NP|QP")?,
                ShapePattern::precedes_sibling(cat("VP|IP|VCD")?),
            ])],
        )?,
        // Complements.
        rel(
            "ccomp",
            "clausal complement",
            "comp",
            Some("VP|IP"),
            vec![all(vec![
                cat("IP|VP")?,
                ShapePattern::follows_sibling(cat("VV|VC|VE")?),
            ])],
        )?,
        rel(
            "tmod",
            "temporal modifier",
            "mod",
            Some("VP|IP"),
            vec![
                cat("NT")?,
                all(vec![cat("NP")?, ShapePattern::child(cat("NT")?)]),
            ],
        )?,
        rel(
            "dobj",
            "direct object",
            "comp",
            Some("VP|IP"),
            vec![all(vec![
                cat("NP|DP|QP")?,
                ShapePattern::follows_sibling(cat("VV|VE|VRD|VCD|VSB")?),
            ])],
        )?,
        rel(
            "pobj",
            "prepositional object",
            "comp",
            Some("PP"),
            vec![cat("NP|QP|LCP|DP|IP")?],
        )?,
        rel(
            "lobj",
            "localizer object",
            "comp",
            Some("LCP"),
            vec![cat("NP|QP|DP")?],
        )?,
        // Coordination. `conj` must precede the nominal modifiers: a nominal
        // conjunct also matches the noun-compound shape.
        rel(
            "cc",
            "coordinating conjunction",
            "dep",
            Some("NP|VP|IP|QP|UCP|ADJP"),
            vec![cat("CC")?],
        )?,
        rel(
            "conj",
            "conjunct",
            "dep",
            Some("NP|VP|IP|QP|UCP|ADJP"),
            vec![all(vec![
                ShapePattern::not(cat("CC|PU")?),
                ShapePattern::any(vec![
                    ShapePattern::precedes_sibling(cat("CC")?),
                    ShapePattern::follows_sibling(cat("CC")?),
                ]),
            ])],
        )?,
        // Nominal modifiers.
        rel(
            "compound:nn",
            "noun compound modifier",
            "mod",
            Some("NP"),
            vec![all(vec![
                cat("NN|NR|NT")?,
                ShapePattern::precedes_sibling(cat("NN|NR|NT")?),
            ])],
        )?,
        rel(
            "amod",
            "adjectival modifier",
            "mod",
            Some("NP|QP|CLP"),
            vec![cat("ADJP|JJ")?],
        )?,
        rel(
            "rcmod",
            "relative clause modifier",
            "mod",
            Some("NP"),
            vec![all(vec![
                cat("CP")?,
                ShapePattern::precedes_sibling(cat("NN|NR|NT|NP")?),
            ])],
        )?,
        rel(
            "assmod",
            "associative modifier",
            "mod",
            Some("NP"),
            vec![all(vec![
                cat("DNP")?,
                ShapePattern::precedes_sibling(cat("NN|NR|NT|NP")?),
            ])],
        )?,
        rel(
            "assm",
            "associative marker",
            "mod",
            Some("DNP"),
            vec![cat("DEG")?],
        )?,
        rel("det", "determiner", "mod", Some("NP|DP"), vec![cat("DP|DT")?])?,
        rel(
            "nummod",
            "numeric modifier",
            "mod",
            Some("NP|CLP"),
            vec![cat("QP|CD")?],
        )?,
        rel(
            "clf",
            "classifier modifier",
            "mod",
            Some("QP"),
            vec![cat("CLP|M")?],
        )?,
        // Verbal modifiers. `neg` is a narrower `advmod` shape.
        rel(
            "neg",
            "negation modifier",
            "mod",
            Some("VP|ADJP|IP"),
            vec![all(vec![
                cat("AD")?,
                word("\u{4e0d}|\u{6ca1}|\u{6ca1}\u{6709}|\u{672a}|\u{522b}|not|n't|never")?,
            ])],
        )?,
        rel(
            "advmod",
            "adverbial modifier",
            "mod",
            Some("VP|ADJP|IP|QP|CP"),
            vec![cat("ADVP|AD|CS")?],
        )?,
        rel(
            "prep",
            "prepositional modifier",
            "mod",
            Some("VP|IP"),
            vec![cat("PP")?],
        )?,
        rel(
            "loc",
            "localizer modifier",
            "mod",
            Some("VP|IP"),
            vec![cat("LCP")?],
        )?,
        rel("mark", "marker", "mod", Some("CP"), vec![cat("DEC|SP")?])?,
        rel("cop", "copula", "dep", Some("VP|IP"), vec![cat("VC")?])?,
        // A modal is a verb by tag; it only reads as an auxiliary when a
        // lexical verb phrase follows it.
        rel(
            "aux:modal",
            "modal auxiliary",
            "dep",
            Some("VP"),
            vec![all(vec![
                cat("VV")?,
                word(
                    "\u{4f1a}|\u{80fd}|\u{53ef}\u{4ee5}|\u{5e94}\u{8be5}|\u{5fc5}\u{987b}\
                     |\u{53ef}\u{80fd}|\u{8981}|\u{60f3}|\u{6562}|\u{80af}\
                     |will|can|may|must|should",
                )?,
                ShapePattern::precedes_sibling(cat("VP|VCD")?),
            ])],
        )?,
    ];

    RelationRegistry::build(relations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_builds() {
        let registry = chinese_relation_registry().unwrap();
        assert!(registry.len() > 20);
        assert_eq!(registry.generic().short_name, "dep");
    }

    #[test]
    fn test_hierarchy_is_single_rooted() {
        let registry = chinese_relation_registry().unwrap();
        for relation in registry.iter() {
            assert!(
                registry.is_ancestor("dep", relation.short_name),
                "'{}' does not reach the root",
                relation.short_name
            );
        }
    }

    #[test]
    fn test_subject_relations_specialize_subj() {
        let registry = chinese_relation_registry().unwrap();
        assert!(registry.is_ancestor("subj", "nsubj"));
        assert!(registry.is_ancestor("subj", "nsubjpass"));
        assert!(registry.is_ancestor("subj", "top"));
        assert!(!registry.is_ancestor("subj", "dobj"));
    }

    #[test]
    fn test_modal_auxiliary() {
        use std::sync::Arc;

        use crate::relation::RelationClassifier;
        use crate::tree::Tree;

        let classifier =
            RelationClassifier::new(Arc::new(chinese_relation_registry().unwrap()));
        let tree = Tree::parse("(VP (VV \u{4f1a}) (VP (VV \u{6765})))").unwrap();
        assert_eq!(classifier.classify(&tree, 0).short_name, "aux:modal");
    }

    #[test]
    fn test_lookup_by_short_name() {
        let registry = chinese_relation_registry().unwrap();
        let nn = registry.by_short_name("compound:nn").unwrap();
        assert_eq!(nn.long_name, "noun compound modifier");
        assert_eq!(nn.parent, Some("mod"));
    }
}
