//! Graph rewriting.
//!
//! The rewriter applies an ordered list of local motif rules to an edge list.
//! Chain rules collapse a two-hop path through a function-word mediator into
//! one derived semantic edge; sibling rules fold a marker edge (like `cc`)
//! into the label of its sibling edge (like `conj` becoming `conj:and`).
//! Consumed edges are marked dead and omitted from the output; any surviving
//! edge still touching a consumed mediator is re-pointed to the surviving
//! governor (governor splicing), so no edge targets a removed node.
//!
//! Rewriting is observably pure: the input graph is never mutated. A single
//! pass over the edge list is made per rule unless `run_to_fixpoint` is set.
//! Rule order is language-specific data, not part of the algorithm.

use std::str::FromStr;

use regex::Regex;

use crate::error::{ArborError, Result};
use crate::graph::{DependencyEdge, DependencyGraph};

/// Post-processing variants selectable by callers (and by the transport's
/// mode string).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyMode {
    /// The builder's output, unrewritten.
    Basic,
    /// Collapse function-word-mediated relations into semantic edges.
    Collapsed,
    /// Collapsed, plus distribution of shared dependents over conjuncts
    /// using soft-copy nodes.
    CcProcessed,
}

impl FromStr for DependencyMode {
    type Err = ArborError;

    fn from_str(s: &str) -> Result<DependencyMode> {
        match s {
            "basic" => Ok(DependencyMode::Basic),
            "collapsed" => Ok(DependencyMode::Collapsed),
            "cc-processed" | "ccprocessed" => Ok(DependencyMode::CcProcessed),
            other => Err(ArborError::config(format!(
                "unknown dependency mode '{other}' \
                 (expected basic, collapsed, or cc-processed)"
            ))),
        }
    }
}

/// How a rule names its derived edge.
#[derive(Clone, Debug)]
pub enum DerivedLabel {
    /// A fixed relation name.
    Fixed(&'static str),
    /// `prefix:<mediator word>`, e.g. `prep:with`.
    PrefixWithMediatorWord(&'static str),
}

impl DerivedLabel {
    fn render(&self, mediator_word: &str) -> String {
        match self {
            DerivedLabel::Fixed(name) => (*name).to_string(),
            DerivedLabel::PrefixWithMediatorWord(prefix) => {
                format!("{prefix}:{mediator_word}")
            }
        }
    }
}

/// Collapse a two-hop path `(G -[upper]-> D -[lower]-> E)` where `D`'s tag
/// matches `mediator_tag`, into one derived edge `(G -> E)`.
#[derive(Clone, Debug)]
pub struct ChainRule {
    /// Rule name, for diagnostics.
    pub name: &'static str,
    /// Relation pattern for the upper edge (anchored).
    pub upper: Regex,
    /// Relation pattern for the lower edge (anchored).
    pub lower: Regex,
    /// Tag pattern the mediator token must match; `None` accepts any.
    pub mediator_tag: Option<Regex>,
    /// Derived relation name.
    pub derived: DerivedLabel,
}

/// Fold a marker edge `(G -[marker]-> C)` into the labels of its sibling
/// edges `(G -[target]-> E)`, which become `prefix:<C's word>`.
#[derive(Clone, Debug)]
pub struct SiblingLabelRule {
    /// Rule name, for diagnostics.
    pub name: &'static str,
    /// Relation pattern for the edges to relabel (anchored).
    pub target: Regex,
    /// Relation pattern for the consumed marker edge (anchored).
    pub marker: Regex,
    /// Prefix of the derived label.
    pub prefix: &'static str,
}

/// One rewrite rule.
#[derive(Clone, Debug)]
pub enum RewriteRule {
    /// Two-hop collapse through a mediator.
    Chain(ChainRule),
    /// Sibling marker folded into a label.
    Sibling(SiblingLabelRule),
}

fn anchored(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| ArborError::config(format!("bad rewrite pattern /{pattern}/: {e}")))
}

impl RewriteRule {
    /// Build a chain rule from relation and tag patterns.
    pub fn chain(
        name: &'static str,
        upper: &str,
        lower: &str,
        mediator_tag: Option<&str>,
        derived: DerivedLabel,
    ) -> Result<RewriteRule> {
        Ok(RewriteRule::Chain(ChainRule {
            name,
            upper: anchored(upper)?,
            lower: anchored(lower)?,
            mediator_tag: mediator_tag.map(anchored).transpose()?,
            derived,
        }))
    }

    /// Build a sibling-label rule from relation patterns.
    pub fn sibling(
        name: &'static str,
        target: &str,
        marker: &str,
        prefix: &'static str,
    ) -> Result<RewriteRule> {
        Ok(RewriteRule::Sibling(SiblingLabelRule {
            name,
            target: anchored(target)?,
            marker: anchored(marker)?,
            prefix,
        }))
    }
}

/// The collapse rules applied in [`DependencyMode::Collapsed`]: preposition
/// and localizer two-hop collapse, then conjunction folding.
pub fn collapse_rules() -> Result<Vec<RewriteRule>> {
    Ok(vec![
        RewriteRule::chain(
            "collapse-preposition",
            "prep",
            "pobj",
            Some("P"),
            DerivedLabel::PrefixWithMediatorWord("prep"),
        )?,
        RewriteRule::chain(
            "collapse-localizer",
            "loc",
            "lobj",
            Some("LC"),
            DerivedLabel::PrefixWithMediatorWord("loc"),
        )?,
        RewriteRule::sibling("fold-conjunction", "conj", "cc", "conj")?,
    ])
}

/// Applies ordered rewrite rules to a graph.
#[derive(Clone, Debug)]
pub struct GraphRewriter {
    rules: Vec<RewriteRule>,
    run_to_fixpoint: bool,
}

impl GraphRewriter {
    /// Create a rewriter performing one pass per rule.
    pub fn new(rules: Vec<RewriteRule>) -> GraphRewriter {
        GraphRewriter {
            rules,
            run_to_fixpoint: false,
        }
    }

    /// Re-run the rule list until no rule fires.
    pub fn run_to_fixpoint(mut self, enabled: bool) -> GraphRewriter {
        self.run_to_fixpoint = enabled;
        self
    }

    /// Rewrite a graph, returning a new one. The input is not mutated.
    pub fn rewrite(&self, graph: &DependencyGraph) -> DependencyGraph {
        let mut edges: Vec<Option<DependencyEdge>> =
            graph.edges().iter().cloned().map(Some).collect();

        loop {
            let mut fired = false;
            for rule in &self.rules {
                fired |= match rule {
                    RewriteRule::Chain(chain) => apply_chain(chain, &mut edges),
                    RewriteRule::Sibling(sibling) => apply_sibling(sibling, &mut edges),
                };
            }
            if !self.run_to_fixpoint || !fired {
                break;
            }
        }

        DependencyGraph::new(graph.root().clone(), edges.into_iter().flatten().collect())
    }
}

fn apply_chain(rule: &ChainRule, edges: &mut Vec<Option<DependencyEdge>>) -> bool {
    let mut fired = false;
    for upper_index in 0..edges.len() {
        let Some(upper) = edges[upper_index].clone() else {
            continue;
        };
        if !rule.upper.is_match(&upper.relation) {
            continue;
        }
        if let Some(tag) = &rule.mediator_tag {
            if !tag.is_match(&upper.dependent.tag()) {
                continue;
            }
        }

        let mediator = upper.dependent.clone();
        let lower_index = (0..edges.len()).find(|&index| {
            index != upper_index
                && edges[index].as_ref().is_some_and(|edge| {
                    edge.governor == mediator && rule.lower.is_match(&edge.relation)
                })
        });
        let Some(lower_index) = lower_index else {
            continue;
        };
        let lower = edges[lower_index].clone().expect("checked alive above");

        // The derived edge replaces the upper slot, keeping output order
        // stable; the lower edge dies.
        let label = rule.derived.render(&mediator.word());
        edges[upper_index] = Some(DependencyEdge::new(
            upper.governor.clone(),
            lower.dependent.clone(),
            label,
        ));
        edges[lower_index] = None;
        splice_out(&mediator, &upper.governor, edges);
        fired = true;
    }
    fired
}

/// Governor splicing: re-point any live edge touching the consumed mediator
/// at the surviving governor.
fn splice_out(
    mediator: &crate::token::TokenNode,
    governor: &crate::token::TokenNode,
    edges: &mut [Option<DependencyEdge>],
) {
    for slot in edges.iter_mut() {
        if let Some(edge) = slot {
            if edge.governor == *mediator {
                edge.governor = governor.clone();
            }
            if edge.dependent == *mediator {
                edge.dependent = governor.clone();
            }
        }
    }
}

fn apply_sibling(rule: &SiblingLabelRule, edges: &mut [Option<DependencyEdge>]) -> bool {
    let mut fired = false;
    for marker_index in 0..edges.len() {
        let Some(marker) = edges[marker_index].clone() else {
            continue;
        };
        if !rule.marker.is_match(&marker.relation) {
            continue;
        }

        let mut relabeled = false;
        for slot in edges.iter_mut() {
            if let Some(edge) = slot {
                if edge.governor == marker.governor && rule.target.is_match(&edge.relation) {
                    edge.relation = format!("{}:{}", rule.prefix, marker.dependent.word());
                    relabeled = true;
                }
            }
        }
        if relabeled {
            edges[marker_index] = None;
            fired = true;
        }
    }
    fired
}

/// Distribute shared dependents over conjuncts: for every `conj`-family edge
/// `(G, E)`, give `E` a soft copy of each of `G`'s dependents whose relation
/// is in `relations`, unless `E` already governs one. Used by
/// [`DependencyMode::CcProcessed`].
pub fn distribute_conjuncts(graph: &DependencyGraph, relations: &[&str]) -> DependencyGraph {
    let mut edges: Vec<DependencyEdge> = graph.edges().to_vec();
    let conjunct_pairs: Vec<_> = edges
        .iter()
        .filter(|edge| edge.relation == "conj" || edge.relation.starts_with("conj:"))
        .map(|edge| (edge.governor.clone(), edge.dependent.clone()))
        .collect();

    for (governor, conjunct) in conjunct_pairs {
        for relation in relations {
            let shared: Vec<_> = edges
                .iter()
                .filter(|edge| edge.governor == governor && edge.relation == *relation)
                .map(|edge| edge.dependent.clone())
                .collect();
            let already_has = edges
                .iter()
                .any(|edge| edge.governor == conjunct && edge.relation == *relation);
            if already_has {
                continue;
            }
            for dependent in shared {
                edges.push(DependencyEdge::new(
                    conjunct.clone(),
                    dependent.make_soft_copy(),
                    *relation,
                ));
            }
        }
    }
    DependencyGraph::new(graph.root().clone(), edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenNode;

    fn token(word: &str, index: usize, tag: &str) -> TokenNode {
        let node = TokenNode::from_word(word);
        node.set_token_index(index);
        node.set_tag(tag);
        node
    }

    fn prep_graph() -> DependencyGraph {
        // "cooperate with Pudong": cooperate -prep-> with -pobj-> Pudong
        let cooperate = token("cooperate", 1, "VV");
        let with = token("with", 2, "P");
        let pudong = token("Pudong", 3, "NR");
        DependencyGraph::new(
            cooperate.clone(),
            vec![
                DependencyEdge::new(cooperate, with.clone(), "prep"),
                DependencyEdge::new(with, pudong, "pobj"),
            ],
        )
    }

    fn rewriter() -> GraphRewriter {
        GraphRewriter::new(collapse_rules().unwrap())
    }

    #[test]
    fn test_preposition_collapse() {
        let graph = prep_graph();
        let rewritten = rewriter().rewrite(&graph);

        assert_eq!(rewritten.len(), 1);
        let edge = &rewritten.edges()[0];
        assert_eq!(edge.relation, "prep:with");
        assert_eq!(edge.governor.word(), "cooperate");
        assert_eq!(edge.dependent.word(), "Pudong");
    }

    #[test]
    fn test_input_graph_unchanged() {
        let graph = prep_graph();
        let before = graph.to_string();
        let _ = rewriter().rewrite(&graph);
        assert_eq!(graph.to_string(), before);
    }

    #[test]
    fn test_governor_splicing() {
        // An extra modifier hangs off the mediator; it must be re-pointed at
        // the governor after the collapse.
        let cooperate = token("cooperate", 1, "VV");
        let with = token("with", 2, "P");
        let pudong = token("Pudong", 3, "NR");
        let only = token("only", 4, "AD");
        let graph = DependencyGraph::new(
            cooperate.clone(),
            vec![
                DependencyEdge::new(cooperate.clone(), with.clone(), "prep"),
                DependencyEdge::new(with.clone(), pudong, "pobj"),
                DependencyEdge::new(with, only, "advmod"),
            ],
        );

        let rewritten = rewriter().rewrite(&graph);
        assert_eq!(rewritten.len(), 2);
        let spliced = rewritten
            .edges()
            .iter()
            .find(|edge| edge.relation == "advmod")
            .unwrap();
        assert_eq!(spliced.governor.word(), "cooperate");
        // No live edge touches the consumed mediator.
        for edge in rewritten.edges() {
            assert_ne!(edge.governor.word(), "with");
            assert_ne!(edge.dependent.word(), "with");
        }
    }

    #[test]
    fn test_conjunction_folding() {
        let pudong = token("Pudong", 3, "NR");
        let shanghai = token("Shanghai", 1, "NR");
        let and = token("and", 2, "CC");
        let graph = DependencyGraph::new(
            pudong.clone(),
            vec![
                DependencyEdge::new(pudong.clone(), shanghai, "conj"),
                DependencyEdge::new(pudong, and, "cc"),
            ],
        );

        let rewritten = rewriter().rewrite(&graph);
        assert_eq!(rewritten.len(), 1);
        assert_eq!(rewritten.edges()[0].relation, "conj:and");
    }

    #[test]
    fn test_rewrite_idempotence() {
        let graph = prep_graph();
        let once = rewriter().rewrite(&graph);
        let twice = rewriter().rewrite(&once);
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn test_distribution_uses_soft_copies() {
        let develops = token("develops", 2, "VV");
        let grows = token("grows", 4, "VV");
        let pudong = token("Pudong", 1, "NR");
        let graph = DependencyGraph::new(
            develops.clone(),
            vec![
                DependencyEdge::new(develops.clone(), pudong.clone(), "nsubj"),
                DependencyEdge::new(develops, grows, "conj:and"),
            ],
        );

        let distributed = distribute_conjuncts(&graph, &["nsubj"]);
        assert_eq!(distributed.len(), 3);

        let added = &distributed.edges()[2];
        assert_eq!(added.relation, "nsubj");
        assert_eq!(added.governor.word(), "grows");
        assert!(added.dependent.copy_index() > 0);
        assert_eq!(added.dependent.original().unwrap(), &pudong);
        // The copy is distinct from the source node for graph purposes.
        assert_ne!(added.dependent, pudong);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "collapsed".parse::<DependencyMode>().unwrap(),
            DependencyMode::Collapsed
        );
        assert_eq!(
            "cc-processed".parse::<DependencyMode>().unwrap(),
            DependencyMode::CcProcessed
        );
        assert!("fancy".parse::<DependencyMode>().is_err());
    }
}
