//! Ready-made head-rule tables.
//!
//! The table here covers the Penn Chinese Treebank category set with a
//! semantic flavor: lexical verbs are preferred over light elements inside
//! verbal compounds, and nominal heads are found position-first from the
//! right edge. Categories are matched on their basic form, so `NP-SBJ` uses
//! the `NP` entry.

use super::{CategoryRules, Direction, HeadRule, HeadTable};

fn entry(
    table: &mut HeadTable,
    category: &str,
    default_direction: Direction,
    alternatives: Vec<HeadRule>,
) {
    table.insert(
        category.to_string(),
        CategoryRules {
            default_direction,
            alternatives,
        },
    );
}

/// Head rules for the Penn Chinese Treebank category set.
pub fn chinese_head_table() -> HeadTable {
    use Direction::*;

    let mut table = HeadTable::new();

    entry(&mut table, "ROOT", Left, vec![HeadRule::new(Left, &["IP"])]);
    entry(&mut table, "TOP", Left, vec![HeadRule::new(Left, &["IP"])]);
    entry(
        &mut table,
        "IP",
        Left,
        vec![HeadRule::new(Left, &["IP", "VP"]), HeadRule::new(Left, &["VV", "VA", "VE", "VC"])],
    );
    entry(
        &mut table,
        "VP",
        Left,
        vec![HeadRule::new(
            Left,
            &[
                "VE", "VC", "VV", "VA", "VCD", "VSB", "VRD", "VNV", "VPT", "BA", "LB", "VCP", "VP",
            ],
        )],
    );
    entry(
        &mut table,
        "NP",
        Right,
        vec![HeadRule::new(RightDis, &["NN", "NR", "NT", "NP", "PN"])],
    );
    entry(
        &mut table,
        "CP",
        Right,
        vec![HeadRule::new(Right, &["CP", "IP"])],
    );
    entry(
        &mut table,
        "ADJP",
        Left,
        vec![HeadRule::new(Left, &["JJ", "ADJP"])],
    );
    entry(
        &mut table,
        "ADVP",
        Left,
        vec![HeadRule::new(Left, &["AD", "CS", "ADVP", "JJ"])],
    );
    entry(&mut table, "CLP", Left, vec![HeadRule::new(Left, &["M", "CLP"])]);
    entry(
        &mut table,
        "DNP",
        Right,
        vec![HeadRule::new(Right, &["DEG", "DNP"])],
    );
    entry(
        &mut table,
        "DVP",
        Right,
        vec![HeadRule::new(Right, &["DEV", "DVP"])],
    );
    entry(&mut table, "DP", Left, vec![HeadRule::new(Left, &["DT", "DP"])]);
    entry(
        &mut table,
        "LCP",
        Right,
        vec![HeadRule::new(Right, &["LC", "LCP"])],
    );
    entry(&mut table, "PP", Left, vec![HeadRule::new(Left, &["P", "PP"])]);
    entry(
        &mut table,
        "PRN",
        Right,
        vec![HeadRule::new(RightDis, &["NP", "IP", "VP", "NT", "NR", "NN"])],
    );
    entry(
        &mut table,
        "QP",
        Right,
        vec![HeadRule::new(Right, &["QP", "CLP", "CD", "OD"])],
    );
    entry(
        &mut table,
        "UCP",
        Left,
        vec![HeadRule::new(LeftDis, &["NP", "VP", "IP", "ADJP"])],
    );
    entry(
        &mut table,
        "FRAG",
        Right,
        vec![HeadRule::new(RightDis, &["VV", "NR", "NN", "NT"])],
    );
    entry(&mut table, "LST", Left, vec![HeadRule::new(Left, &["CD", "OD"])]);
    for compound in ["VCD", "VRD", "VSB", "VCP", "VNV", "VPT"] {
        entry(
            &mut table,
            compound,
            Left,
            vec![HeadRule::new(LeftDis, &["VV", "VA", "VC", "VE"])],
        );
    }

    table
}

/// Variant of [`chinese_head_table`] that prefers an embedded verb phrase
/// over a fronted auxiliary, so modal constructions like `(VP (VV can)
/// (VP (VV come)))` head on the lexical verb.
pub fn chinese_semantic_head_table() -> HeadTable {
    use Direction::*;

    let mut table = chinese_head_table();
    entry(
        &mut table,
        "VP",
        Left,
        vec![HeadRule::new(
            Left,
            &[
                "VP", "VCD", "VSB", "VRD", "VNV", "VPT", "VE", "VC", "VV", "VA", "BA", "LB", "VCP",
            ],
        )],
    );
    table
}
