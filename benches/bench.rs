//! Conversion benchmarks.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use arbor::convert::DependencyConverter;
use arbor::graph::DependencyMode;
use arbor::tree::Tree;

const SENTENCES: &[&str] = &[
    "(IP (NP (NR Shanghai) (NR Pudong)) (VP (VV develops)))",
    "(IP (NP (NR Pudong)) (VP (VV cooperates) (PP (P with) (NP (NR Shanghai)))) (PU .))",
    "(IP (NP (NR Pudong)) (VP (VP (VV develops)) (CC and) (VP (VV grows))))",
    "(IP (NP (DP (DT this)) (NN city)) (VP (ADVP (AD quickly)) (VP (VV expands))))",
];

fn bench_convert(c: &mut Criterion) {
    let converter = DependencyConverter::chinese().unwrap();
    let trees: Vec<Tree> = SENTENCES.iter().map(|s| Tree::parse(s).unwrap()).collect();

    c.bench_function("convert_basic", |b| {
        b.iter(|| {
            for tree in &trees {
                black_box(converter.convert(tree, DependencyMode::Basic).unwrap());
            }
        })
    });

    c.bench_function("convert_collapsed", |b| {
        b.iter(|| {
            for tree in &trees {
                black_box(converter.convert(tree, DependencyMode::Collapsed).unwrap());
            }
        })
    });

    c.bench_function("parse_trees", |b| {
        b.iter(|| {
            for sentence in SENTENCES {
                black_box(Tree::parse(sentence).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
