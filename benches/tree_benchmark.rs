//! Benchmarks for tree bookkeeping, hashing and canonicalization.

#![allow(missing_docs)] // Benchmark macros generate undocumented functions

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use loci::hash::{HashMode, Xxh64};
use loci::node::{Node, Op};
use loci::tree::Tree;

/// Left-leaning chain of additions over `leaves` terminals:
/// `(((x1 + x2) + x3) + ...)`.
fn add_chain(leaves: u64) -> Tree {
    let mut nodes = vec![Node::variable(1, 1.0)];
    for v in 2..=leaves {
        nodes.push(Node::variable(v, 1.0));
        nodes.push(Node::new(Op::Add));
    }
    let mut tree = Tree::new(nodes);
    tree.update_nodes();
    tree
}

/// Balanced tree alternating additions and multiplications.
fn balanced(depth: u32) -> Tree {
    fn build(nodes: &mut Vec<Node>, depth: u32, variable: &mut u64) {
        if depth == 0 {
            nodes.push(Node::variable(*variable, 1.0));
            *variable += 1;
            return;
        }
        build(nodes, depth - 1, variable);
        build(nodes, depth - 1, variable);
        let op = if depth % 2 == 0 { Op::Add } else { Op::Mul };
        nodes.push(Node::new(op));
    }

    let mut nodes = Vec::new();
    let mut variable = 1;
    build(&mut nodes, depth, &mut variable);
    let mut tree = Tree::new(nodes);
    tree.update_nodes();
    tree
}

fn bench_update_nodes(c: &mut Criterion) {
    let tree = balanced(8);
    c.bench_function("update_nodes_511", |b| {
        b.iter(|| {
            let mut t = tree.clone();
            black_box(t.update_nodes().len());
        });
    });
}

fn bench_hash(c: &mut Criterion) {
    let tree = balanced(8);
    c.bench_function("hash_strict_511", |b| {
        b.iter(|| {
            let mut t = tree.clone();
            black_box(t.hash(&Xxh64, HashMode::Strict).hash_value());
        });
    });
}

fn bench_sort(c: &mut Criterion) {
    let tree = balanced(8);
    c.bench_function("sort_strict_511", |b| {
        b.iter(|| {
            let mut t = tree.clone();
            black_box(t.sort(&Xxh64, HashMode::Strict).hash_value());
        });
    });
}

fn bench_reduce(c: &mut Criterion) {
    let tree = add_chain(128);
    c.bench_function("reduce_add_chain_128", |b| {
        b.iter(|| {
            let mut t = tree.clone();
            t.reduce();
            black_box(t.len());
        });
    });
}

fn bench_subtree(c: &mut Criterion) {
    let tree = balanced(8);
    let mid = tree.len() / 2;
    c.bench_function("subtree_extract", |b| {
        b.iter(|| {
            black_box(tree.subtree(mid).len());
        });
    });
}

criterion_group!(
    benches,
    bench_update_nodes,
    bench_hash,
    bench_sort,
    bench_reduce,
    bench_subtree
);
criterion_main!(benches);
