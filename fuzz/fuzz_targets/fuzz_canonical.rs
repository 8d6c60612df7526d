#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use loci::hash::{HashMode, Xxh64};
use loci::node::{Node, Op};
use loci::tree::Tree;

/// Structured input: a small commutative expression assembled from leaf
/// identities, in both operand orders.
#[derive(Arbitrary, Debug)]
struct CanonicalInput {
    /// Leaf variable identities (capped at 8).
    leaves: Vec<u8>,
    /// Whether to nest an inner addition inside the outer one.
    nested: bool,
    /// Hash in strict mode.
    strict: bool,
}

/// Assemble one addition over the given operand blocks, optionally
/// reversing the outer operand order. The operand multiset is identical
/// either way.
fn build(blocks: &[Vec<Node>], reversed: bool) -> Tree {
    let mut nodes: Vec<Node> = Vec::new();
    if reversed {
        for block in blocks.iter().rev() {
            nodes.extend_from_slice(block);
        }
    } else {
        for block in blocks {
            nodes.extend_from_slice(block);
        }
    }
    let mut root = Node::new(Op::Add);
    root.arity = blocks.len() as u16;
    nodes.push(root);

    let mut tree = Tree::new(nodes);
    tree.update_nodes();
    tree
}

fuzz_target!(|input: CanonicalInput| {
    let leaves: Vec<Node> = input
        .leaves
        .iter()
        .take(8)
        .map(|&id| Node::variable(u64::from(id) + 1, 1.0))
        .collect();
    if leaves.len() < 2 {
        return;
    }
    let mode = if input.strict {
        HashMode::Strict
    } else {
        HashMode::Relaxed
    };

    // Operand blocks: optionally fold the first two leaves into a nested
    // addition that reduce must later flatten
    let nested = input.nested && leaves.len() >= 3;
    let mut blocks: Vec<Vec<Node>> = Vec::new();
    if nested {
        blocks.push(vec![leaves[0], leaves[1], Node::new(Op::Add)]);
        for &leaf in &leaves[2..] {
            blocks.push(vec![leaf]);
        }
    } else {
        for &leaf in &leaves {
            blocks.push(vec![leaf]);
        }
    }

    let mut forward = build(&blocks, false);
    let mut backward = build(&blocks, true);

    // Operand order never leaks into the structural hash
    forward.hash(&Xxh64, mode);
    backward.hash(&Xxh64, mode);
    assert_eq!(forward.hash_value(), backward.hash_value());

    // Physical canonicalization makes the trees byte-identical
    forward.sort(&Xxh64, mode);
    backward.sort(&Xxh64, mode);
    assert_eq!(forward.nodes(), backward.nodes());

    // Reduce folds redundant nesting and is idempotent
    forward.reduce();
    if nested {
        assert_eq!(forward.len(), leaves.len() + 1);
    }
    let once = forward.nodes().to_vec();
    forward.reduce();
    assert_eq!(forward.nodes(), &once[..]);
});
