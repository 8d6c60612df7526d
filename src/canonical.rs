//! Canonical ordering and syntactic reduction of commutative operators.
//!
//! [`Tree::sort`] makes structurally equivalent trees byte-identical, not
//! merely hash-identical, by physically reordering commutative operands into
//! the canonical order hashing uses. [`Tree::reduce`] removes the redundant
//! nesting of a commutative operator directly inside the same operator,
//! which crossover routinely introduces.

use log::debug;

use crate::hash::{BytesHasher, HashMode, combine, leaf_hash};
use crate::node::Node;
use crate::tree::Tree;

impl Tree {
    /// Physically reorder the children of every commutative node into
    /// canonical order, recomputing structural hashes along the way.
    ///
    /// Children move as whole subtree blocks, so previously computed child
    /// hashes stay valid while blocks are permuted. Ends with a full
    /// bookkeeping recomputation since node positions changed.
    pub fn sort<H: BytesHasher>(&mut self, hasher: &H, mode: HashMode) -> &mut Self {
        let mut children: Vec<usize> = Vec::new();
        let mut block: Vec<Node> = Vec::with_capacity(self.len());
        let mut buf: Vec<u8> = Vec::new();

        for i in 0..self.len() {
            let node = self[i];
            if node.is_leaf() {
                self[i].calculated_hash = leaf_hash(hasher, mode, &node);
                continue;
            }

            let length = node.length as usize;
            let lower = i + 1 - length;

            if node.is_commutative() {
                if node.arity as usize + 1 == length {
                    // all children are single leaves
                    self.nodes_mut()[lower..i].sort_by(Node::canonical_cmp);
                } else {
                    children.clear();
                    children.extend(self.children(i));
                    children.sort_by(|&a, &b| self[a].canonical_cmp(&self[b]));

                    for &j in &children {
                        let child_lower = j + 1 - self[j].length as usize;
                        block.extend_from_slice(&self.nodes()[child_lower..=j]);
                    }
                    self.nodes_mut()[lower..i].copy_from_slice(&block);
                    block.clear();
                }
            }

            children.clear();
            children.extend(self.children(i));
            if node.is_commutative() {
                children.sort_by(|&a, &b| self[a].canonical_cmp(&self[b]));
            }
            let hash = combine(
                hasher,
                &mut buf,
                children.iter().map(|&j| self[j].calculated_hash),
                node.hash_value,
            );
            self[i].calculated_hash = hash;
        }
        self.update_nodes()
    }

    /// Fold redundant same-operator nesting under commutative nodes.
    ///
    /// A direct child whose static operation hash equals its commutative
    /// parent's own is absorbed: the parent takes over the child's operands
    /// (arity grows by `child.arity - 1`) and the child node is disabled.
    /// Disabled nodes are then compacted out in order and bookkeeping is
    /// recomputed. Idempotent: a second call produces no further change.
    ///
    /// Folding is keyed on exact static-hash equality of the operator tags;
    /// deeper algebraic identities are out of scope.
    ///
    /// The compaction also removes nodes previously disabled through
    /// [`Tree::set_enabled`]; a caller that soft-deleted whole subtrees must
    /// have adjusted the parent's arity to match.
    pub fn reduce(&mut self) -> &mut Self {
        let mut children: Vec<usize> = Vec::new();
        let mut folded = 0usize;

        for i in 0..self.len() {
            let node = self[i];
            if node.is_leaf() || !node.is_commutative() {
                continue;
            }

            children.clear();
            children.extend(self.children(i));
            for &j in &children {
                if self[j].is_enabled && self[i].hash_value == self[j].hash_value {
                    let absorbed = self[j].arity - 1;
                    self[j].is_enabled = false;
                    self[i].arity += absorbed;
                    folded += 1;
                }
            }
        }

        if folded > 0 {
            debug!("reduce folded {folded} redundant nodes");
        }
        self.nodes_mut().retain(|n| n.is_enabled);
        self.update_nodes()
    }
}
