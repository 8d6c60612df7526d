//! Hash-based population diversity.
//!
//! Every tree is summarized as the sorted multiset of its per-node
//! structural hashes; the distance between two trees is one minus the
//! normalized overlap of those multisets. The population mean of all
//! pairwise distances is a cheap convergence signal: it drops toward zero
//! as the population fills up with structural duplicates.

use rayon::prelude::*;

use crate::hash::{BytesHasher, HashMode};
use crate::individual::Individual;
use crate::tree::Tree;

/// Sorted per-node structural hashes of a tree.
///
/// Works on a private copy so the input tree's stored hashes are left
/// untouched.
#[must_use]
pub fn hash_vector<H: BytesHasher>(tree: &Tree, hasher: &H, mode: HashMode) -> Vec<u64> {
    let mut tree = tree.clone();
    tree.hash(hasher, mode);
    let mut hashes: Vec<u64> = tree.nodes().iter().map(|n| n.calculated_hash).collect();
    hashes.sort_unstable();
    hashes
}

/// Structural distance between two sorted hash multisets, in `[0, 1]`.
///
/// `1 − 2·|a ∩ b| / (|a| + |b|)`; 0 for identical trees, 1 for trees
/// sharing no subtree hashes. Both inputs must be sorted.
#[must_use]
pub fn distance(a: &[u64], b: &[u64]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let mut common = 0usize;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    1.0 - 2.0 * common as f64 / (a.len() + b.len()) as f64
}

/// Mean pairwise structural distance over a population.
///
/// Hashing and the distance matrix rows run in parallel; the population is
/// only read. Returns 0 for populations of fewer than two individuals.
#[must_use]
pub fn mean_diversity<H>(population: &[Individual], hasher: &H, mode: HashMode) -> f64
where
    H: BytesHasher + Sync,
{
    let size = population.len();
    if size < 2 {
        return 0.0;
    }

    let vectors: Vec<Vec<u64>> = population
        .par_iter()
        .map(|ind| hash_vector(&ind.genotype, hasher, mode))
        .collect();

    let total: f64 = (0..size - 1)
        .into_par_iter()
        .map(|i| {
            let mut row = 0.0;
            for j in i + 1..size {
                row += distance(&vectors[i], &vectors[j]);
            }
            row
        })
        .sum();

    let pairs = size * (size - 1) / 2;
    total / pairs as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Xxh64;
    use crate::node::{Node, Op};

    fn tree(nodes: Vec<Node>) -> Tree {
        let mut tree = Tree::new(nodes);
        tree.update_nodes();
        tree
    }

    fn individual(nodes: Vec<Node>) -> Individual {
        Individual {
            genotype: tree(nodes),
            fitness: vec![0.0],
        }
    }

    #[test]
    fn test_identical_trees_have_zero_distance() {
        let nodes = vec![
            Node::variable(1, 1.0),
            Node::variable(2, 1.0),
            Node::new(Op::Add),
        ];
        let a = hash_vector(&tree(nodes.clone()), &Xxh64, HashMode::Relaxed);
        let b = hash_vector(&tree(nodes), &Xxh64, HashMode::Relaxed);
        assert!(distance(&a, &b).abs() < f64::EPSILON);
    }

    #[test]
    fn test_commutative_variants_have_zero_distance() {
        let x = Node::variable(1, 1.0);
        let y = Node::variable(2, 1.0);
        let a = hash_vector(&tree(vec![x, y, Node::new(Op::Add)]), &Xxh64, HashMode::Relaxed);
        let b = hash_vector(&tree(vec![y, x, Node::new(Op::Add)]), &Xxh64, HashMode::Relaxed);
        assert!(distance(&a, &b).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disjoint_trees_have_unit_distance() {
        let a = hash_vector(&tree(vec![Node::variable(1, 1.0)]), &Xxh64, HashMode::Relaxed);
        let b = hash_vector(&tree(vec![Node::variable(2, 1.0)]), &Xxh64, HashMode::Relaxed);
        assert!((distance(&a, &b) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clone_population_has_zero_diversity() {
        let nodes = vec![
            Node::variable(1, 1.0),
            Node::constant(2.0),
            Node::new(Op::Mul),
        ];
        let population = vec![individual(nodes.clone()), individual(nodes.clone()), individual(nodes)];
        let diversity = mean_diversity(&population, &Xxh64, HashMode::Relaxed);
        assert!(diversity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_mixed_population_has_positive_diversity() {
        let population = vec![
            individual(vec![Node::variable(1, 1.0)]),
            individual(vec![Node::variable(2, 1.0)]),
            individual(vec![
                Node::variable(1, 1.0),
                Node::variable(2, 1.0),
                Node::new(Op::Add),
            ]),
        ];
        let diversity = mean_diversity(&population, &Xxh64, HashMode::Relaxed);
        assert!(diversity > 0.0);
        assert!(diversity <= 1.0);
    }

    #[test]
    fn test_tiny_population_has_zero_diversity() {
        assert!(mean_diversity(&[], &Xxh64, HashMode::Relaxed).abs() < f64::EPSILON);
        let lone = vec![individual(vec![Node::constant(1.0)])];
        assert!(mean_diversity(&lone, &Xxh64, HashMode::Relaxed).abs() < f64::EPSILON);
    }
}
