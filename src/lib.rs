// Allow unwrap and exact float checks in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Loci: postfix expression-tree genotypes and recombination for symbolic
//! regression.
//!
//! Expression trees are stored as flat, cache-friendly postfix arrays with
//! self-describing bookkeeping and Merkle-style structural hashing; a
//! policy-driven recombination engine produces candidate offspring and
//! enforces an acceptance protocol on top of them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Recombination (strict / elitist)  │
//! ├─────────────────────────────────────┤
//! │ Selection │ Diversity │ Individuals │
//! ├─────────────────────────────────────┤
//! │   Hashing & Canonicalization        │
//! ├─────────────────────────────────────┤
//! │   Postfix Tree (nodes + cursor)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! The numeric interpreter, expression parser, dataset handling and the
//! concrete crossover/mutation operator bodies are external collaborators;
//! they plug in through the traits in [`recombine`].

mod canonical;
pub mod diversity;
pub mod hash;
pub mod individual;
pub mod node;
pub mod recombine;
pub mod selection;
pub mod tree;

pub use hash::{BytesHasher, HashMode, Xxh64};
pub use individual::Individual;
pub use node::{Node, Op};
pub use recombine::{
    Crossover, ElitistRecombinator, Evaluator, Mutator, Selector, StrictRecombinator,
};
pub use selection::{FitnessStats, SelectionConfig, TournamentSelector};
pub use tree::{Children, Tree};
