#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use loci::node::{Node, Op};
use loci::tree::Tree;

/// One construction step interpreted against a postfix build stack.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Step {
    /// Push a variable leaf with this identity.
    Variable(u8),
    /// Push a constant leaf.
    Constant(i16),
    /// Combine the top two stack entries with a binary operator.
    Binary(u8),
    /// Wrap the top stack entry in a unary operator.
    Unary(u8),
}

const BINARY: [Op; 5] = [Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Pow];
const UNARY: [Op; 6] = [Op::Exp, Op::Log, Op::Sin, Op::Cos, Op::Sqrt, Op::Tanh];

/// Build a well-formed postfix sequence from arbitrary steps: leaves push,
/// operators pop, and whatever remains on the stack is folded with
/// additions so the result always has exactly one root.
fn build(steps: &[Step]) -> Option<Tree> {
    let mut stack: Vec<Vec<Node>> = Vec::new();

    for step in steps.iter().take(256) {
        match *step {
            Step::Variable(id) => stack.push(vec![Node::variable(u64::from(id) + 1, 1.0)]),
            Step::Constant(v) => stack.push(vec![Node::constant(f64::from(v))]),
            Step::Binary(op) => {
                if stack.len() >= 2 {
                    let b = stack.pop()?;
                    let mut a = stack.pop()?;
                    a.extend(b);
                    a.push(Node::new(BINARY[usize::from(op) % BINARY.len()]));
                    stack.push(a);
                }
            }
            Step::Unary(op) => {
                if let Some(top) = stack.last_mut() {
                    top.push(Node::new(UNARY[usize::from(op) % UNARY.len()]));
                }
            }
        }
    }

    let mut nodes = stack.pop()?;
    while let Some(next) = stack.pop() {
        nodes.extend(next);
        nodes.push(Node::new(Op::Add));
    }
    if nodes.len() > u16::MAX as usize {
        return None;
    }

    let mut tree = Tree::new(nodes);
    tree.update_nodes();
    Some(tree)
}

fuzz_target!(|steps: Vec<Step>| {
    let Some(tree) = build(&steps) else { return };

    // Root spans the whole tree
    let root = tree.len() - 1;
    assert_eq!(tree[root].length as usize, tree.len());

    // Cursor invariant: every child inside the parent's subtree range,
    // exactly arity children, strictly decreasing indices
    for i in 0..tree.len() {
        let lower = i + 1 - tree[i].length as usize;
        let children = tree.child_indices(i);
        assert_eq!(children.len(), tree[i].arity as usize);
        for pair in children.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        for &child in &children {
            assert!(child >= lower && child < i, "cursor escaped subtree range");
        }

        let sum: usize = children.iter().map(|&j| tree[j].length as usize).sum();
        assert_eq!(sum + 1, tree[i].length as usize);
    }

    // Bookkeeping is idempotent
    let mut again = tree.clone();
    again.update_nodes();
    assert_eq!(again.nodes(), tree.nodes());

    // Subtree extraction is root-complete for every index
    for i in 0..tree.len() {
        let sub = tree.subtree(i);
        assert_eq!(sub.len(), tree[i].length as usize);
        assert_eq!(sub[sub.len() - 1].length as usize, sub.len());
    }
});
