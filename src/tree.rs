//! Binary tree of ratings built in level order
//!
//! The value at index `i` gets children `2i + 1` and `2i + 2`, so the tree is
//! complete and its level-order traversal gives back the input.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
struct Node {
    value: f64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn build(values: &[f64], index: usize) -> Option<Box<Node>> {
        let value = *values.get(index)?;
        Some(Box::new(Node {
            value,
            left: Node::build(values, 2 * index + 1),
            right: Node::build(values, 2 * index + 2),
        }))
    }

    fn height(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |n| n.height());
        let right = self.right.as_ref().map_or(0, |n| n.height());
        1 + left.max(right)
    }
}

/// Level-order binary tree of business ratings
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTree {
    root: Box<Node>,
}

impl RatingTree {
    /// Builds the tree, or `None` when there are no values
    pub fn build(values: &[f64]) -> Option<Self> {
        Node::build(values, 0).map(|root| Self { root })
    }

    /// Values in level order
    pub fn values(&self) -> Vec<f64> {
        let mut values = Vec::new();
        let mut queue = VecDeque::from([&*self.root]);

        while let Some(node) = queue.pop_front() {
            values.push(node.value);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        values
    }

    /// Number of levels
    pub fn height(&self) -> usize {
        self.root.height()
    }
}

/// Renders the tree sideways: right subtree above, left below, one node per line
impl fmt::Display for RatingTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(
            f: &mut fmt::Formatter<'_>,
            node: &Node,
            prefix: &str,
            connector: &str,
        ) -> fmt::Result {
            if let Some(right) = &node.right {
                write_node(f, right, &format!("{}      ", prefix), "┌── ")?;
            }
            writeln!(f, "{}{}{}", prefix, connector, node.value)?;
            if let Some(left) = &node.left {
                write_node(f, left, &format!("{}      ", prefix), "└── ")?;
            }
            Ok(())
        }

        write_node(f, &self.root, "", "")
    }
}
