//! Text renderings of a term tree
//!
//! [`ascii_dump`] is the byte-exact format used as the equality oracle in tests;
//! [`TermTreeConvert`] builds a `termtree` view for humans.

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::TermArena;

const INDENT: &str = "    ";
const ROOT_MARKER: &str = "--- ";
const BRANCH_MARKER: &str = "+-- ";

/// Depth-first dump, one `<type>:<id>` per line.
///
/// ```text
/// --- root:root
///     +-- discipline:languages
///         +-- discipline:french
/// ```
/// Empty trees dump to the empty string; there is no trailing newline.
#[instrument(level = "debug", skip(tree))]
pub fn ascii_dump(tree: &TermArena) -> String {
    let Some(root) = tree.root() else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(tree.len());
    let mut stack: Vec<(Index, usize)> = vec![(root, 0)];
    while let Some((idx, depth)) = stack.pop() {
        let Some(node) = tree.get_node(idx) else {
            continue;
        };
        let marker = if depth == 0 { ROOT_MARKER } else { BRANCH_MARKER };
        lines.push(format!("{}{}{}", INDENT.repeat(depth), marker, node.term));
        for &child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines.join("\n")
}

pub trait TermTreeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TermTreeConvert for TermArena {
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(root_idx) = self.root() {
            fn build_tree(arena: &TermArena, node_idx: Index, parent_tree: &mut Tree<String>) {
                if let Some(node) = arena.get_node(node_idx) {
                    for &child_idx in &node.children {
                        if let Some(child) = arena.get_node(child_idx) {
                            let mut child_tree = Tree::new(child.term.to_string());
                            build_tree(arena, child_idx, &mut child_tree);
                            parent_tree.push(child_tree);
                        }
                    }
                }
            }

            let label = self
                .get_node(root_idx)
                .map(|n| n.term.to_string())
                .unwrap_or_default();
            let mut tree = Tree::new(label);
            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}
