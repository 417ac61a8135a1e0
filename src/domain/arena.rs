use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::term::{Term, TermDescription};

/// Tree node in the arena-based curriculum hierarchy.
#[derive(Debug)]
pub struct TermNode {
    /// Term payload of this node
    pub term: Term,
    /// Index of parent node in the arena, None for the root and detached nodes
    pub parent: Option<Index>,
    /// Previous child of the same parent, set at insertion time
    pub prev_sibling: Option<Index>,
    /// Next child of the same parent, set when a later sibling is appended
    pub next_sibling: Option<Index>,
    /// Indices of child nodes in insertion order
    pub children: Vec<Index>,
}

/// Arena-based tree holding one curriculum's worth of terms.
///
/// Uses a generational arena so that indices from a replaced tree are detected
/// instead of aliasing new nodes. The tree is rebuilt wholesale, never patched
/// from outside.
#[derive(Debug)]
pub struct TermArena {
    /// Arena storage for all tree nodes
    arena: Arena<TermNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for TermArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TermArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Create a tree holding only `root`.
    pub fn with_root(root: Term) -> Self {
        let mut tree = Self::new();
        let idx = tree.insert_detached(root);
        tree.root = Some(idx);
        tree
    }

    /// Insert a term without attaching it anywhere.
    ///
    /// Detached nodes are attached later with [`Self::add_child`]; this is what
    /// lets parsers create placeholders for parents they have not seen yet.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_detached(&mut self, term: Term) -> Index {
        self.arena.insert(TermNode {
            term,
            parent: None,
            prev_sibling: None,
            next_sibling: None,
            children: Vec::new(),
        })
    }

    /// Append `child` to `parent`'s children.
    ///
    /// Sets the child's parent and links it after the previous last child.
    /// The child must be detached and must not be an ancestor of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, child: Index) -> DomainResult<&mut Self> {
        let child_node = self.arena.get(child).ok_or(DomainError::UnknownTerm)?;
        if !self.arena.contains(parent) {
            return Err(DomainError::UnknownTerm);
        }
        if child_node.parent.is_some()
            || Some(child) == self.root
            || self.ancestors_and_self(parent).any(|idx| idx == child)
        {
            return Err(DomainError::InvalidAttachment {
                id: child_node.term.id().to_string(),
            });
        }

        let last = self.arena[parent].children.last().copied();
        if let Some(last) = last {
            self.arena[last].next_sibling = Some(child);
        }
        {
            let node = &mut self.arena[child];
            node.parent = Some(parent);
            node.prev_sibling = last;
            node.next_sibling = None;
        }
        self.arena[parent].children.push(child);
        Ok(self)
    }

    /// Insert `term` and append it to `parent` in one step.
    pub fn append_term(&mut self, parent: Index, term: Term) -> DomainResult<Index> {
        let idx = self.insert_detached(term);
        if let Err(e) = self.add_child(parent, idx).map(|_| ()) {
            self.arena.remove(idx);
            return Err(e);
        }
        Ok(idx)
    }

    /// Swap the payload of a node that has not been attached yet.
    ///
    /// Attached terms are never updated in place.
    pub fn upgrade_detached(&mut self, idx: Index, term: Term) -> DomainResult<()> {
        let is_root = Some(idx) == self.root;
        let node = self.arena.get_mut(idx).ok_or(DomainError::UnknownTerm)?;
        if node.parent.is_some() || is_root {
            return Err(DomainError::InvalidAttachment {
                id: node.term.id().to_string(),
            });
        }
        node.term = term;
        Ok(())
    }

    /// Drop every node that is not reachable from the root.
    pub fn prune_detached(&mut self) -> usize {
        let reachable: HashSet<Index> = self.iter().map(|(idx, _)| idx).collect();
        let before = self.arena.len();
        self.arena.retain(|idx, _| reachable.contains(&idx));
        before - self.arena.len()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TermNode> {
        self.arena.get(idx)
    }

    pub fn term(&self, idx: Index) -> DomainResult<&Term> {
        self.node(idx).map(|node| &node.term)
    }

    pub fn describe(&self, idx: Index) -> DomainResult<TermDescription> {
        self.term(idx).map(Term::describe)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_term(&self) -> Option<&Term> {
        self.root.and_then(|idx| self.get_node(idx)).map(|n| &n.term)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn node(&self, idx: Index) -> DomainResult<&TermNode> {
        self.arena.get(idx).ok_or(DomainError::UnknownTerm)
    }

    fn id_of(&self, idx: Index) -> String {
        self.arena
            .get(idx)
            .map(|n| n.term.id().to_string())
            .unwrap_or_default()
    }

    // ============================================================
    // Navigation
    // ============================================================

    pub fn has_children(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(|n| !n.children.is_empty())
    }

    /// Children in insertion order. An empty child list is an error, not `[]`.
    pub fn children(&self, idx: Index) -> DomainResult<&[Index]> {
        let node = self.node(idx)?;
        if node.children.is_empty() {
            return Err(DomainError::NoChildren {
                id: node.term.id().to_string(),
            });
        }
        Ok(&node.children)
    }

    pub fn has_parent(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(|n| n.parent.is_some())
    }

    pub fn parent(&self, idx: Index) -> DomainResult<Index> {
        self.node(idx)?.parent.ok_or_else(|| DomainError::NoParent {
            id: self.id_of(idx),
        })
    }

    /// A term is a root when it has no parent.
    pub fn is_root(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(|n| n.parent.is_none())
    }

    /// The ultimate ancestor of `idx`. Fails on the root itself.
    pub fn get_root(&self, idx: Index) -> DomainResult<Index> {
        if self.is_root(idx) {
            return Err(DomainError::IsRoot {
                id: self.id_of(idx),
            });
        }
        self.node(idx)?;
        self.ancestors_and_self(idx)
            .last()
            .ok_or(DomainError::UnknownTerm)
    }

    pub fn has_prev_sibling(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(|n| n.prev_sibling.is_some())
    }

    pub fn prev_sibling(&self, idx: Index) -> DomainResult<Index> {
        self.node(idx)?
            .prev_sibling
            .ok_or_else(|| DomainError::NoPrevSibling {
                id: self.id_of(idx),
            })
    }

    pub fn has_next_sibling(&self, idx: Index) -> bool {
        self.arena.get(idx).is_some_and(|n| n.next_sibling.is_some())
    }

    pub fn next_sibling(&self, idx: Index) -> DomainResult<Index> {
        self.node(idx)?
            .next_sibling
            .ok_or_else(|| DomainError::NoNextSibling {
                id: self.id_of(idx),
            })
    }

    /// Whether `child` is among `parent`'s direct children (index identity).
    pub fn contains_child(&self, parent: Index, child: Index) -> bool {
        self.arena
            .get(parent)
            .is_some_and(|n| n.children.contains(&child))
    }

    /// `idx`, its parent, grandparent and so on up to the top.
    pub fn ancestors_and_self(&self, idx: Index) -> impl Iterator<Item = Index> + '_ {
        std::iter::successors(self.arena.get(idx).map(|_| idx), move |&current| {
            self.arena.get(current).and_then(|n| n.parent)
        })
    }

    /// Number of parent hops from `idx` to the top of its tree.
    pub fn node_depth(&self, idx: Index) -> usize {
        self.ancestors_and_self(idx).count().saturating_sub(1)
    }

    // ============================================================
    // Searches
    // ============================================================

    pub fn find_child_by_identifier(&self, idx: Index, id: &str) -> Option<Index> {
        self.arena.get(idx)?.children.iter().copied().find(|&child| {
            self.arena
                .get(child)
                .is_some_and(|n| n.term.id() == id)
        })
    }

    /// First depth-first match among all descendants of `idx`.
    pub fn find_child_by_identifier_recursive(&self, idx: Index, id: &str) -> Option<Index> {
        self.descendants(idx)
            .find(|(_, node)| node.term.id() == id)
            .map(|(child, _)| child)
    }

    pub fn find_children_by_name(&self, idx: Index, name: &str) -> Vec<Index> {
        self.arena
            .get(idx)
            .map(|node| {
                node.children
                    .iter()
                    .copied()
                    .filter(|&child| {
                        self.arena
                            .get(child)
                            .is_some_and(|n| n.term.matches_name(name))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every descendant of `idx` whose name matches, in depth-first order.
    pub fn find_children_by_name_recursive(&self, idx: Index, name: &str) -> Vec<Index> {
        self.descendants(idx)
            .filter(|(_, node)| node.term.matches_name(name))
            .map(|(child, _)| child)
            .collect()
    }

    // ============================================================
    // Traversal
    // ============================================================

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree below `idx`, excluding `idx`.
    pub fn descendants(&self, idx: Index) -> impl Iterator<Item = (Index, &TermNode)> + '_ {
        TreeIterator::new(self, Some(idx)).skip(1)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Terms without children, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TermArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TermArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TermNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TermArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TermArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TermNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
