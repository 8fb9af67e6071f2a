//! Euler tour of a binary tree
//!
//! Every node gets a preorder index on arrival, and the tour records one entry on arrival plus one
//! entry after returning from each existing child. So a leaf occurs once, a node with one child
//! twice and a node with two children three times.

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use log::trace;

use crate::{BinaryTree, Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct EulerTour<N> {
    pub(crate) euler_tour: Vec<u32>,        // Preorder index of the node at each visit
    pub(crate) levels: Vec<u32>,            // Depth of the node at each visit
    pub(crate) first_occurrences: Vec<u32>, // Position of first occurrence of each preorder index
    pub(crate) last_occurrences: Vec<u32>,  // Position of last occurrence of each preorder index
    pub(crate) nodes: Vec<N>,               // Node of each preorder index
    pub(crate) preorder: HashMap<N, u32>,   // Preorder index of each node
}

/// Pending work of the depth-first walk
enum Visit<N> {
    Enter { node: N, depth: u32 },
    Return { preorder: u32, depth: u32 },
}

impl<N: Copy + Eq + Hash + Debug> EulerTour<N> {
    /// Walk the tree below `root` in preorder, left subtree first.
    ///
    /// The walk uses an explicit stack, so deep trees such as long chains do not overflow the call
    /// stack.
    pub(crate) fn build<T>(tree: &T, root: N) -> Result<Self>
    where
        T: BinaryTree<Node = N> + ?Sized,
    {
        let mut tour = Self {
            euler_tour: Vec::new(),
            levels: Vec::new(),
            first_occurrences: Vec::new(),
            last_occurrences: Vec::new(),
            nodes: Vec::new(),
            preorder: HashMap::new(),
        };

        let mut stack = vec![Visit::Enter {
            node: root,
            depth: 0,
        }];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter { node, depth } => {
                    // Never exceeds the tour length, which is checked in `visit`
                    let preorder = tour.nodes.len() as u32;
                    if tour.preorder.insert(node, preorder).is_some() {
                        return Err(Error::NotATree {
                            node: format!("{node:?}"),
                        });
                    }
                    trace!("Preorder {preorder} at depth {depth}: {node:?}");

                    let pos = tour.visit(preorder, depth)?;
                    tour.nodes.push(node);
                    tour.first_occurrences.push(pos);
                    tour.last_occurrences.push(pos);

                    // Right is pushed first so the left subtree is walked first
                    if let Some(right) = tree.right(node) {
                        check_child(tree, node, right)?;
                        stack.push(Visit::Return { preorder, depth });
                        stack.push(Visit::Enter {
                            node: right,
                            depth: depth + 1,
                        });
                    }
                    if let Some(left) = tree.left(node) {
                        check_child(tree, node, left)?;
                        stack.push(Visit::Return { preorder, depth });
                        stack.push(Visit::Enter {
                            node: left,
                            depth: depth + 1,
                        });
                    }
                }
                Visit::Return { preorder, depth } => {
                    let pos = tour.visit(preorder, depth)?;
                    tour.last_occurrences[preorder as usize] = pos;
                }
            }
        }

        debug_assert_eq!(tour.nodes.len(), tour.first_occurrences.len());
        debug_assert_eq!(tour.euler_tour.len(), tour.levels.len());

        Ok(tour)
    }

    /// Append a visit to the tour and return its position
    fn visit(&mut self, preorder: u32, depth: u32) -> Result<u32> {
        let pos = self.euler_tour.len();
        if pos >= u32::MAX as usize {
            return Err(Error::TooLarge { len: pos + 1 });
        }
        self.euler_tour.push(preorder);
        self.levels.push(depth);
        Ok(pos as u32)
    }
}

/// Children are only followed if the tree claims them, so a foreign handle is never dereferenced
fn check_child<T>(tree: &T, parent: T::Node, child: T::Node) -> Result<()>
where
    T: BinaryTree + ?Sized,
{
    if tree.contains(child) {
        Ok(())
    } else {
        Err(Error::ForeignNode {
            node: format!("{child:?}"),
            parent: format!("{parent:?}"),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::arena::{ArenaTree, NodeId};

    /// `((A,B)C,(D,E)F)R`, returns the tree with nodes `[A, B, C, D, E, F, R]`
    fn balanced() -> (ArenaTree, [NodeId; 7]) {
        let mut tree = ArenaTree::new();
        let a = tree.add_leaf();
        let b = tree.add_leaf();
        let c = tree.add_node(Some(a), Some(b));
        let d = tree.add_leaf();
        let e = tree.add_leaf();
        let f = tree.add_node(Some(d), Some(e));
        let r = tree.add_node(Some(c), Some(f));
        tree.set_root(Some(r));
        (tree, [a, b, c, d, e, f, r])
    }

    #[test]
    fn test_balanced_tour() {
        let (tree, [a, b, c, d, e, f, r]) = balanced();
        let tour = EulerTour::build(&tree, r).unwrap();

        assert_eq!(tour.nodes, vec![r, c, a, b, f, d, e]);
        assert_eq!(tour.euler_tour, vec![0, 1, 2, 1, 3, 1, 0, 4, 5, 4, 6, 4, 0]);
        assert_eq!(tour.levels, vec![0, 1, 2, 1, 2, 1, 0, 1, 2, 1, 2, 1, 0]);
        assert_eq!(tour.first_occurrences, vec![0, 1, 2, 4, 7, 8, 10]);
        assert_eq!(tour.last_occurrences, vec![12, 5, 2, 4, 11, 8, 10]);
        // One arrival per node plus one return per edge
        assert_eq!(tour.euler_tour.len(), 2 * 7 - 1);

        for (i, node) in tour.nodes.iter().enumerate() {
            assert_eq!(tour.preorder[node], i as u32);
        }
        assert_eq!(tour.preorder[&f], 4);
        assert_eq!(tour.preorder[&a], 2);
        assert_eq!(tour.preorder[&b], 3);
        assert_eq!(tour.preorder[&d], 5);
        assert_eq!(tour.preorder[&e], 6);
        assert_eq!(tour.preorder[&c], 1);
    }

    #[test]
    fn test_single_child_visited_twice() {
        let mut tree = ArenaTree::new();
        let leaf = tree.add_leaf();
        let mid = tree.add_node(None, Some(leaf));
        let root = tree.add_node(Some(mid), None);
        tree.set_root(Some(root));

        let tour = EulerTour::build(&tree, root).unwrap();
        assert_eq!(tour.euler_tour, vec![0, 1, 2, 1, 0]);
        assert_eq!(tour.levels, vec![0, 1, 2, 1, 0]);
        assert_eq!(tour.first_occurrences, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_leaf() {
        let mut tree = ArenaTree::new();
        let root = tree.add_leaf();
        let tour = EulerTour::build(&tree, root).unwrap();
        assert_eq!(tour.euler_tour, vec![0]);
        assert_eq!(tour.levels, vec![0]);
        assert_eq!(tour.nodes, vec![root]);
    }

    #[test]
    fn test_subtree_only() {
        let (tree, [a, b, c, ..]) = balanced();
        let tour = EulerTour::build(&tree, c).unwrap();
        assert_eq!(tour.nodes, vec![c, a, b]);
        assert_eq!(tour.euler_tour, vec![0, 1, 0, 2, 0]);
    }

    #[test]
    fn test_deep_chain() {
        let mut tree = ArenaTree::new();
        let mut node = tree.add_leaf();
        for _ in 0..200_000 {
            node = tree.add_node(Some(node), None);
        }
        let tour = EulerTour::build(&tree, node).unwrap();
        assert_eq!(tour.nodes.len(), 200_001);
        assert_eq!(tour.euler_tour.len(), 2 * 200_001 - 1);
        assert_eq!(tour.levels.iter().max(), Some(&200_000));
    }

    #[test]
    fn test_shared_node() {
        let mut tree = ArenaTree::new();
        let shared = tree.add_leaf();
        let root = tree.add_node(Some(shared), Some(shared));
        let err = EulerTour::build(&tree, root).unwrap_err();
        assert_eq!(err, Error::NotATree {
            node: format!("{shared:?}"),
        });
    }

    #[test]
    fn test_child_from_other_arena() {
        let mut other = ArenaTree::new();
        for _ in 0..10 {
            other.add_leaf();
        }
        // Slot 10 is past the end of the indexed arena
        let foreign = other.add_leaf();
        assert_eq!(foreign.index(), 10);

        let mut tree = ArenaTree::new();
        let root = tree.add_node(Some(foreign), None);
        let err = EulerTour::build(&tree, root).unwrap_err();
        assert_eq!(err, Error::ForeignNode {
            node: format!("{foreign:?}"),
            parent: format!("{root:?}"),
        });
    }

    #[test]
    fn test_child_in_other_arena_slot() {
        let mut other = ArenaTree::new();
        let twin = other.add_leaf();

        // Slot 0 exists in both arenas, the handle still does not belong here
        let mut tree = ArenaTree::new();
        tree.add_leaf();
        let root = tree.add_node(None, Some(twin));
        assert!(matches!(
            EulerTour::build(&tree, root),
            Err(Error::ForeignNode { .. })
        ));
    }

    #[test]
    fn test_cycle() {
        let mut tree = ArenaTree::new();
        let root = tree.add_leaf();
        let child = tree.add_node(Some(root), None);
        tree.set_left(root, Some(child));
        assert!(matches!(
            EulerTour::build(&tree, root),
            Err(Error::NotATree { .. })
        ));
    }
}
