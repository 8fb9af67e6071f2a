use std::{fmt::Debug, hash::Hash};

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use sparse_rmq::SparseTable;

use crate::{BinaryTree, Error, Result, tour::EulerTour};

/// Lowest common ancestor index over a static binary tree
///
/// The tree is linearized by an Euler tour whose entries are preorder indices. As the root of any
/// subtree has the smallest preorder index in that subtree, the smallest entry of the tour between
/// the first occurrences of two nodes is their lowest common ancestor. A sparse table over the tour
/// answers that range minimum in O(1) time after O(n log n) preprocessing.
///
/// The index does not borrow the tree. If the tree changes after the index is built, answers are
/// meaningless; use [`LcaIndex::get_lca_in`] to check the tree's generation on each query.
#[derive(Debug, Clone)]
pub struct LcaIndex<N> {
    generation: u64,
    tour: EulerTour<N>,
    rmq_table: SparseTable<u32>, // Range Minimum Query table over the Euler tour
}

impl<N: Copy + Eq + Hash + Debug> LcaIndex<N> {
    /// Index the whole tree, starting from its root
    pub fn new<T>(tree: &T) -> Result<Self>
    where
        T: BinaryTree<Node = N> + ?Sized,
    {
        let root = tree.root().ok_or(Error::InvalidRoot)?;
        Self::with_root(tree, root)
    }

    /// Index the subtree below `root`
    ///
    /// Nodes outside of that subtree are not indexed.
    pub fn with_root<T>(tree: &T, root: N) -> Result<Self>
    where
        T: BinaryTree<Node = N> + ?Sized,
    {
        if !tree.contains(root) {
            return Err(Error::InvalidRoot);
        }

        let tour = EulerTour::build(tree, root)?;
        let rmq_table = SparseTable::new(&tour.euler_tour);
        debug!(
            "Indexed {} nodes, Euler tour of length {}, {} RMQ levels",
            tour.nodes.len(),
            tour.euler_tour.len(),
            rmq_table.n_levels()
        );

        Ok(Self {
            generation: tree.generation(),
            tour,
            rmq_table,
        })
    }

    /// Find the lowest common ancestor of two nodes in O(1) time
    pub fn get_lca(&self, a: N, b: N) -> Result<N> {
        let preorder_a = self.preorder_of(a)?;
        let preorder_b = self.preorder_of(b)?;

        // First occurrences are ordered the same way as preorder indices
        let (lower, upper) = if preorder_a <= preorder_b {
            (preorder_a, preorder_b)
        } else {
            (preorder_b, preorder_a)
        };
        let start = self.tour.first_occurrences[lower as usize];
        let end = self.tour.first_occurrences[upper as usize];

        let lca_in_tour = self.rmq_table.min_in(start, end).pos();
        let lca = self.tour.euler_tour[lca_in_tour as usize];
        Ok(self.tour.nodes[lca as usize])
    }

    /// Like [`LcaIndex::get_lca`], but fails if `tree` changed since the index was built
    pub fn get_lca_in<T>(&self, tree: &T, a: N, b: N) -> Result<N>
    where
        T: BinaryTree<Node = N> + ?Sized,
    {
        self.check_fresh(tree)?;
        self.get_lca(a, b)
    }

    /// Whether `tree` is at the generation this index was built at
    pub fn is_fresh<T>(&self, tree: &T) -> bool
    where
        T: BinaryTree<Node = N> + ?Sized,
    {
        tree.generation() == self.generation
    }

    fn check_fresh<T>(&self, tree: &T) -> Result<()>
    where
        T: BinaryTree<Node = N> + ?Sized,
    {
        let current = tree.generation();
        if current == self.generation {
            Ok(())
        } else {
            Err(Error::StaleIndex {
                built: self.generation,
                current,
            })
        }
    }

    /// Find the lowest common ancestors of many pairs, stopping at the first failure
    pub fn lca_many(&self, pairs: impl IntoIterator<Item = (N, N)>) -> Result<Vec<N>> {
        pairs
            .into_iter()
            .map(|(a, b)| self.get_lca(a, b))
            .collect()
    }

    /// Find the lowest common ancestors of many pairs in parallel
    ///
    /// The index is read-only once built, so queries share it without locking.
    #[cfg(feature = "parallel")]
    pub fn par_lca_many(&self, pairs: &[(N, N)]) -> Result<Vec<N>>
    where
        N: Send + Sync,
    {
        pairs
            .par_iter()
            .map(|&(a, b)| self.get_lca(a, b))
            .collect()
    }
}

// Util methods
impl<N: Copy + Eq + Hash + Debug> LcaIndex<N> {
    /// Number of indexed nodes
    pub fn len(&self) -> usize {
        self.tour.nodes.len()
    }

    /// Always false, an index holds at least its root
    pub fn is_empty(&self) -> bool {
        self.tour.nodes.is_empty()
    }

    pub fn root(&self) -> N {
        self.tour.nodes[0]
    }

    /// Preorder index of a node, or `None` if it is not indexed
    pub fn preorder(&self, node: N) -> Option<u32> {
        self.tour.preorder.get(&node).copied()
    }

    /// Node with the given preorder index
    pub fn node_at(&self, preorder: u32) -> Option<N> {
        self.tour.nodes.get(preorder as usize).copied()
    }

    /// Depth of a node, the root is at depth 0
    pub fn depth(&self, node: N) -> Result<u32> {
        let preorder = self.preorder_of(node)?;
        let first_occurrence = self.tour.first_occurrences[preorder as usize];
        Ok(self.tour.levels[first_occurrence as usize])
    }

    /// Whether `a` is an ancestor of `b`, where a node is an ancestor of itself
    ///
    /// The visits of a subtree form a contiguous segment of the Euler tour, so this only compares
    /// the first and last occurrences of both nodes.
    pub fn is_ancestor(&self, a: N, b: N) -> Result<bool> {
        let a = self.preorder_of(a)? as usize;
        let b = self.preorder_of(b)? as usize;
        Ok(self.tour.first_occurrences[a] <= self.tour.first_occurrences[b]
            && self.tour.last_occurrences[b] <= self.tour.last_occurrences[a])
    }

    /// Number of edges on the path between two nodes
    pub fn distance(&self, a: N, b: N) -> Result<u32> {
        let lca = self.get_lca(a, b)?;
        Ok(self.depth(a)? + self.depth(b)? - 2 * self.depth(lca)?)
    }

    fn preorder_of(&self, node: N) -> Result<u32> {
        self.preorder(node).ok_or_else(|| Error::NodeNotIndexed {
            node: format!("{node:?}"),
        })
    }
}

// Diagnostics
impl<N> LcaIndex<N> {
    /// Preorder index of the node at each visit of the Euler tour
    pub fn euler_tour(&self) -> &[u32] {
        &self.tour.euler_tour
    }

    /// Depth of the node at each visit of the Euler tour
    pub fn levels(&self) -> &[u32] {
        &self.tour.levels
    }

    /// Position of the first visit of each preorder index in the Euler tour
    pub fn first_occurrences(&self) -> &[u32] {
        &self.tour.first_occurrences
    }

    /// Render the Euler tour, its levels, the first occurrences and every level of the RMQ table
    pub fn dump(&self) -> String {
        fn line(name: &str, values: impl IntoIterator<Item = u32>) -> String {
            let values = values
                .into_iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            format!("{name}: {values}\n")
        }

        let mut out = String::new();
        out += &line("E", self.tour.euler_tour.iter().copied());
        out += &line("L", self.tour.levels.iter().copied());
        out += &line("H", self.tour.first_occurrences.iter().copied());
        for k in 0..self.rmq_table.n_levels() {
            if let Some(level) = self.rmq_table.level(k) {
                out += &line(&format!("RMQ[{k}]"), level.iter().map(|m| m.value()));
            }
        }
        out
    }
}
