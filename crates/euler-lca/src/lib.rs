#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![doc = include_str!("../README.md")]

use std::{fmt::Debug, hash::Hash};

mod error;
pub use error::{Error, Result};

// A reference host tree backed by an arena
pub mod arena;

mod tour;

pub mod index;

pub mod prelude {
    pub use super::{
        BinaryTree, Error,
        arena::{ArenaTree, NodeId},
        index::LcaIndex,
    };
}

/// A binary tree which can be indexed for lowest common ancestor queries.
///
/// The index never modifies the tree. It only walks it once through `left` and `right` and keeps
/// its own table from node to preorder index.
pub trait BinaryTree {
    /// Handle of a node in the tree
    ///
    /// Handles must be cheap to copy and identify a node uniquely within the tree.
    type Node: Copy + Eq + Hash + Debug;

    /// The root of the tree, or `None` if the tree is empty
    fn root(&self) -> Option<Self::Node>;

    fn left(&self, node: Self::Node) -> Option<Self::Node>;

    fn right(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether the handle belongs to this tree
    fn contains(&self, _node: Self::Node) -> bool {
        true
    }

    /// A counter bumped on every structural change of the tree
    ///
    /// An index remembers the generation it was built at, so queries checked against the tree can
    /// detect that the tree has changed since. Trees which are never mutated can keep the default.
    fn generation(&self) -> u64 {
        0
    }
}

impl<T: BinaryTree + ?Sized> BinaryTree for &T {
    type Node = T::Node;

    fn root(&self) -> Option<Self::Node> {
        T::root(self)
    }

    fn left(&self, node: Self::Node) -> Option<Self::Node> {
        T::left(self, node)
    }

    fn right(&self, node: Self::Node) -> Option<Self::Node> {
        T::right(self, node)
    }

    fn contains(&self, node: Self::Node) -> bool {
        T::contains(self, node)
    }

    fn generation(&self) -> u64 {
        T::generation(self)
    }
}
