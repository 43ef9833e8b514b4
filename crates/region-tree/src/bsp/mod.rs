//! Binary Space Partitioning tree for abstract spaces.
//!
//! This module provides the recursive partition structure underneath
//! [`Region`](crate::Region). Internal nodes carry a cut sub-hyperplane
//! bounded to the node's cell; leaves carry the inside/outside attribute of
//! the cell they cover. The tree supports:
//!
//! - Splitting by a sub-hyperplane, distributing every cut to its side
//! - Boolean merging (union, intersection, xor, difference) of two trees
//! - Complement by leaf flipping
//! - Pre-order traversal through visitors
//!
//! # Architecture
//!
//! - [`BspTree`]: the tree itself, a sum type of leaves and cut nodes
//! - [`BooleanOperation`]: the truth table applied at leaf level by merges
//! - [`TreeVisitor`]: visitor trait for custom traversal behavior

mod tree;
mod visitor;

pub use tree::{BooleanOperation, BspTree};
pub use visitor::{CollectingVisitor, CutVisitor, TreeVisitor};
