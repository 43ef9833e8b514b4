//! BSP tree structure, splitting and boolean merging.

use crate::hyperplane::{Split, SubHyperplane};
use crate::space::Space;

use super::visitor::TreeVisitor;

/// A Binary Space Partitioning tree over an abstract space.
///
/// The tree recursively divides the whole space with cut hyperplanes. Each
/// internal node carries a cut sub-hyperplane bounded to the node's cell; the
/// plus child covers the cell part on the cut's positive-offset side, the
/// minus child the negative side. Leaves carry the inside/outside attribute
/// of their cell, so the tree partitions the whole space without gaps or
/// overlaps and every leaf's attribute is determined by which side of each
/// ancestor cut its cell falls on.
///
/// # Construction
///
/// Trees are normally built through [`Region`](crate::Region) constructors
/// (convex hyperplane collections, boundary collections, interval or arc
/// endpoints). The tree operations here are the structural layer those
/// constructors and the boolean set algebra rely on.
///
/// # Immutability
///
/// Once a tree is exposed through a region it is never mutated: boolean
/// combinations always build a fresh tree, so published trees can be read
/// concurrently without locking.
#[derive(Debug, Clone)]
pub enum BspTree<S: Space> {
    /// A terminal cell, inside the represented set or not.
    Leaf(bool),
    /// A cell divided in two by a cut.
    Node {
        /// Cut sub-hyperplane, bounded to this node's cell.
        cut: S::Sub,
        /// Child covering the cut's plus side.
        plus: Box<BspTree<S>>,
        /// Child covering the cut's minus side.
        minus: Box<BspTree<S>>,
    },
}

/// Boolean combination applied leaf-by-leaf when merging two trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperation {
    /// Points inside either operand.
    Union,
    /// Points inside both operands.
    Intersection,
    /// Points inside exactly one operand.
    Xor,
    /// Points inside the first operand but not the second.
    Difference,
}

impl<S: Space> BspTree<S> {
    /// Tree covering the whole space as inside.
    pub fn full() -> Self {
        BspTree::Leaf(true)
    }

    /// Tree covering the whole space as outside.
    pub fn empty() -> Self {
        BspTree::Leaf(false)
    }

    /// Internal node from a cut and two children.
    pub fn node(cut: S::Sub, plus: BspTree<S>, minus: BspTree<S>) -> Self {
        BspTree::Node {
            cut,
            plus: Box::new(plus),
            minus: Box::new(minus),
        }
    }

    /// Returns `true` for terminal cells.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BspTree::Leaf(_))
    }

    /// Returns the cut of the root node, if any.
    #[inline]
    pub fn cut(&self) -> Option<&S::Sub> {
        match self {
            BspTree::Leaf(_) => None,
            BspTree::Node { cut, .. } => Some(cut),
        }
    }

    /// Returns the maximum depth of the tree (1 for a single leaf).
    pub fn depth(&self) -> usize {
        match self {
            BspTree::Leaf(_) => 1,
            BspTree::Node { plus, minus, .. } => 1 + plus.depth().max(minus.depth()),
        }
    }

    /// Returns the number of cut hyperplanes in the tree.
    pub fn cut_count(&self) -> usize {
        match self {
            BspTree::Leaf(_) => 0,
            BspTree::Node { plus, minus, .. } => 1 + plus.cut_count() + minus.cut_count(),
        }
    }

    /// Returns `true` if no cell of the tree is inside.
    pub fn covers_nothing(&self) -> bool {
        match self {
            BspTree::Leaf(inside) => !inside,
            BspTree::Node { plus, minus, .. } => plus.covers_nothing() && minus.covers_nothing(),
        }
    }

    /// Returns `true` if every cell of the tree is inside.
    pub fn covers_everything(&self) -> bool {
        match self {
            BspTree::Leaf(inside) => *inside,
            BspTree::Node { plus, minus, .. } => {
                plus.covers_everything() && minus.covers_everything()
            }
        }
    }

    /// Tree representing the set complement: every leaf attribute flipped,
    /// structure unchanged.
    #[must_use]
    pub fn complement(&self) -> Self {
        match self {
            BspTree::Leaf(inside) => BspTree::Leaf(!inside),
            BspTree::Node { cut, plus, minus } => {
                Self::node(cut.clone(), plus.complement(), minus.complement())
            }
        }
    }

    /// Visits the tree in pre-order: each internal cut, then the plus
    /// subtree, then the minus subtree.
    pub fn visit<V: TreeVisitor<S>>(&self, visitor: &mut V) {
        match self {
            BspTree::Leaf(inside) => visitor.visit_leaf(*inside),
            BspTree::Node { cut, plus, minus } => {
                visitor.visit_cut(cut);
                plus.visit(visitor);
                minus.visit(visitor);
            }
        }
    }

    /// Splits the tree by a sub-hyperplane.
    ///
    /// Returns a tree whose root cut is `sub`, whose plus child is this tree
    /// restricted to the plus side of `sub`'s hyperplane and whose minus
    /// child is the restriction to the minus side. `sub` must be bounded to
    /// the cell this tree covers; the cuts of both restrictions stay bounded
    /// to their cells.
    #[must_use]
    pub fn split(&self, sub: S::Sub) -> Self {
        match self {
            BspTree::Leaf(_) => Self::node(sub, self.clone(), self.clone()),
            BspTree::Node { cut, plus, minus } => {
                let cut_hyperplane = cut.hyperplane().clone();
                let sub_hyperplane = sub.hyperplane().clone();
                match sub.split(&cut_hyperplane) {
                    Split::Plus => {
                        // The splitter lives entirely in the plus sub-cell;
                        // the whole minus sub-cell lands on a single side of
                        // it, the side holding the cut.
                        let BspTree::Node {
                            cut: sub,
                            plus: sub_plus,
                            minus: sub_minus,
                        } = plus.split(sub)
                        else {
                            unreachable!("split always returns a node");
                        };
                        if matches!(cut.split(&sub_hyperplane), Split::Plus) {
                            Self::node(
                                sub,
                                Self::node(cut.clone(), *sub_plus, minus.as_ref().clone()),
                                *sub_minus,
                            )
                        } else {
                            Self::node(
                                sub,
                                *sub_plus,
                                Self::node(cut.clone(), *sub_minus, minus.as_ref().clone()),
                            )
                        }
                    }
                    Split::Minus => {
                        let BspTree::Node {
                            cut: sub,
                            plus: sub_plus,
                            minus: sub_minus,
                        } = minus.split(sub)
                        else {
                            unreachable!("split always returns a node");
                        };
                        if matches!(cut.split(&sub_hyperplane), Split::Plus) {
                            Self::node(
                                sub,
                                Self::node(cut.clone(), plus.as_ref().clone(), *sub_plus),
                                *sub_minus,
                            )
                        } else {
                            Self::node(
                                sub,
                                *sub_plus,
                                Self::node(cut.clone(), plus.as_ref().clone(), *sub_minus),
                            )
                        }
                    }
                    Split::Both {
                        plus: sub_plus,
                        minus: sub_minus,
                    } => {
                        // The cut piece on each side of the splitter; a piece
                        // may vanish when the crossing falls outside the
                        // cut's bounded extent. An empty piece still carries
                        // its hyperplane, which keeps classification
                        // consistent and contributes zero measure.
                        let (cut_plus, cut_minus) = match cut.split(&sub_hyperplane) {
                            Split::Both { plus, minus } => (plus, minus),
                            Split::Plus => (cut.clone(), cut.emptied()),
                            Split::Minus => (cut.emptied(), cut.clone()),
                            Split::OnPlus | Split::OnMinus => (cut.emptied(), cut.emptied()),
                        };
                        let BspTree::Node {
                            plus: plus_of_plus,
                            minus: minus_of_plus,
                            ..
                        } = plus.split(sub_plus)
                        else {
                            unreachable!("split always returns a node");
                        };
                        let BspTree::Node {
                            plus: plus_of_minus,
                            minus: minus_of_minus,
                            ..
                        } = minus.split(sub_minus)
                        else {
                            unreachable!("split always returns a node");
                        };
                        Self::node(
                            sub,
                            Self::node(cut_plus, *plus_of_plus, *plus_of_minus),
                            Self::node(cut_minus, *minus_of_plus, *minus_of_minus),
                        )
                    }
                    Split::OnPlus => {
                        Self::node(sub, plus.as_ref().clone(), minus.as_ref().clone())
                    }
                    Split::OnMinus => {
                        Self::node(sub, minus.as_ref().clone(), plus.as_ref().clone())
                    }
                }
            }
        }
    }

    /// Boolean combination of two trees.
    ///
    /// Implements the classic BSP merge: descend this tree, split the other
    /// tree by each cut, and apply the operation's truth table at every
    /// resulting leaf pair. Cells whose children end up agreeing are
    /// condensed back into leaves. Both operands are consumed; the result is
    /// a fresh tree sharing no nodes with either.
    #[must_use]
    pub fn combine(self, other: BspTree<S>, operation: BooleanOperation) -> Self {
        match (self, other) {
            (BspTree::Leaf(inside), other) => combine_with_leaf(inside, other, operation, true),
            (this, BspTree::Leaf(inside)) => combine_with_leaf(inside, this, operation, false),
            (BspTree::Node { cut, plus, minus }, other) => {
                let BspTree::Node {
                    cut,
                    plus: other_plus,
                    minus: other_minus,
                } = other.split(cut)
                else {
                    unreachable!("split always returns a node");
                };
                let merged_plus = plus.combine(*other_plus, operation);
                let merged_minus = minus.combine(*other_minus, operation);
                condensed(cut, merged_plus, merged_minus)
            }
        }
    }
}

/// Applies an operation's truth table when one operand has reached a leaf.
///
/// `other` is already restricted to the leaf's cell; `leaf_is_left` tells
/// which operand the leaf came from, which matters for the non-commutative
/// difference.
fn combine_with_leaf<S: Space>(
    leaf_inside: bool,
    other: BspTree<S>,
    operation: BooleanOperation,
    leaf_is_left: bool,
) -> BspTree<S> {
    match operation {
        BooleanOperation::Union => {
            if leaf_inside {
                BspTree::Leaf(true)
            } else {
                other
            }
        }
        BooleanOperation::Intersection => {
            if leaf_inside {
                other
            } else {
                BspTree::Leaf(false)
            }
        }
        BooleanOperation::Xor => {
            if leaf_inside {
                other.complement()
            } else {
                other
            }
        }
        BooleanOperation::Difference => {
            if leaf_is_left {
                if leaf_inside {
                    other.complement()
                } else {
                    BspTree::Leaf(false)
                }
            } else if leaf_inside {
                BspTree::Leaf(false)
            } else {
                other
            }
        }
    }
}

/// Builds a node, collapsing it into a leaf when both children are leaves
/// with the same attribute (the cut separates nothing).
fn condensed<S: Space>(cut: S::Sub, plus: BspTree<S>, minus: BspTree<S>) -> BspTree<S> {
    match (&plus, &minus) {
        (BspTree::Leaf(p), BspTree::Leaf(m)) if p == m => BspTree::Leaf(*p),
        _ => BspTree::node(cut, plus, minus),
    }
}
