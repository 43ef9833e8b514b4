//! Hyperplane and sub-hyperplane contracts.
//!
//! A hyperplane is a codimension-1 divider of a space: it answers which side
//! a point is on and at what signed offset, with a tolerance below which a
//! point counts as lying on the hyperplane itself. A sub-hyperplane is a
//! hyperplane restricted to a bounded part of itself; splitting one by
//! another hyperplane is the primitive every partitioning algorithm in this
//! crate reduces to.

use std::fmt;

use crate::space::Point;

/// Which side of a hyperplane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Strictly on the positive-offset side.
    Plus,
    /// Strictly on the negative-offset side.
    Minus,
    /// Within tolerance of the hyperplane itself.
    On,
}

/// Result of splitting a sub-hyperplane by a hyperplane.
#[derive(Debug, Clone)]
pub enum Split<I> {
    /// The sub-hyperplane lies entirely on the splitter's plus side.
    Plus,
    /// The sub-hyperplane lies entirely on the splitter's minus side.
    Minus,
    /// The splitter genuinely crosses the sub-hyperplane; both parts are
    /// non-empty.
    Both {
        /// Part on the splitter's plus side.
        plus: I,
        /// Part on the splitter's minus side.
        minus: I,
    },
    /// The sub-hyperplane coincides with the splitter within tolerance,
    /// with the same orientation.
    OnPlus,
    /// The sub-hyperplane coincides with the splitter within tolerance,
    /// with the opposite orientation.
    OnMinus,
}

/// A codimension-1 divider of a space.
///
/// The offset sign convention fixes the two half-spaces: positive offsets are
/// the plus side, negative offsets the minus side. Implementations validate
/// their tolerance against the space's floor at construction time.
pub trait Hyperplane: Clone + fmt::Debug {
    /// Points of the divided space.
    type Point: Point;

    /// Bounded restriction of this hyperplane type.
    type Sub: SubHyperplane<Hyperplane = Self>;

    /// Signed distance-like offset of a point.
    fn offset(&self, point: &Self::Point) -> f64;

    /// Distance below which points are merged into the hyperplane.
    fn tolerance(&self) -> f64;

    /// Classifies a point, returning [`Side::On`] iff its absolute offset is
    /// at most the tolerance.
    fn side(&self, point: &Self::Point) -> Side {
        let offset = self.offset(point);
        if offset < -self.tolerance() {
            Side::Minus
        } else if offset > self.tolerance() {
            Side::Plus
        } else {
            Side::On
        }
    }

    /// Returns `true` if `other` divides space at the same place with its
    /// plus side on the same half.
    ///
    /// Only meaningful for hyperplanes that already coincide within
    /// tolerance; used to resolve boundary ties during tree construction and
    /// merges.
    fn same_orientation_as(&self, other: &Self) -> bool;

    /// Orthogonal projection of a point onto the hyperplane.
    fn project(&self, point: &Self::Point) -> Self::Point;

    /// The whole hyperplane as an unbounded sub-hyperplane.
    fn whole_hyperplane(&self) -> Self::Sub;
}

/// A hyperplane restricted to a bounded subset of itself.
///
/// The restriction is a region of the embedded one-lower-dimensional space;
/// zero-dimensional sub-hyperplanes degenerate to single points.
pub trait SubHyperplane: Clone + fmt::Debug + Sized {
    /// The hyperplane type this restricts.
    type Hyperplane: Hyperplane<Sub = Self>;

    /// Underlying hyperplane.
    fn hyperplane(&self) -> &Self::Hyperplane;

    /// Measure of the restricted part, in the hyperplane's own dimension.
    fn size(&self) -> f64;

    /// Returns `true` if the restriction has vanished.
    fn is_empty(&self) -> bool;

    /// An empty restriction of the same underlying hyperplane.
    fn emptied(&self) -> Self;

    /// Splits this sub-hyperplane by another hyperplane.
    ///
    /// Every partitioning algorithm in this crate (tree splitting, merging,
    /// boundary characterization) reduces to this operation.
    fn split(&self, splitter: &Self::Hyperplane) -> Split<Self>;

    /// Union with another sub-hyperplane of the same underlying hyperplane;
    /// the inverse of [`split`](Self::split).
    fn reunite(&self, other: &Self) -> Self;
}

/// A bidirectional mapping between a space and its one-lower-dimensional
/// sub-space.
///
/// Hyperplanes of spaces that have a sub-space implement this to move points
/// between the embedding space and coordinates inside the hyperplane.
pub trait Embedding {
    /// Points of the embedding space.
    type Point: Point;

    /// Points of the embedded sub-space.
    type SubPoint: Point;

    /// Sub-space coordinates of a space point (projected onto the
    /// hyperplane first if it is not already on it).
    fn to_sub_space(&self, point: &Self::Point) -> Self::SubPoint;

    /// Space point corresponding to sub-space coordinates.
    fn to_space(&self, point: &Self::SubPoint) -> Self::Point;
}
