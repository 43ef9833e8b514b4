//! Error taxonomy for region construction and queries.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Errors raised by region, hull and enclosing-ball construction.
///
/// Every variant carries the offending values so callers can build their own
/// diagnostics; nothing in this crate formats messages for end users or
/// retries on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A tolerance below the smallest value the space can distinguish.
    ///
    /// Below this floor, boundary classification is meaningless at
    /// floating-point precision.
    #[error("tolerance {tolerance:e} is smaller than the smallest admissible value {smallest:e}")]
    TooSmallTolerance {
        /// Requested tolerance.
        tolerance: f64,
        /// Smallest tolerance the space supports.
        smallest: f64,
    },

    /// An operation that needs at least one point received none.
    #[error("no points were provided")]
    NoData,

    /// Interval or arc endpoints in the wrong order.
    #[error("endpoints do not define an interval: [{lower}, {upper}]")]
    NotAnInterval {
        /// Lower endpoint as given.
        lower: f64,
        /// Upper endpoint as given.
        upper: f64,
    },

    /// Two identical points cannot define a line.
    #[error("cannot define a line through the single point ({x}, {y})")]
    DegenerateLine {
        /// Abscissa of the coincident points.
        x: f64,
        /// Ordinate of the coincident points.
        y: f64,
    },

    /// Bounding hyperplanes that do not enclose a convex region.
    #[error("hyperplane collection does not bound a convex region")]
    NonConvexHyperplanes,

    /// A point set without enough spread to support a hull of positive
    /// measure (duplicates only, or an all-collinear set in dimension 2).
    #[error("{points} point(s) with spread {spread:e} cannot produce a hull with positive measure")]
    DegenerateHull {
        /// Number of distinct points retained.
        points: usize,
        /// Largest coordinate extent of the point set.
        spread: f64,
    },

    /// A boundary loop with fewer than three effective vertices, or one
    /// enclosing no area.
    #[error("boundary loop with {vertices} effective vertex(es) encloses no area")]
    DegenerateBoundaryLoop {
        /// Number of vertices left after removing consecutive duplicates.
        vertices: usize,
    },

    /// A boundary loop crossing itself.
    #[error("boundary loop crosses itself between edge {first} and edge {second}")]
    CrossingBoundaryLoops {
        /// Index of the first crossing edge.
        first: usize,
        /// Index of the second crossing edge.
        second: usize,
    },
}
