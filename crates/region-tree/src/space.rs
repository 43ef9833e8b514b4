//! Space, point and vector contracts.
//!
//! These traits define the small algebra a geometric entity must support for
//! the partitioning machinery to work on it, independently of dimension or
//! curvature. Concrete flat spaces bind to nalgebra points and vectors; the
//! circle binds to its own angle type.

use std::fmt;

use nalgebra::{Point1, Point2, Vector1, Vector2};

use crate::GeometryError;
use crate::hyperplane::{Hyperplane, SubHyperplane};
use crate::region::{Region, RegionProperties};

/// A dimension/curvature context that points belong to.
///
/// A space ties together its point type, its codimension-1 divider type and
/// the bounded restriction of that divider. Implementations are zero-sized
/// unit types; the space itself carries no data.
pub trait Space: Copy + fmt::Debug + PartialEq + Eq + 'static {
    /// Dimension of the space.
    const DIMENSION: usize;

    /// Smallest tolerance the space can meaningfully distinguish.
    ///
    /// Constructing a hyperplane with a tolerance below this floor is an
    /// argument error.
    const SMALLEST_TOLERANCE: f64;

    /// Points of this space.
    type Point: Point;

    /// Codimension-1 dividers of this space.
    type Hyperplane: Hyperplane<Point = Self::Point, Sub = Self::Sub>;

    /// Hyperplanes restricted to bounded parts of themselves.
    type Sub: SubHyperplane<Hyperplane = Self::Hyperplane>;

    /// Validates a tolerance against [`Self::SMALLEST_TOLERANCE`].
    fn check_tolerance(tolerance: f64) -> Result<f64, GeometryError> {
        if tolerance < Self::SMALLEST_TOLERANCE {
            Err(GeometryError::TooSmallTolerance {
                tolerance,
                smallest: Self::SMALLEST_TOLERANCE,
            })
        } else {
            Ok(tolerance)
        }
    }

    /// Measures a region of this space: total size and barycenter.
    ///
    /// Called once per region through the lazy cache in
    /// [`Region::size`](crate::Region::size); implementations must not call
    /// back into `region.size()` or `region.barycenter()`.
    fn measure(region: &Region<Self>) -> RegionProperties<Self::Point>;
}

/// A location in some space.
///
/// Equality through `PartialEq` keeps IEEE-754 semantics (a NaN point is not
/// equal to itself); [`Point::same_as`] is the NaN-canonicalizing comparison
/// under which any two NaN points are equal.
pub trait Point: Copy + fmt::Debug + PartialEq + 'static {
    /// Distance to another point, following the space's metric.
    fn distance(&self, other: &Self) -> f64;

    /// Returns `true` if any coordinate is NaN.
    fn is_nan(&self) -> bool;

    /// The canonical undefined point of the space.
    fn nan() -> Self;

    /// NaN-canonicalizing equality: two NaN points compare equal.
    fn same_as(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self == other
    }

    /// Point at `ratio` of the way from `self` towards `other`.
    ///
    /// `ratio` 0 yields `self`, 1 yields `other`; values outside [0, 1]
    /// extrapolate.
    fn move_towards(&self, other: &Self, ratio: f64) -> Self;
}

/// Vector algebra: addition, scaling, dot product and the usual norms.
///
/// Only flat spaces have vectors; curved spaces expose points alone.
pub trait Vector: Copy + fmt::Debug + PartialEq + 'static {
    /// The null vector.
    fn zero() -> Self;

    /// Component-wise sum.
    fn add(&self, rhs: &Self) -> Self;

    /// Component-wise difference.
    fn subtract(&self, rhs: &Self) -> Self;

    /// Multiplication by a scalar.
    fn scale(&self, factor: f64) -> Self;

    /// Dot product.
    fn dot(&self, rhs: &Self) -> f64;

    /// Euclidean (L2) norm.
    fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Squared Euclidean norm.
    fn norm_sq(&self) -> f64 {
        self.dot(self)
    }

    /// Taxicab (L1) norm.
    fn norm1(&self) -> f64;

    /// Supremum (L∞) norm.
    fn norm_inf(&self) -> f64;
}

impl Point for Point1<f64> {
    fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).abs()
    }

    fn is_nan(&self) -> bool {
        self.x.is_nan()
    }

    fn nan() -> Self {
        Point1::new(f64::NAN)
    }

    fn move_towards(&self, other: &Self, ratio: f64) -> Self {
        Point1::new(self.x + ratio * (other.x - self.x))
    }
}

impl Point for Point2<f64> {
    fn distance(&self, other: &Self) -> f64 {
        (self - other).norm()
    }

    fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    fn nan() -> Self {
        Point2::new(f64::NAN, f64::NAN)
    }

    fn move_towards(&self, other: &Self, ratio: f64) -> Self {
        self + (other - self) * ratio
    }
}

impl Vector for Vector1<f64> {
    fn zero() -> Self {
        Vector1::zeros()
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn subtract(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }

    fn dot(&self, rhs: &Self) -> f64 {
        self.x * rhs.x
    }

    fn norm1(&self) -> f64 {
        self.x.abs()
    }

    fn norm_inf(&self) -> f64 {
        self.x.abs()
    }
}

impl Vector for Vector2<f64> {
    fn zero() -> Self {
        Vector2::zeros()
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn subtract(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn scale(&self, factor: f64) -> Self {
        self * factor
    }

    fn dot(&self, rhs: &Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    fn norm1(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    fn norm_inf(&self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}
