//! The 1-dimensional Euclidean line.
//!
//! Hyperplanes of the line are single oriented points; regions of the line
//! are unions of intervals.

use nalgebra::Point1;

use crate::bsp::{BspTree, CutVisitor};
use crate::error::{GeometryError, Result};
use crate::hyperplane::{Hyperplane, Split, SubHyperplane};
use crate::region::{Region, RegionProperties};
use crate::space::{Point, Space};

/// The 1-dimensional Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean1D;

impl Space for Euclidean1D {
    const DIMENSION: usize = 1;
    const SMALLEST_TOLERANCE: f64 = f64::EPSILON;

    type Point = Point1<f64>;
    type Hyperplane = OrientedPoint;
    type Sub = SubOrientedPoint;

    fn measure(region: &Region<Self>) -> RegionProperties<Self::Point> {
        let intervals = region.intervals();
        let mut size = 0.0;
        let mut weighted_sum = 0.0;
        for interval in &intervals {
            size += interval.size();
            weighted_sum += interval.size() * interval.barycenter();
        }
        let barycenter = if size == 0.0 || size.is_infinite() {
            Point1::nan()
        } else {
            Point1::new(weighted_sum / size)
        };
        RegionProperties { size, barycenter }
    }
}

/// An oriented point of the line: the hyperplane of the 1-D space.
///
/// A direct oriented point has its plus side towards increasing abscissae,
/// a non-direct one towards decreasing abscissae.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedPoint {
    location: Point1<f64>,
    direct: bool,
    tolerance: f64,
}

impl OrientedPoint {
    /// Creates an oriented point at a location.
    ///
    /// Fails if `tolerance` is below the space's smallest admissible value.
    pub fn new(location: Point1<f64>, direct: bool, tolerance: f64) -> Result<Self> {
        Ok(Self {
            location,
            direct,
            tolerance: Euclidean1D::check_tolerance(tolerance)?,
        })
    }

    /// Location of the point on the line.
    #[inline]
    pub fn location(&self) -> Point1<f64> {
        self.location
    }

    /// Returns `true` if the plus side points towards increasing abscissae.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.direct
    }
}

impl Hyperplane for OrientedPoint {
    type Point = Point1<f64>;
    type Sub = SubOrientedPoint;

    fn offset(&self, point: &Point1<f64>) -> f64 {
        let delta = point.x - self.location.x;
        if self.direct { delta } else { -delta }
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn project(&self, _point: &Point1<f64>) -> Point1<f64> {
        self.location
    }

    fn whole_hyperplane(&self) -> SubOrientedPoint {
        SubOrientedPoint {
            hyperplane: self.clone(),
            empty: false,
        }
    }
}

/// An oriented point seen as a sub-hyperplane: a zero-measure set that is
/// never crossed by another hyperplane, only put on one side of it.
#[derive(Debug, Clone)]
pub struct SubOrientedPoint {
    hyperplane: OrientedPoint,
    empty: bool,
}

impl SubHyperplane for SubOrientedPoint {
    type Hyperplane = OrientedPoint;

    fn hyperplane(&self) -> &OrientedPoint {
        &self.hyperplane
    }

    fn size(&self) -> f64 {
        0.0
    }

    fn is_empty(&self) -> bool {
        self.empty
    }

    fn emptied(&self) -> Self {
        Self {
            hyperplane: self.hyperplane.clone(),
            empty: true,
        }
    }

    fn split(&self, splitter: &OrientedPoint) -> Split<Self> {
        let offset = splitter.offset(&self.hyperplane.location);
        if offset < -splitter.tolerance() {
            Split::Minus
        } else if offset > splitter.tolerance() {
            Split::Plus
        } else if splitter.same_orientation_as(&self.hyperplane) {
            Split::OnPlus
        } else {
            Split::OnMinus
        }
    }

    fn reunite(&self, _other: &Self) -> Self {
        // Both parts sit at the same location within tolerance.
        self.clone()
    }
}

/// A finite or half-infinite interval of the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Creates an interval from its endpoints, `lower` ≤ `upper`.
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper, "reversed interval endpoints");
        Self { lower, upper }
    }

    /// Lower endpoint, possibly `-∞`.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper endpoint, possibly `+∞`.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Length of the interval.
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval; NaN when unbounded.
    pub fn barycenter(&self) -> f64 {
        if self.lower.is_infinite() || self.upper.is_infinite() {
            f64::NAN
        } else {
            0.5 * (self.lower + self.upper)
        }
    }
}

/// Region of the 1-D line: a union of disjoint intervals.
pub type IntervalsSet = Region<Euclidean1D>;

impl Region<Euclidean1D> {
    /// Builds the region covering `[lower, upper]`.
    ///
    /// Either endpoint may be infinite; `lower` must not exceed `upper`.
    pub fn from_interval(lower: f64, upper: f64, tolerance: f64) -> Result<IntervalsSet> {
        let tolerance = Euclidean1D::check_tolerance(tolerance)?;
        if lower > upper || lower.is_nan() || upper.is_nan() {
            return Err(GeometryError::NotAnInterval { lower, upper });
        }
        Ok(Self::new_unchecked(
            interval_tree(lower, upper, tolerance)?,
            tolerance,
        ))
    }

    /// Builds the region covering a collection of intervals.
    ///
    /// Overlapping or touching intervals are merged first.
    pub fn from_intervals(mut intervals: Vec<Interval>, tolerance: f64) -> Result<IntervalsSet> {
        let tolerance = Euclidean1D::check_tolerance(tolerance)?;
        intervals.sort_by(|a, b| a.lower.total_cmp(&b.lower));
        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            match merged.last_mut() {
                Some(last) if interval.lower <= last.upper => {
                    last.upper = last.upper.max(interval.upper);
                }
                _ => merged.push(interval),
            }
        }
        Ok(Self::new_unchecked(
            disjoint_intervals_tree(&merged, tolerance)?,
            tolerance,
        ))
    }

    /// Extracts the ordered list of disjoint intervals covered by the
    /// region.
    pub fn intervals(&self) -> Vec<Interval> {
        // Candidate boundaries are the cut locations, in increasing order.
        let mut locations = Vec::new();
        let mut collector = CutVisitor::new(|cut: &SubOrientedPoint| {
            locations.push(cut.hyperplane().location().x);
        });
        self.tree().visit(&mut collector);
        locations.sort_by(f64::total_cmp);
        locations.dedup();

        // Classify the open segment between consecutive boundaries through
        // its midpoint and merge consecutive inside segments.
        let mut bounds = Vec::with_capacity(locations.len() + 2);
        bounds.push(f64::NEG_INFINITY);
        bounds.extend(locations);
        bounds.push(f64::INFINITY);

        let mut intervals: Vec<Interval> = Vec::new();
        for window in bounds.windows(2) {
            let (lower, upper) = (window[0], window[1]);
            let probe = segment_probe(lower, upper);
            if self.check_point(&Point1::new(probe)) == crate::Location::Inside {
                match intervals.last_mut() {
                    Some(last) if last.upper == lower => last.upper = upper,
                    _ => intervals.push(Interval::new(lower, upper)),
                }
            }
        }
        intervals
    }
}

/// A point well inside the open segment `(lower, upper)`.
fn segment_probe(lower: f64, upper: f64) -> f64 {
    match (lower.is_infinite(), upper.is_infinite()) {
        (true, true) => 0.0,
        (true, false) => upper - 1.0,
        (false, true) => lower + 1.0,
        (false, false) => 0.5 * (lower + upper),
    }
}

/// Tree covering a single interval.
fn interval_tree(lower: f64, upper: f64, tolerance: f64) -> Result<BspTree<Euclidean1D>> {
    let lower_cut = if lower.is_finite() {
        Some(OrientedPoint::new(Point1::new(lower), false, tolerance)?.whole_hyperplane())
    } else {
        None
    };
    let upper_cut = if upper.is_finite() {
        Some(OrientedPoint::new(Point1::new(upper), true, tolerance)?.whole_hyperplane())
    } else {
        None
    };
    Ok(match (lower_cut, upper_cut) {
        (None, None) => BspTree::full(),
        (Some(low), None) => BspTree::node(low, BspTree::empty(), BspTree::full()),
        (None, Some(up)) => BspTree::node(up, BspTree::empty(), BspTree::full()),
        (Some(low), Some(up)) => BspTree::node(
            low,
            BspTree::empty(),
            BspTree::node(up, BspTree::empty(), BspTree::full()),
        ),
    })
}

/// Tree covering a sorted list of disjoint intervals.
fn disjoint_intervals_tree(
    intervals: &[Interval],
    tolerance: f64,
) -> Result<BspTree<Euclidean1D>> {
    let Some((first, rest)) = intervals.split_first() else {
        return Ok(BspTree::empty());
    };

    // Everything above the first interval's upper bound belongs to the
    // remaining intervals.
    let above = if first.upper.is_finite() {
        let up = OrientedPoint::new(Point1::new(first.upper), true, tolerance)?.whole_hyperplane();
        BspTree::node(up, disjoint_intervals_tree(rest, tolerance)?, BspTree::full())
    } else {
        BspTree::full()
    };

    Ok(if first.lower.is_finite() {
        let low = OrientedPoint::new(Point1::new(first.lower), false, tolerance)?.whole_hyperplane();
        BspTree::node(low, BspTree::empty(), above)
    } else {
        above
    })
}
