//! The 1-dimensional sphere: the circle.
//!
//! Points of the circle are angles normalized into [0, 2π); hyperplanes are
//! single oriented limit angles; regions are unions of arcs, which may wrap
//! around the 0/2π seam.

use std::f64::consts::TAU;

use crate::bsp::{BspTree, CutVisitor};
use crate::error::{GeometryError, Result};
use crate::hyperplane::{Hyperplane, Split, SubHyperplane};
use crate::region::{Region, RegionProperties};
use crate::space::{Point, Space};

/// The 1-dimensional sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sphere1D;

impl Space for Sphere1D {
    const DIMENSION: usize = 1;
    // One ulp of 2π: below this, angles on the circle cannot be told apart.
    const SMALLEST_TOLERANCE: f64 = 8.881784197001252e-16;

    type Point = S1Point;
    type Hyperplane = LimitAngle;
    type Sub = SubLimitAngle;

    fn measure(region: &Region<Self>) -> RegionProperties<Self::Point> {
        let arcs = region.arcs();
        let mut size = 0.0;
        let mut weighted_sum = 0.0;
        for arc in &arcs {
            size += arc.size();
            weighted_sum += arc.size() * arc.barycenter();
        }
        let barycenter = if size == 0.0 || size >= TAU {
            S1Point::raw(f64::NAN)
        } else {
            S1Point::new(weighted_sum / size)
        };
        RegionProperties { size, barycenter }
    }
}

/// A point of the circle, stored as an angle normalized into [0, 2π).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct S1Point {
    alpha: f64,
}

impl S1Point {
    /// Creates a point from any angle in radians; the angle is normalized
    /// into [0, 2π).
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.rem_euclid(TAU),
        }
    }

    /// Creates a point without normalizing, for NaN sentinels.
    fn raw(alpha: f64) -> Self {
        Self { alpha }
    }

    /// Normalized angle of the point.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Point for S1Point {
    fn distance(&self, other: &Self) -> f64 {
        let delta = (other.alpha - self.alpha).rem_euclid(TAU);
        delta.min(TAU - delta)
    }

    fn is_nan(&self) -> bool {
        self.alpha.is_nan()
    }

    fn nan() -> Self {
        Self::raw(f64::NAN)
    }

    fn move_towards(&self, other: &Self, ratio: f64) -> Self {
        // Interpolate along the shorter way around the circle.
        let delta = (other.alpha - self.alpha + std::f64::consts::PI).rem_euclid(TAU)
            - std::f64::consts::PI;
        Self::new(self.alpha + ratio * delta)
    }
}

/// An oriented limit angle: the hyperplane of the circle.
///
/// A direct limit angle has its plus side towards increasing angles.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitAngle {
    location: S1Point,
    direct: bool,
    tolerance: f64,
}

impl LimitAngle {
    /// Creates a limit angle at a location.
    ///
    /// Fails if `tolerance` is below the space's smallest admissible value.
    pub fn new(location: S1Point, direct: bool, tolerance: f64) -> Result<Self> {
        Ok(Self {
            location,
            direct,
            tolerance: Sphere1D::check_tolerance(tolerance)?,
        })
    }

    /// Location of the limit on the circle.
    #[inline]
    pub fn location(&self) -> S1Point {
        self.location
    }

    /// Returns `true` if the plus side points towards increasing angles.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.direct
    }
}

impl Hyperplane for LimitAngle {
    type Point = S1Point;
    type Sub = SubLimitAngle;

    fn offset(&self, point: &S1Point) -> f64 {
        let delta = point.alpha - self.location.alpha;
        if self.direct { delta } else { -delta }
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direct == other.direct
    }

    fn project(&self, _point: &S1Point) -> S1Point {
        self.location
    }

    fn whole_hyperplane(&self) -> SubLimitAngle {
        SubLimitAngle {
            hyperplane: self.clone(),
            empty: false,
        }
    }
}

/// A limit angle seen as a sub-hyperplane: a zero-measure set that is never
/// crossed by another hyperplane.
#[derive(Debug, Clone)]
pub struct SubLimitAngle {
    hyperplane: LimitAngle,
    empty: bool,
}

impl SubHyperplane for SubLimitAngle {
    type Hyperplane = LimitAngle;

    fn hyperplane(&self) -> &LimitAngle {
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

    fn split(&self, splitter: &LimitAngle) -> Split<Self> {
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
        self.clone()
    }
}

/// An arc of the circle, with `lower` ≤ `upper` ≤ `lower` + 2π.
///
/// Arcs crossing the 0/2π seam are represented with an upper bound beyond
/// 2π.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    lower: f64,
    upper: f64,
}

impl Arc {
    fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(lower <= upper && upper <= lower + TAU);
        Self { lower, upper }
    }

    /// Lower angular bound.
    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper angular bound, possibly beyond 2π for wrapping arcs.
    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Angular length of the arc.
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Mid angle of the arc, not normalized.
    pub fn barycenter(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// Region of the circle: a union of disjoint arcs.
pub type ArcsSet = Region<Sphere1D>;

impl Region<Sphere1D> {
    /// Builds the region covering the arc from `lower` to `upper`.
    ///
    /// When `lower == upper` or the span reaches 2π, the region covers the
    /// full circle and has no boundary at all; `lower > upper` is an
    /// argument error. Bounds outside [0, 2π) are accepted and wrap.
    pub fn from_arc(lower: f64, upper: f64, tolerance: f64) -> Result<ArcsSet> {
        let tolerance = Sphere1D::check_tolerance(tolerance)?;
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(GeometryError::NotAnInterval { lower, upper });
        }
        if lower == upper || upper - lower >= TAU {
            return Ok(Self::new_unchecked(BspTree::full(), tolerance));
        }

        let normalized_lower = lower.rem_euclid(TAU);
        let normalized_upper = normalized_lower + (upper - lower);
        let lower_cut =
            LimitAngle::new(S1Point::new(normalized_lower), false, tolerance)?.whole_hyperplane();

        let tree = if normalized_upper < TAU {
            // Arc comfortably inside one turn.
            let upper_cut = LimitAngle::new(S1Point::new(normalized_upper), true, tolerance)?
                .whole_hyperplane();
            BspTree::node(
                lower_cut,
                BspTree::empty(),
                BspTree::node(upper_cut, BspTree::empty(), BspTree::full()),
            )
        } else {
            // Arc wrapping around the 0/2π seam.
            let upper_cut =
                LimitAngle::new(S1Point::new(normalized_upper - TAU), true, tolerance)?
                    .whole_hyperplane();
            BspTree::node(
                lower_cut,
                BspTree::node(upper_cut, BspTree::empty(), BspTree::full()),
                BspTree::full(),
            )
        };
        Ok(Self::new_unchecked(tree, tolerance))
    }

    /// Extracts the ordered list of disjoint arcs covered by the region.
    ///
    /// An arc crossing the 0/2π seam comes out with its upper bound beyond
    /// 2π; the full circle comes out as the single arc [0, 2π].
    pub fn arcs(&self) -> Vec<Arc> {
        if self.tree().is_leaf() {
            return if self.is_full() {
                vec![Arc::new(0.0, TAU)]
            } else {
                Vec::new()
            };
        }

        let mut locations = Vec::new();
        let mut collector = CutVisitor::new(|cut: &SubLimitAngle| {
            locations.push(cut.hyperplane().location().alpha());
        });
        self.tree().visit(&mut collector);
        locations.sort_by(f64::total_cmp);
        locations.dedup();

        // Walk the circle segment by segment, classifying each through its
        // midpoint, then stitch neighbours back together.
        let n = locations.len();
        let mut inside_segments: Vec<Arc> = Vec::new();
        for i in 0..n {
            let lower = locations[i];
            let upper = if i + 1 < n {
                locations[i + 1]
            } else {
                locations[0] + TAU
            };
            if upper - lower <= 0.0 {
                continue;
            }
            let probe = S1Point::new(0.5 * (lower + upper));
            if self.check_point(&probe) == crate::Location::Inside {
                match inside_segments.last_mut() {
                    Some(last) if last.upper == lower => last.upper = upper,
                    _ => inside_segments.push(Arc::new(lower, upper)),
                }
            }
        }

        // Merge across the seam: the wrapping segment ends where the first
        // one starts, one turn later.
        if inside_segments.len() > 1 {
            let first = inside_segments[0];
            let last = *inside_segments.last().expect("non-empty list");
            if last.upper == first.lower + TAU {
                inside_segments[0] = Arc::new(last.lower, first.upper + TAU);
                inside_segments.pop();
            }
        }
        inside_segments
    }
}
