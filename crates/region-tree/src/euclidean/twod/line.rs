//! Oriented lines of the plane and their bounded pieces.

use nalgebra::{Point1, Point2, Vector2};

use crate::error::{GeometryError, Result};
use crate::euclidean::oned::{Euclidean1D, Interval};
use crate::hyperplane::{Embedding, Hyperplane, Split, SubHyperplane};
use crate::region::Region;
use crate::space::Space;

use super::Euclidean2D;

/// Two unit directions are considered parallel below this cross product.
const PARALLELISM_THRESHOLD: f64 = 1.0e-10;

/// An oriented line of the plane: the hyperplane of the 2-D space.
///
/// The line is defined by a unit direction vector and the offset of the
/// origin. Offsets are positive on the right-hand side of the direction and
/// negative on the left-hand side, so a counter-clockwise boundary loop has
/// its interior on the minus side of every edge line.
///
/// The line also embeds a 1-D sub-space: the abscissa along the direction,
/// mapped back and forth with [`Embedding`].
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Unit direction of the line.
    direction: Vector2<f64>,
    /// Offset of the origin with respect to the line.
    origin_offset: f64,
    tolerance: f64,
}

impl Line {
    /// Creates the oriented line going through `p1` then `p2`.
    ///
    /// Fails if the two points are closer than the tolerance, or if the
    /// tolerance is below the space's smallest admissible value.
    pub fn through(p1: Point2<f64>, p2: Point2<f64>, tolerance: f64) -> Result<Self> {
        let tolerance = Euclidean2D::check_tolerance(tolerance)?;
        let delta: Vector2<f64> = p2 - p1;
        let norm = delta.norm();
        if norm <= tolerance {
            return Err(GeometryError::DegenerateLine { x: p1.x, y: p1.y });
        }
        let direction = delta / norm;
        Ok(Self {
            direction,
            origin_offset: direction.x * p1.y - direction.y * p1.x,
            tolerance,
        })
    }

    /// Unit direction of the line.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    /// Unit normal of the line, pointing towards the plus side.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.direction.y, -self.direction.x)
    }

    /// Point of the line at the given abscissa.
    pub fn point_at(&self, abscissa: f64) -> Point2<f64> {
        Point2::new(
            abscissa * self.direction.x - self.origin_offset * self.direction.y,
            abscissa * self.direction.y + self.origin_offset * self.direction.x,
        )
    }

    /// Intersection point with another line, `None` for parallel lines.
    pub fn intersection(&self, other: &Line) -> Option<Point2<f64>> {
        let det = self.direction.x * other.direction.y - self.direction.y * other.direction.x;
        if det.abs() < PARALLELISM_THRESHOLD {
            return None;
        }
        let c1 = self.origin_offset;
        let c2 = other.origin_offset;
        Some(Point2::new(
            (c1 * other.direction.x - c2 * self.direction.x) / det,
            (c1 * other.direction.y - c2 * self.direction.y) / det,
        ))
    }
}

impl Hyperplane for Line {
    type Point = Point2<f64>;
    type Sub = SubLine;

    fn offset(&self, point: &Point2<f64>) -> f64 {
        self.direction.y * point.x - self.direction.x * point.y + self.origin_offset
    }

    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn same_orientation_as(&self, other: &Self) -> bool {
        self.direction.dot(&other.direction) > 0.0
    }

    fn project(&self, point: &Point2<f64>) -> Point2<f64> {
        point - self.normal() * self.offset(point)
    }

    fn whole_hyperplane(&self) -> SubLine {
        SubLine {
            remaining: Region::new_unchecked(crate::bsp::BspTree::full(), self.tolerance),
            line: self.clone(),
        }
    }
}

impl Embedding for Line {
    type Point = Point2<f64>;
    type SubPoint = Point1<f64>;

    fn to_sub_space(&self, point: &Point2<f64>) -> Point1<f64> {
        Point1::new(self.direction.x * point.x + self.direction.y * point.y)
    }

    fn to_space(&self, point: &Point1<f64>) -> Point2<f64> {
        self.point_at(point.x)
    }
}

/// A line restricted to a region of its 1-D abscissa sub-space: a union of
/// segments and half-lines.
#[derive(Debug, Clone)]
pub struct SubLine {
    line: Line,
    remaining: Region<Euclidean1D>,
}

impl SubLine {
    /// Creates a sub-line from a line and the region of abscissae it keeps.
    pub fn new(line: Line, remaining: Region<Euclidean1D>) -> Self {
        Self { line, remaining }
    }

    /// Creates the sub-line covering the segment from `start` to `end`.
    pub fn from_segment(start: Point2<f64>, end: Point2<f64>, tolerance: f64) -> Result<Self> {
        let line = Line::through(start, end, tolerance)?;
        let lower = line.to_sub_space(&start).x;
        let upper = line.to_sub_space(&end).x;
        let remaining = Region::from_interval(lower, upper, tolerance)?;
        Ok(Self { line, remaining })
    }

    /// Region of abscissae covered along the line.
    #[inline]
    pub fn remaining(&self) -> &Region<Euclidean1D> {
        &self.remaining
    }

    /// Abscissa intervals covered along the line.
    pub fn intervals(&self) -> Vec<Interval> {
        self.remaining.intervals()
    }

    /// Covered parts as point pairs, finite intervals only.
    pub fn segments(&self) -> Vec<(Point2<f64>, Point2<f64>)> {
        self.intervals()
            .iter()
            .filter(|interval| interval.lower().is_finite() && interval.upper().is_finite())
            .map(|interval| {
                (
                    self.line.to_space(&Point1::new(interval.lower())),
                    self.line.to_space(&Point1::new(interval.upper())),
                )
            })
            .collect()
    }
}

impl SubHyperplane for SubLine {
    type Hyperplane = Line;

    fn hyperplane(&self) -> &Line {
        &self.line
    }

    fn size(&self) -> f64 {
        self.remaining.size()
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    fn emptied(&self) -> Self {
        Self {
            line: self.line.clone(),
            remaining: Region::new_unchecked(crate::bsp::BspTree::empty(), self.line.tolerance),
        }
    }

    fn split(&self, splitter: &Line) -> Split<Self> {
        let tolerance = self.line.tolerance;
        match self.line.intersection(splitter) {
            None => {
                // Parallel lines: the whole sub-line is on one side, unless
                // the two lines coincide within tolerance.
                let global = splitter.offset(&self.line.point_at(0.0));
                if global < -splitter.tolerance() {
                    Split::Minus
                } else if global > splitter.tolerance() {
                    Split::Plus
                } else if splitter.same_orientation_as(&self.line) {
                    Split::OnPlus
                } else {
                    Split::OnMinus
                }
            }
            Some(crossing) => {
                let crossing_abscissa = self.line.to_sub_space(&crossing).x;
                // The splitter offset is affine in the abscissa; its slope
                // tells which half-line is on the plus side.
                let slope = splitter.direction.y * self.line.direction.x
                    - splitter.direction.x * self.line.direction.y;
                let plus_above = slope > 0.0;

                let mut plus_parts = Vec::new();
                let mut minus_parts = Vec::new();
                for interval in self.intervals() {
                    let (below, above) = clip_interval(&interval, crossing_abscissa, tolerance);
                    let (plus, minus) = if plus_above { (above, below) } else { (below, above) };
                    plus_parts.extend(plus);
                    minus_parts.extend(minus);
                }

                match (plus_parts.is_empty(), minus_parts.is_empty()) {
                    (true, true) => Split::Minus,
                    (false, true) => Split::Plus,
                    (true, false) => Split::Minus,
                    (false, false) => Split::Both {
                        plus: self.with_intervals(plus_parts),
                        minus: self.with_intervals(minus_parts),
                    },
                }
            }
        }
    }

    fn reunite(&self, other: &Self) -> Self {
        // Both parts come from the same underlying line, so their abscissae
        // are measured in the same frame.
        Self {
            line: self.line.clone(),
            remaining: self.remaining.union(&other.remaining),
        }
    }
}

impl SubLine {
    fn with_intervals(&self, intervals: Vec<Interval>) -> Self {
        let region = Region::from_intervals(intervals, self.line.tolerance)
            .unwrap_or_else(|_| Region::new_unchecked(crate::bsp::BspTree::empty(), self.line.tolerance));
        Self {
            line: self.line.clone(),
            remaining: region,
        }
    }
}

/// Parts of `interval` below and above `at`, dropping slivers thinner than
/// the tolerance.
fn clip_interval(
    interval: &Interval,
    at: f64,
    tolerance: f64,
) -> (Option<Interval>, Option<Interval>) {
    let below = if interval.lower() < at - tolerance {
        Some(Interval::new(interval.lower(), interval.upper().min(at)))
    } else {
        None
    };
    let above = if interval.upper() > at + tolerance {
        Some(Interval::new(interval.lower().max(at), interval.upper()))
    } else {
        None
    };
    (below, above)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyperplane::Side;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1.0e-10;

    fn horizontal() -> Line {
        Line::through(Point2::new(0.0, 1.0), Point2::new(1.0, 1.0), TOL).unwrap()
    }

    #[test]
    fn line_offsets_follow_orientation() {
        let line = horizontal();
        // Points above the direction (left side) have negative offsets.
        assert_abs_diff_eq!(line.offset(&Point2::new(0.0, 3.0)), -2.0, epsilon = TOL);
        assert_abs_diff_eq!(line.offset(&Point2::new(5.0, 0.0)), 1.0, epsilon = TOL);
        assert_eq!(line.side(&Point2::new(0.0, 3.0)), Side::Minus);
        assert_eq!(line.side(&Point2::new(5.0, 0.0)), Side::Plus);
        assert_eq!(line.side(&Point2::new(-7.0, 1.0)), Side::On);
    }

    #[test]
    fn degenerate_line_is_rejected() {
        let p = Point2::new(1.0, 2.0);
        let err = Line::through(p, p, TOL).unwrap_err();
        assert_eq!(err, GeometryError::DegenerateLine { x: 1.0, y: 2.0 });
    }

    #[test]
    fn projection_lands_on_line() {
        let line = Line::through(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), TOL).unwrap();
        let projected = line.project(&Point2::new(2.0, 0.0));
        assert_abs_diff_eq!(line.offset(&projected), 0.0, epsilon = TOL);
        assert_abs_diff_eq!(projected.x, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(projected.y, 1.0, epsilon = TOL);
    }

    #[test]
    fn embedding_round_trip() {
        let line = Line::through(Point2::new(1.0, 0.0), Point2::new(1.0, 4.0), TOL).unwrap();
        let point = Point2::new(1.0, 2.5);
        let abscissa = line.to_sub_space(&point);
        let back = line.to_space(&abscissa);
        assert_abs_diff_eq!(back.x, point.x, epsilon = TOL);
        assert_abs_diff_eq!(back.y, point.y, epsilon = TOL);
    }

    #[test]
    fn intersection_of_crossing_lines() {
        let horizontal = horizontal();
        let vertical =
            Line::through(Point2::new(3.0, -1.0), Point2::new(3.0, 1.0), TOL).unwrap();
        let crossing = horizontal.intersection(&vertical).unwrap();
        assert_abs_diff_eq!(crossing.x, 3.0, epsilon = TOL);
        assert_abs_diff_eq!(crossing.y, 1.0, epsilon = TOL);

        let parallel =
            Line::through(Point2::new(0.0, 5.0), Point2::new(1.0, 5.0), TOL).unwrap();
        assert!(horizontal.intersection(&parallel).is_none());
    }

    #[test]
    fn segment_split_by_crossing_line() {
        let segment =
            SubLine::from_segment(Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), TOL).unwrap();
        assert_abs_diff_eq!(segment.size(), 4.0, epsilon = TOL);

        let vertical = Line::through(Point2::new(1.0, -1.0), Point2::new(1.0, 1.0), TOL).unwrap();
        let Split::Both { plus, minus } = segment.split(&vertical) else {
            panic!("expected a crossing split");
        };

        // The vertical line going up has its plus side at x > 1.
        let plus_segments = plus.segments();
        assert_eq!(plus_segments.len(), 1);
        assert_abs_diff_eq!(plus_segments[0].0.x, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(plus_segments[0].1.x, 4.0, epsilon = TOL);

        let minus_segments = minus.segments();
        assert_abs_diff_eq!(minus_segments[0].0.x, 0.0, epsilon = TOL);
        assert_abs_diff_eq!(minus_segments[0].1.x, 1.0, epsilon = TOL);

        // A reunite undoes the split.
        let whole = plus.reunite(&minus);
        assert_abs_diff_eq!(whole.size(), 4.0, epsilon = TOL);
    }

    #[test]
    fn segment_split_misses_crossing() {
        let segment =
            SubLine::from_segment(Point2::new(2.0, 0.0), Point2::new(4.0, 0.0), TOL).unwrap();
        let vertical = Line::through(Point2::new(1.0, -1.0), Point2::new(1.0, 1.0), TOL).unwrap();
        // The crossing at x = 1 is outside the segment.
        assert!(matches!(segment.split(&vertical), Split::Plus));
    }

    #[test]
    fn parallel_split_sides() {
        let segment =
            SubLine::from_segment(Point2::new(0.0, 1.0), Point2::new(1.0, 1.0), TOL).unwrap();
        let below = Line::through(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), TOL).unwrap();
        // The segment is above the line, on its minus side.
        assert!(matches!(segment.split(&below), Split::Minus));

        let coincident =
            Line::through(Point2::new(5.0, 1.0), Point2::new(6.0, 1.0), TOL).unwrap();
        assert!(matches!(segment.split(&coincident), Split::OnPlus));

        let opposed = Line::through(Point2::new(6.0, 1.0), Point2::new(5.0, 1.0), TOL).unwrap();
        assert!(matches!(segment.split(&opposed), Split::OnMinus));
    }
}
