//! Convex hulls of planar point sets.

use log::debug;
use nalgebra::{Point2, Vector2};

use crate::error::{GeometryError, Result};
use crate::euclidean::twod::{Line, PolygonsSet};
use crate::region::Region;
use crate::space::Vector;

/// A convex hull of a planar point set.
///
/// Vertices are kept in counter-clockwise order with no collinear
/// redundancy: of any collinear run, only the two extreme endpoints are
/// retained, so the hull is strictly convex.
#[derive(Debug, Clone)]
pub struct ConvexHull2D {
    vertices: Vec<Point2<f64>>,
    tolerance: f64,
}

impl ConvexHull2D {
    /// Hull vertices in counter-clockwise order.
    #[inline]
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Tolerance used to build the hull.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Supporting lines of the hull edges, interiors on their minus side.
    pub fn supporting_lines(&self) -> Result<Vec<Line>> {
        let n = self.vertices.len();
        let mut lines = Vec::with_capacity(n);
        for i in 0..n {
            lines.push(Line::through(
                self.vertices[i],
                self.vertices[(i + 1) % n],
                self.tolerance,
            )?);
        }
        Ok(lines)
    }

    /// Materializes the hull as the convex region bounded by its edges.
    pub fn create_region(&self) -> Result<PolygonsSet> {
        Region::convex(&self.supporting_lines()?, self.tolerance)
    }
}

/// Computes the convex hull of a point set with the monotone chain
/// algorithm.
///
/// Points closer together than the tolerance are merged first. The input
/// must span an area: fewer than three distinct points, or a fully collinear
/// set, fail with [`GeometryError::DegenerateHull`]; an empty input fails
/// with [`GeometryError::NoData`].
pub fn convex_hull(points: &[Point2<f64>], tolerance: f64) -> Result<ConvexHull2D> {
    if points.is_empty() {
        return Err(GeometryError::NoData);
    }

    // Lexicographic sort, then drop near-duplicates.
    let mut sorted: Vec<Point2<f64>> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let mut distinct: Vec<Point2<f64>> = Vec::with_capacity(sorted.len());
    for point in sorted {
        if distinct
            .iter()
            .all(|kept| (point - kept).norm() > tolerance)
        {
            distinct.push(point);
        }
    }

    let spread = spread_of(&distinct);
    if distinct.len() < 3 || spread <= tolerance {
        return Err(GeometryError::DegenerateHull {
            points: distinct.len(),
            spread,
        });
    }

    // Lower then upper chain; a non-positive cross product pops the middle
    // point, which drops interior collinear points and keeps only the two
    // extreme endpoints of any collinear run.
    let mut lower: Vec<Point2<f64>> = Vec::with_capacity(distinct.len());
    for &point in &distinct {
        while lower.len() >= 2
            && turn_cross(lower[lower.len() - 2], lower[lower.len() - 1], point) <= tolerance
        {
            lower.pop();
        }
        lower.push(point);
    }

    let mut upper: Vec<Point2<f64>> = Vec::with_capacity(distinct.len());
    for &point in distinct.iter().rev() {
        while upper.len() >= 2
            && turn_cross(upper[upper.len() - 2], upper[upper.len() - 1], point) <= tolerance
        {
            upper.pop();
        }
        upper.push(point);
    }

    // Chain ends repeat each other's first point.
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(GeometryError::DegenerateHull {
            points: lower.len(),
            spread,
        });
    }
    debug!(
        "convex hull: {} input point(s), {} vertex(es)",
        points.len(),
        lower.len()
    );
    Ok(ConvexHull2D {
        vertices: lower,
        tolerance,
    })
}

/// Cross product of the turn `a → b → c`; positive for a left turn.
fn turn_cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Largest coordinate extent of a point set.
fn spread_of(points: &[Point2<f64>]) -> f64 {
    let mut extent: Vector2<f64> = Vector2::zero();
    if let Some(first) = points.first() {
        let mut min = *first;
        let mut max = *first;
        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        extent = max - min;
    }
    extent.norm_inf()
}
