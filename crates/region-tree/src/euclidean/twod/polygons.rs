//! Polygonal regions of the plane.

use nalgebra::Point2;

use crate::error::{GeometryError, Result};
use crate::hyperplane::SubHyperplane;
use crate::region::{BoundaryFacet, Region, RegionProperties};
use crate::space::{Point, Space};

use super::line::SubLine;
use super::Euclidean2D;

/// Region of the plane: a set of polygons, possibly unbounded.
pub type PolygonsSet = Region<Euclidean2D>;

impl Region<Euclidean2D> {
    /// Builds the region enclosed by a simple polygon loop.
    ///
    /// Consecutive duplicate vertices (closer than the tolerance) are
    /// dropped, including a repeated final vertex; the loop is closed
    /// implicitly. Both winding orders are accepted, the loop is normalized
    /// to counter-clockwise. A loop with fewer than three effective
    /// vertices, a loop enclosing no area or a self-crossing loop fails at
    /// construction.
    pub fn from_vertex_loop(vertices: &[Point2<f64>], tolerance: f64) -> Result<PolygonsSet> {
        let tolerance = Euclidean2D::check_tolerance(tolerance)?;

        let mut loop_vertices: Vec<Point2<f64>> = Vec::with_capacity(vertices.len());
        for vertex in vertices {
            if loop_vertices
                .last()
                .is_none_or(|last| last.distance(vertex) > tolerance)
            {
                loop_vertices.push(*vertex);
            }
        }
        if loop_vertices.len() > 1
            && loop_vertices[0].distance(&loop_vertices[loop_vertices.len() - 1]) <= tolerance
        {
            loop_vertices.pop();
        }
        if loop_vertices.len() < 3 {
            return Err(GeometryError::DegenerateBoundaryLoop {
                vertices: loop_vertices.len(),
            });
        }

        let double_area = shoelace(&loop_vertices);
        if double_area.abs() <= tolerance {
            return Err(GeometryError::DegenerateBoundaryLoop {
                vertices: loop_vertices.len(),
            });
        }
        if double_area < 0.0 {
            loop_vertices.reverse();
        }

        check_simple(&loop_vertices)?;

        let n = loop_vertices.len();
        let mut boundary = Vec::with_capacity(n);
        for i in 0..n {
            let start = loop_vertices[i];
            let end = loop_vertices[(i + 1) % n];
            boundary.push(SubLine::from_segment(start, end, tolerance)?);
        }
        Region::from_boundary(boundary, tolerance)
    }

    /// Builds the axis-aligned rectangle `[x_min, x_max] × [y_min, y_max]`.
    pub fn from_box(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        tolerance: f64,
    ) -> Result<PolygonsSet> {
        Self::from_vertex_loop(
            &[
                Point2::new(x_min, y_min),
                Point2::new(x_max, y_min),
                Point2::new(x_max, y_max),
                Point2::new(x_min, y_max),
            ],
            tolerance,
        )
    }
}

/// Twice the signed area of a closed loop.
fn shoelace(vertices: &[Point2<f64>]) -> f64 {
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum
}

/// Rejects loops whose non-adjacent edges cross.
fn check_simple(vertices: &[Point2<f64>]) -> Result<()> {
    let n = vertices.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            let (c, d) = (vertices[j], vertices[(j + 1) % n]);
            if segments_cross(a, b, c, d) {
                return Err(GeometryError::CrossingBoundaryLoops { first: i, second: j });
            }
        }
    }
    Ok(())
}

/// Strict proper-crossing test between segments `ab` and `cd`.
fn segments_cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
    let orient = |p: Point2<f64>, q: Point2<f64>, r: Point2<f64>| {
        (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
    };
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);
    d1 * d2 < 0.0 && d3 * d4 < 0.0
}

/// Size and barycenter of a planar region via Green's theorem over its
/// oriented boundary.
pub(super) fn measure_region(region: &Region<Euclidean2D>) -> RegionProperties<Point2<f64>> {
    if region.tree().is_leaf() || region.is_empty() || region.is_full() {
        let size = if region.is_empty() { 0.0 } else { f64::INFINITY };
        return RegionProperties {
            size,
            barycenter: Point2::nan(),
        };
    }

    let mut double_area = 0.0;
    let mut weighted_x = 0.0;
    let mut weighted_y = 0.0;
    for facet in region.boundary() {
        for (sub, reversed) in facet_pieces(&facet) {
            for interval in sub.intervals() {
                if interval.lower().is_infinite() || interval.upper().is_infinite() {
                    // Unbounded region.
                    return RegionProperties {
                        size: f64::INFINITY,
                        barycenter: Point2::nan(),
                    };
                }
                let line = sub.hyperplane();
                let mut p1 = line.point_at(interval.lower());
                let mut p2 = line.point_at(interval.upper());
                if reversed {
                    std::mem::swap(&mut p1, &mut p2);
                }
                let cross = p1.x * p2.y - p2.x * p1.y;
                double_area += cross;
                weighted_x += (p1.x + p2.x) * cross;
                weighted_y += (p1.y + p2.y) * cross;
            }
        }
    }

    if double_area <= 0.0 {
        return RegionProperties {
            size: 0.0,
            barycenter: Point2::nan(),
        };
    }
    RegionProperties {
        size: 0.5 * double_area,
        barycenter: Point2::new(
            weighted_x / (3.0 * double_area),
            weighted_y / (3.0 * double_area),
        ),
    }
}

/// Boundary pieces of a facet with their traversal orientation: outward
/// parts keep the interior on their left and are walked as-is, inward parts
/// are walked backwards.
fn facet_pieces(facet: &BoundaryFacet<Euclidean2D>) -> Vec<(&SubLine, bool)> {
    let mut pieces = Vec::with_capacity(2);
    if let Some(outward) = &facet.outward {
        pieces.push((outward, false));
    }
    if let Some(inward) = &facet.inward {
        pieces.push((inward, true));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Location;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1.0e-10;

    fn unit_square() -> PolygonsSet {
        Region::from_box(0.0, 1.0, 0.0, 1.0, TOL).unwrap()
    }

    #[test]
    fn square_classification() {
        let square = unit_square();
        assert_eq!(square.check_point(&Point2::new(0.5, 0.5)), Location::Inside);
        assert_eq!(square.check_point(&Point2::new(2.0, 0.5)), Location::Outside);
        assert_eq!(square.check_point(&Point2::new(-0.1, -0.1)), Location::Outside);
        assert_eq!(square.check_point(&Point2::new(1.0, 0.5)), Location::Boundary);
        assert_eq!(square.check_point(&Point2::new(0.0, 0.0)), Location::Boundary);
    }

    #[test]
    fn square_measures() {
        let square = unit_square();
        assert_abs_diff_eq!(square.size(), 1.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(square.boundary_size(), 4.0, epsilon = 1.0e-9);
        let barycenter = square.barycenter();
        assert_abs_diff_eq!(barycenter.x, 0.5, epsilon = 1.0e-9);
        assert_abs_diff_eq!(barycenter.y, 0.5, epsilon = 1.0e-9);
    }

    #[test]
    fn winding_order_is_normalized() {
        // Clockwise input must yield the same region as counter-clockwise.
        let clockwise = Region::from_vertex_loop(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(0.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 0.0),
            ],
            TOL,
        )
        .unwrap();
        assert_eq!(
            clockwise.check_point(&Point2::new(0.5, 0.5)),
            Location::Inside
        );
        assert_abs_diff_eq!(clockwise.size(), 1.0, epsilon = 1.0e-9);
    }

    #[test]
    fn triangle_barycenter() {
        let triangle = Region::from_vertex_loop(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 0.0),
                Point2::new(0.0, 3.0),
            ],
            TOL,
        )
        .unwrap();
        assert_abs_diff_eq!(triangle.size(), 4.5, epsilon = 1.0e-9);
        let barycenter = triangle.barycenter();
        assert_abs_diff_eq!(barycenter.x, 1.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(barycenter.y, 1.0, epsilon = 1.0e-9);
    }

    #[test]
    fn degenerate_loops_are_rejected() {
        let two_points = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert_eq!(
            Region::from_vertex_loop(&two_points, TOL).unwrap_err(),
            GeometryError::DegenerateBoundaryLoop { vertices: 2 }
        );

        let collinear = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(
            Region::from_vertex_loop(&collinear, TOL).unwrap_err(),
            GeometryError::DegenerateBoundaryLoop { vertices: 3 }
        );
    }

    #[test]
    fn crossing_loop_is_rejected() {
        // A bow-tie: edges 0-1 and 2-3 cross.
        let bow_tie = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let err = Region::from_vertex_loop(&bow_tie, TOL).unwrap_err();
        assert!(matches!(err, GeometryError::CrossingBoundaryLoops { .. }));
    }

    #[test]
    fn boolean_algebra_on_squares() {
        let left = Region::from_box(0.0, 2.0, 0.0, 1.0, TOL).unwrap();
        let right = Region::from_box(1.0, 3.0, 0.0, 1.0, TOL).unwrap();

        let union = left.union(&right);
        assert_abs_diff_eq!(union.size(), 3.0, epsilon = 1.0e-9);
        assert_eq!(union.check_point(&Point2::new(1.5, 0.5)), Location::Inside);

        let intersection = left.intersection(&right);
        assert_abs_diff_eq!(intersection.size(), 1.0, epsilon = 1.0e-9);
        assert_eq!(
            intersection.check_point(&Point2::new(0.5, 0.5)),
            Location::Outside
        );

        let xor = left.xor(&right);
        assert_abs_diff_eq!(xor.size(), 2.0, epsilon = 1.0e-9);
        assert_eq!(xor.check_point(&Point2::new(1.5, 0.5)), Location::Outside);

        let difference = left.difference(&right);
        assert_abs_diff_eq!(difference.size(), 1.0, epsilon = 1.0e-9);
        assert_eq!(
            difference.check_point(&Point2::new(0.5, 0.5)),
            Location::Inside
        );
        assert_eq!(
            difference.check_point(&Point2::new(1.5, 0.5)),
            Location::Outside
        );
    }

    #[test]
    fn complement_swaps_inside_and_outside() {
        let square = unit_square();
        let outside = square.complement();
        assert_eq!(
            outside.check_point(&Point2::new(0.5, 0.5)),
            Location::Outside
        );
        assert_eq!(outside.check_point(&Point2::new(5.0, 5.0)), Location::Inside);
        assert!(outside.size().is_infinite());
        assert!(outside.barycenter().is_nan());

        // Double complement restores the original classification.
        let restored = outside.complement();
        assert_eq!(
            restored.check_point(&Point2::new(0.5, 0.5)),
            Location::Inside
        );
    }

    #[test]
    fn sub_line_clipped_to_region() {
        let square = unit_square();
        let traverse =
            SubLine::from_segment(Point2::new(-1.0, 0.5), Point2::new(2.0, 0.5), TOL).unwrap();

        let inside = square.intersection_with(traverse).unwrap();
        assert_abs_diff_eq!(inside.size(), 1.0, epsilon = 1.0e-9);
        let segments = inside.segments();
        assert_eq!(segments.len(), 1);
        assert_abs_diff_eq!(segments[0].0.x, 0.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(segments[0].1.x, 1.0, epsilon = 1.0e-9);

        let outside =
            SubLine::from_segment(Point2::new(2.0, 2.0), Point2::new(3.0, 2.0), TOL).unwrap();
        assert!(square.intersection_with(outside).is_none());
    }

    #[test]
    fn contains_nested_squares() {
        let outer = Region::from_box(0.0, 4.0, 0.0, 4.0, TOL).unwrap();
        let inner = Region::from_box(1.0, 2.0, 1.0, 2.0, TOL).unwrap();
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn non_convex_region_from_loop() {
        // An L-shaped hexagon.
        let l_shape = Region::from_vertex_loop(
            &[
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 0.0),
                Point2::new(3.0, 1.0),
                Point2::new(1.0, 1.0),
                Point2::new(1.0, 3.0),
                Point2::new(0.0, 3.0),
            ],
            TOL,
        )
        .unwrap();
        assert_abs_diff_eq!(l_shape.size(), 5.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(l_shape.boundary_size(), 12.0, epsilon = 1.0e-9);
        assert_eq!(l_shape.check_point(&Point2::new(0.5, 2.5)), Location::Inside);
        assert_eq!(l_shape.check_point(&Point2::new(2.0, 2.0)), Location::Outside);
        assert_eq!(l_shape.check_point(&Point2::new(2.0, 1.0)), Location::Boundary);
    }
}
