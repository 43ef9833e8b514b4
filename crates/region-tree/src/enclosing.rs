//! Minimal enclosing balls.

use log::debug;
use nalgebra::Point2;

use crate::error::{GeometryError, Result};
use crate::space::Point;

/// A ball: a center point, a radius, and the support points that determine
/// it.
#[derive(Debug, Clone)]
pub struct EnclosingBall<P: Point> {
    center: P,
    radius: f64,
    support: Vec<P>,
}

impl<P: Point> EnclosingBall<P> {
    /// Creates a ball from its center, radius and support points.
    pub fn new(center: P, radius: f64, support: Vec<P>) -> Self {
        Self {
            center,
            radius,
            support,
        }
    }

    /// Center of the ball.
    #[inline]
    pub fn center(&self) -> &P {
        &self.center
    }

    /// Radius of the ball.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Points determining the ball.
    #[inline]
    pub fn support(&self) -> &[P] {
        &self.support
    }

    /// Number of support points.
    #[inline]
    pub fn support_len(&self) -> usize {
        self.support.len()
    }

    /// Returns `true` if the point is inside the ball or on its surface.
    pub fn contains(&self, point: &P) -> bool {
        point.distance(&self.center) <= self.radius
    }

    /// Returns `true` if the point is within `margin` of the ball.
    pub fn contains_within(&self, point: &P, margin: f64) -> bool {
        point.distance(&self.center) <= self.radius + margin
    }
}

/// Builds the smallest ball through a given support point set.
///
/// This is the seam through which the generic enclosing algorithm consumes
/// concrete geometry: implementations only ever see at most
/// `DIMENSION + 1` support points.
pub trait SupportBallGenerator<P: Point> {
    /// Dimension of the underlying space.
    const DIMENSION: usize;

    /// Smallest ball whose surface goes through all support points.
    ///
    /// An empty support yields a ball of negative radius containing
    /// nothing; degenerate supports (duplicate or collinear points) must
    /// still produce a valid, possibly zero-measure ball.
    fn ball_on_support(&self, support: &[P]) -> EnclosingBall<P>;
}

/// Minimal enclosing ball computation, Welzl-style.
///
/// Uses the pivoting variant with move-to-front: a running ball is grown by
/// repeatedly pulling in the farthest outside point and recomputing the
/// minimal ball over the reduced support set.
#[derive(Debug, Clone)]
pub struct WelzlEncloser<P: Point, G: SupportBallGenerator<P>> {
    tolerance: f64,
    generator: G,
    _space: std::marker::PhantomData<P>,
}

impl<P: Point, G: SupportBallGenerator<P>> WelzlEncloser<P, G> {
    /// Creates an encloser with a tolerance used when comparing points to
    /// ball surfaces.
    pub fn new(tolerance: f64, generator: G) -> Self {
        Self {
            tolerance,
            generator,
            _space: std::marker::PhantomData,
        }
    }

    /// Computes the minimal ball containing all points.
    ///
    /// Fails with [`GeometryError::NoData`] on an empty point set.
    pub fn enclose(&self, points: &[P]) -> Result<EnclosingBall<P>> {
        if points.is_empty() {
            return Err(GeometryError::NoData);
        }
        Ok(self.pivoting_ball(points))
    }

    fn pivoting_ball(&self, points: &[P]) -> EnclosingBall<P> {
        let mut extreme = vec![points[0]];
        let mut support = Vec::new();
        let mut ball = self.move_to_front_ball(&mut extreme, 1, &mut support);

        loop {
            // Select the point farthest outside the current ball.
            let farthest = points
                .iter()
                .max_by(|a, b| {
                    a.distance(&ball.center).total_cmp(&b.distance(&ball.center))
                })
                .copied()
                .expect("point set is not empty");
            if ball.contains_within(&farthest, self.tolerance) {
                return ball;
            }

            debug!(
                "enclosing ball pivot: radius {:.6}, {} extreme point(s)",
                ball.radius,
                extreme.len()
            );
            support.clear();
            support.push(farthest);
            let len = extreme.len();
            ball = self.move_to_front_ball(&mut extreme, len, &mut support);
            extreme.insert(0, farthest);
        }
    }

    /// Incrementally grows a ball over the first `count` extreme points,
    /// moving offending points to the front of the list.
    fn move_to_front_ball(
        &self,
        extreme: &mut Vec<P>,
        count: usize,
        support: &mut Vec<P>,
    ) -> EnclosingBall<P> {
        let mut ball = self.generator.ball_on_support(support);
        if ball.support_len() <= G::DIMENSION {
            for i in 0..count {
                let point = extreme[i];
                if !ball.contains_within(&point, self.tolerance) {
                    // The point must be on the surface of the new ball.
                    support.push(point);
                    ball = self.move_to_front_ball(extreme, i, support);
                    support.pop();

                    extreme.remove(i);
                    extreme.insert(0, point);
                }
            }
        }
        ball
    }
}

/// Support ball generator for the plane: disks through up to three points.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskGenerator;

impl SupportBallGenerator<Point2<f64>> for DiskGenerator {
    const DIMENSION: usize = 2;

    fn ball_on_support(&self, support: &[Point2<f64>]) -> EnclosingBall<Point2<f64>> {
        match support {
            [] => EnclosingBall::new(Point2::nan(), f64::NEG_INFINITY, Vec::new()),
            [a] => EnclosingBall::new(*a, 0.0, vec![*a]),
            [a, b] => EnclosingBall::new(
                a.move_towards(b, 0.5),
                0.5 * a.distance(b),
                vec![*a, *b],
            ),
            [a, b, c, ..] => circumscribed_disk(*a, *b, *c),
        }
    }
}

/// Disk through three points, falling back to the farthest-pair diameter
/// disk when the points are collinear.
fn circumscribed_disk(
    a: Point2<f64>,
    b: Point2<f64>,
    c: Point2<f64>,
) -> EnclosingBall<Point2<f64>> {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1.0e-30 {
        // Degenerate (collinear) support: the two farthest points determine
        // a valid disk covering the third.
        let pairs = [(a, b), (a, c), (b, c)];
        let (p, q) = pairs
            .iter()
            .copied()
            .max_by(|(p1, q1), (p2, q2)| p1.distance(q1).total_cmp(&p2.distance(q2)))
            .expect("three candidate pairs");
        return EnclosingBall::new(p.move_towards(&q, 0.5), 0.5 * p.distance(&q), vec![p, q]);
    }

    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;
    let center = Point2::new(
        (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d,
        (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d,
    );
    let radius = a
        .distance(&center)
        .max(b.distance(&center))
        .max(c.distance(&center));
    EnclosingBall::new(center, radius, vec![a, b, c])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1.0e-10;

    fn encloser() -> WelzlEncloser<Point2<f64>, DiskGenerator> {
        WelzlEncloser::new(TOL, DiskGenerator)
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(encloser().enclose(&[]).unwrap_err(), GeometryError::NoData);
    }

    #[test]
    fn single_point_gives_zero_ball() {
        let ball = encloser().enclose(&[Point2::new(1.0, 2.0)]).unwrap();
        assert_abs_diff_eq!(ball.radius(), 0.0, epsilon = TOL);
        assert_eq!(ball.center(), &Point2::new(1.0, 2.0));
        assert_eq!(ball.support_len(), 1);
    }

    #[test]
    fn two_points_give_diameter_ball() {
        let ball = encloser()
            .enclose(&[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)])
            .unwrap();
        assert_abs_diff_eq!(ball.radius(), 1.0, epsilon = TOL);
        assert_abs_diff_eq!(ball.center().x, 1.0, epsilon = TOL);
        assert_abs_diff_eq!(ball.center().y, 0.0, epsilon = TOL);
    }

    #[test]
    fn collinear_points_still_give_a_ball() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ];
        let ball = encloser().enclose(&points).unwrap();
        assert_abs_diff_eq!(ball.radius(), 1.5, epsilon = 1.0e-9);
        assert_abs_diff_eq!(ball.center().x, 1.5, epsilon = 1.0e-9);
        for point in &points {
            assert!(ball.contains_within(point, TOL));
        }
    }

    #[test]
    fn equilateral_triangle_circumcircle() {
        let height = 3.0_f64.sqrt() / 2.0;
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, height),
        ];
        let ball = encloser().enclose(&points).unwrap();
        // Circumradius of a unit equilateral triangle.
        assert_abs_diff_eq!(ball.radius(), 1.0 / 3.0_f64.sqrt(), epsilon = 1.0e-9);
        assert_eq!(ball.support_len(), 3);
    }

    #[test]
    fn obtuse_triangle_uses_two_supports() {
        // For an obtuse triangle the minimal ball is the diameter ball of
        // the longest side, not the circumcircle.
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 0.1),
        ];
        let ball = encloser().enclose(&points).unwrap();
        assert_abs_diff_eq!(ball.radius(), 2.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(ball.center().x, 2.0, epsilon = 1.0e-9);
        for point in &points {
            assert!(ball.contains_within(point, 1.0e-9));
        }
    }

    #[test]
    fn cloud_is_fully_enclosed_and_minimal() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.3),
            Point2::new(2.0, -0.2),
            Point2::new(3.0, 1.0),
            Point2::new(1.5, 2.4),
            Point2::new(-0.5, 1.2),
            Point2::new(0.7, 1.9),
        ];
        let ball = encloser().enclose(&points).unwrap();

        for point in &points {
            assert!(ball.contains_within(point, 1.0e-9));
        }

        // Minimality: the support points are on the surface, so no smaller
        // radius can cover them.
        assert!(ball.support_len() >= 2);
        for support in ball.support() {
            assert_abs_diff_eq!(support.distance(ball.center()), ball.radius(), epsilon = 1.0e-9);
        }
    }
}
