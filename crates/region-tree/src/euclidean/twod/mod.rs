//! The 2-dimensional Euclidean plane.
//!
//! Hyperplanes of the plane are oriented lines; regions of the plane are
//! polygon sets, possibly non-convex and possibly unbounded.

mod line;
mod polygons;

use nalgebra::Point2;

use crate::region::{Region, RegionProperties};
use crate::space::Space;

pub use line::{Line, SubLine};
pub use polygons::PolygonsSet;

/// The 2-dimensional Euclidean space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Euclidean2D;

impl Space for Euclidean2D {
    const DIMENSION: usize = 2;
    const SMALLEST_TOLERANCE: f64 = f64::EPSILON;

    type Point = Point2<f64>;
    type Hyperplane = Line;
    type Sub = SubLine;

    fn measure(region: &Region<Self>) -> RegionProperties<Self::Point> {
        polygons::measure_region(region)
    }
}
