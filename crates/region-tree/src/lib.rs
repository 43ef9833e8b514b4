//! Space-agnostic regions backed by BSP (Binary Space Partitioning) trees.
//!
//! This crate represents, classifies and combines regions of abstract
//! spaces, flat or curved, through a small set of contracts:
//!
//! - [`Space`], [`Point`] and [`Vector`] define the algebra a geometric
//!   entity must support, independently of dimension or curvature.
//! - [`Hyperplane`] is a codimension-1 divider answering which side a point
//!   is on, with a tolerance for boundary classification; [`SubHyperplane`]
//!   restricts one to a bounded part of itself, and splitting a
//!   sub-hyperplane by a hyperplane is the primitive everything else
//!   reduces to.
//! - [`BspTree`](bsp::BspTree) recursively partitions the whole space with
//!   cut hyperplanes and supports classification, boolean merging and
//!   visitor traversal.
//! - [`Region`] owns one tree and exposes point location, union /
//!   intersection / xor / difference / complement, and lazily computed
//!   size, boundary size and barycenter.
//!
//! Three concrete spaces are provided: the Euclidean line
//! ([`euclidean::oned`], regions are interval sets), the Euclidean plane
//! ([`euclidean::twod`], regions are polygon sets) and the circle
//! ([`spherical::oned`], regions are arc sets, wrapping around 2π).
//!
//! On top of the region engine, [`hull`] generates minimal convex hulls of
//! planar point sets and [`enclosing`] computes minimal enclosing balls
//! with a Welzl-style algorithm.
//!
//! # Example
//!
//! ```
//! use nalgebra::Point2;
//! use region_tree::{convex_hull, Location, Region};
//!
//! let points = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//!     Point2::new(1.0, 1.0),
//! ];
//! let hull = convex_hull(&points, 1.0e-10).unwrap();
//! assert_eq!(hull.vertices().len(), 4);
//!
//! let region = hull.create_region().unwrap();
//! assert_eq!(region.check_point(&Point2::new(1.0, 1.0)), Location::Inside);
//!
//! let shifted = Region::from_box(1.0, 3.0, 0.0, 2.0, 1.0e-10).unwrap();
//! let overlap = region.intersection(&shifted);
//! assert!((overlap.size() - 2.0).abs() < 1.0e-9);
//! ```

pub mod bsp;
pub mod enclosing;
mod error;
pub mod euclidean;
pub mod hull;
mod hyperplane;
mod region;
mod space;
pub mod spherical;

pub use enclosing::{DiskGenerator, EnclosingBall, SupportBallGenerator, WelzlEncloser};
pub use error::{GeometryError, Result};
pub use hull::{convex_hull, ConvexHull2D};
pub use hyperplane::{Embedding, Hyperplane, Side, Split, SubHyperplane};
pub use region::{BoundaryFacet, Location, Region, RegionProperties};
pub use space::{Point, Space, Vector};
