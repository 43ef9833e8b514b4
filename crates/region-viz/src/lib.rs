//! Shared drawing utilities for the region demos.

use macroquad::prelude::*;
use nalgebra::Point2;
use region_tree::euclidean::twod::PolygonsSet;
use region_tree::{ConvexHull2D, EnclosingBall, Location};

/// World-to-screen mapping for a fixed view box.
#[derive(Debug, Clone, Copy)]
pub struct View {
    /// World coordinates of the bottom-left corner.
    pub origin: Point2<f64>,
    /// Pixels per world unit.
    pub scale: f64,
}

impl View {
    /// Screen position of a world point (y axis flipped).
    pub fn to_screen(&self, point: &Point2<f64>) -> Vec2 {
        vec2(
            ((point.x - self.origin.x) * self.scale) as f32,
            screen_height() - ((point.y - self.origin.y) * self.scale) as f32,
        )
    }

    /// World position of a screen pixel.
    pub fn to_world(&self, x: f32, y: f32) -> Point2<f64> {
        Point2::new(
            self.origin.x + f64::from(x) / self.scale,
            self.origin.y + f64::from(screen_height() - y) / self.scale,
        )
    }
}

/// Deterministic color derived from an index, bright enough on black.
pub fn indexed_color(index: usize) -> Color {
    const PALETTE: [Color; 6] = [SKYBLUE, ORANGE, GREEN, PINK, YELLOW, VIOLET];
    PALETTE[index % PALETTE.len()]
}

/// Fills the interior of a region by sampling a pixel grid.
pub fn draw_region_samples(region: &PolygonsSet, view: &View, step: f32, color: Color) {
    let mut y = 0.0;
    while y < screen_height() {
        let mut x = 0.0;
        while x < screen_width() {
            let world = view.to_world(x, y);
            if region.check_point(&world) == Location::Inside {
                draw_rectangle(x, y - step, step, step, color);
            }
            x += step;
        }
        y += step;
    }
}

/// Draws the boundary facets of a region as line segments.
pub fn draw_region_boundary(region: &PolygonsSet, view: &View, color: Color) {
    for facet in region.boundary() {
        for sub in [&facet.outward, &facet.inward].into_iter().flatten() {
            for (start, end) in sub.segments() {
                let a = view.to_screen(&start);
                let b = view.to_screen(&end);
                draw_line(a.x, a.y, b.x, b.y, 2.0, color);
            }
        }
    }
}

/// Draws a hull outline and its vertices.
pub fn draw_hull(hull: &ConvexHull2D, view: &View, color: Color) {
    let vertices = hull.vertices();
    for i in 0..vertices.len() {
        let a = view.to_screen(&vertices[i]);
        let b = view.to_screen(&vertices[(i + 1) % vertices.len()]);
        draw_line(a.x, a.y, b.x, b.y, 1.5, color);
        draw_circle(a.x, a.y, 3.0, color);
    }
}

/// Draws an enclosing disk and its support points.
pub fn draw_disk(disk: &EnclosingBall<Point2<f64>>, view: &View, color: Color) {
    let center = view.to_screen(disk.center());
    let radius = (disk.radius() * view.scale) as f32;
    draw_circle_lines(center.x, center.y, radius, 1.5, color);
    for support in disk.support() {
        let s = view.to_screen(support);
        draw_circle(s.x, s.y, 4.0, color);
    }
}

/// Draws a raw point cloud.
pub fn draw_points(points: &[Point2<f64>], view: &View, color: Color) {
    for point in points {
        let p = view.to_screen(point);
        draw_circle(p.x, p.y, 2.0, color);
    }
}
