//! Interactive demo: hulls, region algebra and enclosing disks.
//!
//! Two point clouds are hulled, their regions combined, and the whole set
//! enclosed in a minimal disk. Keys 1-4 switch the displayed boolean
//! combination (union, intersection, xor, difference).

use macroquad::prelude::*;
use nalgebra::Point2;
use region_tree::euclidean::twod::PolygonsSet;
use region_tree::{convex_hull, DiskGenerator, WelzlEncloser};
use region_viz::{
    draw_disk, draw_hull, draw_points, draw_region_boundary, draw_region_samples, indexed_color,
    View,
};

const TOLERANCE: f64 = 1.0e-10;

fn left_cloud() -> Vec<Point2<f64>> {
    vec![
        Point2::new(1.0, 2.0),
        Point2::new(5.5, 1.2),
        Point2::new(6.5, 4.5),
        Point2::new(4.0, 6.8),
        Point2::new(1.2, 5.5),
        Point2::new(3.0, 3.5),
        Point2::new(4.5, 3.0),
        Point2::new(2.5, 4.8),
    ]
}

fn right_cloud() -> Vec<Point2<f64>> {
    vec![
        Point2::new(4.5, 3.5),
        Point2::new(9.5, 2.5),
        Point2::new(10.5, 6.0),
        Point2::new(7.5, 7.5),
        Point2::new(5.0, 6.0),
        Point2::new(7.0, 4.5),
        Point2::new(8.0, 5.5),
    ]
}

#[macroquad::main("Region algebra")]
async fn main() {
    let left_points = left_cloud();
    let right_points = right_cloud();

    let left_hull = convex_hull(&left_points, TOLERANCE).expect("left cloud spans an area");
    let right_hull = convex_hull(&right_points, TOLERANCE).expect("right cloud spans an area");
    let left_region = left_hull.create_region().expect("left hull is convex");
    let right_region = right_hull.create_region().expect("right hull is convex");

    let all_points: Vec<Point2<f64>> = left_points
        .iter()
        .chain(right_points.iter())
        .copied()
        .collect();
    let disk = WelzlEncloser::new(TOLERANCE, DiskGenerator)
        .enclose(&all_points)
        .expect("point set is not empty");

    let combinations: [(&str, PolygonsSet); 4] = [
        ("union", left_region.union(&right_region)),
        ("intersection", left_region.intersection(&right_region)),
        ("xor", left_region.xor(&right_region)),
        ("difference", left_region.difference(&right_region)),
    ];
    let mut selected = 0;

    let view = View {
        origin: Point2::new(-1.0, -1.0),
        scale: 60.0,
    };

    loop {
        clear_background(BLACK);

        if is_key_pressed(KeyCode::Key1) {
            selected = 0;
        } else if is_key_pressed(KeyCode::Key2) {
            selected = 1;
        } else if is_key_pressed(KeyCode::Key3) {
            selected = 2;
        } else if is_key_pressed(KeyCode::Key4) {
            selected = 3;
        }

        let (name, region) = &combinations[selected];
        draw_region_samples(region, &view, 4.0, Color::new(0.15, 0.25, 0.35, 1.0));
        draw_region_boundary(region, &view, indexed_color(selected));

        draw_hull(&left_hull, &view, indexed_color(4));
        draw_hull(&right_hull, &view, indexed_color(5));
        draw_points(&all_points, &view, WHITE);
        draw_disk(&disk, &view, GRAY);

        draw_text(
            &format!("[1-4] combination: {name}   size = {:.3}", region.size()),
            20.0,
            30.0,
            24.0,
            WHITE,
        );

        next_frame().await
    }
}
