//! Hulls of separated point clusters.

use nalgebra::Point2;
use region_tree::{convex_hull, DiskGenerator, Location, WelzlEncloser};

const TOL: f64 = 1.0e-10;

/// Three visually separated clusters; each entry is (points, extreme count).
fn clusters() -> Vec<(Vec<Point2<f64>>, usize)> {
    // 8 points, 4 extreme (square corners).
    let square = vec![
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(3.0, 3.0),
        Point2::new(0.0, 3.0),
        Point2::new(1.0, 1.0),
        Point2::new(2.0, 1.2),
        Point2::new(1.5, 2.0),
        Point2::new(2.2, 2.6),
    ];

    // 5 points, 3 extreme (triangle corners).
    let triangle = vec![
        Point2::new(10.0, 0.0),
        Point2::new(13.0, 0.0),
        Point2::new(11.5, 2.5),
        Point2::new(11.5, 1.0),
        Point2::new(11.3, 0.5),
    ];

    // 8 points, 5 extreme (pentagon corners).
    let pentagon = vec![
        Point2::new(20.0, 10.0),
        Point2::new(23.0, 10.0),
        Point2::new(24.0, 13.0),
        Point2::new(21.5, 15.0),
        Point2::new(19.0, 13.0),
        Point2::new(21.0, 11.5),
        Point2::new(22.0, 12.5),
        Point2::new(21.5, 13.5),
    ];

    vec![(square, 4), (triangle, 3), (pentagon, 5)]
}

#[test]
fn hull_vertex_counts_match_extreme_points() {
    let _ = env_logger::builder().is_test(true).try_init();
    for (points, extreme) in clusters() {
        let hull = convex_hull(&points, TOL).unwrap();
        assert_eq!(
            hull.vertices().len(),
            extreme,
            "cluster of {} points should have {} hull vertices",
            points.len(),
            extreme
        );
    }
}

#[test]
fn every_cluster_point_is_in_its_hull() {
    for (points, _) in clusters() {
        let region = convex_hull(&points, TOL).unwrap().create_region().unwrap();
        for point in &points {
            let location = region.check_point(point);
            assert!(
                location == Location::Inside || location == Location::Boundary,
                "{point} must not be outside its own hull"
            );
        }
    }
}

#[test]
fn cluster_hulls_are_disjoint() {
    let regions: Vec<_> = clusters()
        .into_iter()
        .map(|(points, _)| convex_hull(&points, TOL).unwrap().create_region().unwrap())
        .collect();

    for (i, a) in regions.iter().enumerate() {
        for b in regions.iter().skip(i + 1) {
            let overlap = a.intersection(b);
            assert!(overlap.size() < 1.0e-9, "separated hulls must not overlap");
        }
    }
}

#[test]
fn enclosing_disk_covers_hull_vertices() {
    for (points, _) in clusters() {
        let hull = convex_hull(&points, TOL).unwrap();
        let encloser = WelzlEncloser::new(TOL, DiskGenerator);
        let disk = encloser.enclose(&points).unwrap();

        for vertex in hull.vertices() {
            assert!(
                disk.contains_within(vertex, 1.0e-9),
                "hull vertex {vertex} must be inside the enclosing disk"
            );
        }

        // The disk is determined by points of the set itself.
        assert!(disk.support_len() >= 2);
        for support in disk.support() {
            assert!(points.contains(support));
        }
    }
}
