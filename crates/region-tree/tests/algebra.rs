//! Boolean-algebra laws of regions, as properties over random intervals and
//! arcs.

use std::f64::consts::TAU;

use nalgebra::Point1;
use proptest::prelude::*;
use region_tree::euclidean::oned::IntervalsSet;
use region_tree::spherical::oned::{ArcsSet, S1Point};
use region_tree::{Location, Region};

const TOL: f64 = 1.0e-10;

fn interval_set(lower: f64, length: f64) -> IntervalsSet {
    Region::from_interval(lower, lower + length, TOL).unwrap()
}

fn arc_set(lower: f64, length: f64) -> ArcsSet {
    Region::from_arc(lower, lower + length, TOL).unwrap()
}

/// Sample abscissae covering both operands and their surroundings.
fn probes() -> impl Iterator<Item = Point1<f64>> {
    (-120..=120).map(|i| Point1::new(f64::from(i) * 0.25))
}

proptest! {
    #[test]
    fn union_is_commutative(
        a_lower in -10.0..10.0f64, a_length in 0.1..6.0f64,
        b_lower in -10.0..10.0f64, b_length in 0.1..6.0f64,
    ) {
        let a = interval_set(a_lower, a_length);
        let b = interval_set(b_lower, b_length);
        let ab = a.union(&b);
        let ba = b.union(&a);

        prop_assert!((ab.size() - ba.size()).abs() < 1.0e-9);
        for probe in probes() {
            prop_assert_eq!(ab.check_point(&probe), ba.check_point(&probe));
        }
    }

    #[test]
    fn intersection_with_complement_is_empty(
        lower in -10.0..10.0f64, length in 0.1..6.0f64,
    ) {
        let a = interval_set(lower, length);
        let nothing = a.intersection(&a.complement());
        prop_assert!(nothing.size() < 1.0e-9);
        prop_assert!(nothing.is_empty());
    }

    #[test]
    fn xor_with_itself_is_empty(
        lower in -10.0..10.0f64, length in 0.1..6.0f64,
    ) {
        let a = interval_set(lower, length);
        let nothing = a.xor(&a);
        prop_assert!(nothing.size() < 1.0e-9);
    }

    #[test]
    fn de_morgan_on_intervals(
        a_lower in -10.0..10.0f64, a_length in 0.1..6.0f64,
        b_lower in -10.0..10.0f64, b_length in 0.1..6.0f64,
    ) {
        let a = interval_set(a_lower, a_length);
        let b = interval_set(b_lower, b_length);

        let left = a.union(&b).complement();
        let right = a.complement().intersection(&b.complement());
        for probe in probes() {
            prop_assert_eq!(left.check_point(&probe), right.check_point(&probe));
        }
    }

    #[test]
    fn double_complement_is_identity(
        a_lower in -10.0..10.0f64, a_length in 0.1..6.0f64,
    ) {
        let a = interval_set(a_lower, a_length);
        let restored = a.complement().complement();
        for probe in probes() {
            prop_assert_eq!(a.check_point(&probe), restored.check_point(&probe));
        }
        prop_assert!((a.size() - restored.size()).abs() < 1.0e-9);
    }

    #[test]
    fn difference_splits_the_union(
        a_lower in -10.0..10.0f64, a_length in 0.1..6.0f64,
        b_lower in -10.0..10.0f64, b_length in 0.1..6.0f64,
    ) {
        // |A| = |A ∩ B| + |A \ B|
        let a = interval_set(a_lower, a_length);
        let b = interval_set(b_lower, b_length);
        let shared = a.intersection(&b).size();
        let only_a = a.difference(&b).size();
        prop_assert!((shared + only_a - a.size()).abs() < 1.0e-9);
    }

    #[test]
    fn arc_union_is_commutative(
        a_lower in 0.0..TAU, a_length in 0.1..3.0f64,
        b_lower in 0.0..TAU, b_length in 0.1..3.0f64,
    ) {
        let a = arc_set(a_lower, a_length);
        let b = arc_set(b_lower, b_length);
        let ab = a.union(&b);
        let ba = b.union(&a);

        prop_assert!((ab.size() - ba.size()).abs() < 1.0e-9);
        for i in 0..64 {
            let probe = S1Point::new(f64::from(i) * TAU / 64.0);
            prop_assert_eq!(ab.check_point(&probe), ba.check_point(&probe));
        }
    }

    #[test]
    fn arc_sizes_stay_on_the_circle(
        a_lower in 0.0..TAU, a_length in 0.1..3.0f64,
        b_lower in 0.0..TAU, b_length in 0.1..3.0f64,
    ) {
        let a = arc_set(a_lower, a_length);
        let b = arc_set(b_lower, b_length);

        let union = a.union(&b).size();
        let intersection = a.intersection(&b).size();
        prop_assert!(union <= TAU + 1.0e-9);
        // Inclusion-exclusion on the circle.
        prop_assert!((union + intersection - a.size() - b.size()).abs() < 1.0e-9);
    }

    #[test]
    fn strict_interior_classifies_inside(
        lower in -10.0..10.0f64, length in 1.0..6.0f64,
    ) {
        let a = interval_set(lower, length);
        let midpoint = Point1::new(lower + 0.5 * length);
        prop_assert_eq!(a.check_point(&midpoint), Location::Inside);

        let outside = Point1::new(lower - 1.0);
        prop_assert_eq!(a.check_point(&outside), Location::Outside);

        let boundary = Point1::new(lower);
        prop_assert_eq!(a.check_point(&boundary), Location::Boundary);
    }
}
