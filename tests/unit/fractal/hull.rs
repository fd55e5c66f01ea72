use super::*;
use crate::foundation::math::signed_area2;
use crate::fractal::piece::Piece;
use crate::transform::matrix::Matrix2;

fn v(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

#[test]
fn reduce_hull_drops_interior_points_and_winds_ccw() {
    let pts = [
        v(0.0, 0.0),
        v(1.0, 0.0),
        v(0.5, 0.5),
        v(1.0, 1.0),
        v(0.2, 0.7),
        v(0.0, 1.0),
    ];
    let hull = reduce_hull(&pts, 0.01).unwrap();
    assert_eq!(hull, vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)]);
    assert!(signed_area2(&hull) > 0.0);
}

#[test]
fn reduce_hull_merges_near_duplicates_keeping_first_point() {
    let pts = [
        v(0.001, 0.0),
        v(0.0, 0.002),
        v(2.0, 0.0),
        v(2.003, 0.001),
        v(0.0, 2.0),
    ];
    let hull = reduce_hull(&pts, 0.05).unwrap();
    assert_eq!(hull.len(), 3);
    assert!(hull.contains(&v(0.001, 0.0)));
    assert!(hull.contains(&v(2.0, 0.0)));
    assert!(!hull.contains(&v(2.003, 0.001)));
}

#[test]
fn reduce_hull_rejects_collinear_and_tiny_inputs() {
    assert!(reduce_hull(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0), v(3.0, 3.0)], 0.01).is_none());
    assert!(reduce_hull(&[v(0.0, 0.0), v(1.0, 0.0)], 0.01).is_none());
    assert!(reduce_hull(&[v(0.0, 0.0), v(0.001, 0.0), v(0.0, 0.001)], 0.1).is_none());
    assert!(reduce_hull(&[], 0.1).is_none());
}

#[test]
fn default_initial_hull_span() {
    let span = min_span(&DEFAULT_INITIAL_HULL);
    assert!((span - 1.982).abs() < 1e-3, "{span}");
}

#[test]
fn hull_contains_respects_tolerance() {
    let square = [v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)];
    assert!(hull_contains(&square, v(0.5, 0.5), 0.0));
    assert!(hull_contains(&square, v(1.0, 0.5), 0.0));
    assert!(!hull_contains(&square, v(1.1, 0.5), 0.0));
    assert!(hull_contains(&square, v(1.1, 0.5), 0.2));
    assert!(!hull_contains(&square[..2], v(0.5, 0.0), 1.0));
}

#[test]
fn opts_validation() {
    HullOpts::default().validate().unwrap();
    let bad_accuracy = HullOpts {
        accuracy: 0.0,
        ..HullOpts::default()
    };
    assert!(bad_accuracy.validate().is_err());
    let flat = HullOpts {
        initial_hull: vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)],
        ..HullOpts::default()
    };
    assert!(flat.validate().is_err());

    let mut fs = FractalSystem::new();
    fs.make_defns(1).unwrap();
    assert!(fs.calculate_hulls(&bad_accuracy).is_err());
}

#[test]
fn triangle_gasket_converges_to_its_corners() {
    let mut fs = FractalSystem::new();
    fs.make_defns(1).unwrap();
    let d = fs.defn_mut(0).unwrap();
    for (x, y) in [(-0.5, -0.5), (0.5, -0.5), (-0.5, 0.5)] {
        d.add_child(Piece::new(0usize, Vec2::new(x, y), Matrix2::scale(0.5)));
    }
    let report = fs.calculate_hulls(&HullOpts::default()).unwrap();
    assert_eq!(report.degenerate_events, 0);
    assert_eq!(report.skipped_children, 0);

    let hull = fs.defns()[0].hull().unwrap();
    for corner in [v(-1.0, -1.0), v(1.0, -1.0), v(-1.0, 1.0)] {
        assert!(hull_contains(hull, corner, 0.1), "{corner:?} outside {hull:?}");
    }
    assert!(!hull_contains(hull, v(0.5, 0.5), 0.05));
    assert!((report.diameters[0] - 3f64.sqrt()).abs() < 0.1, "{:?}", report.diameters);
    assert_eq!(fs.defns()[0].relative_diameter(), report.diameters[0]);
}

#[test]
fn childless_definitions_keep_the_seed_hull() {
    let mut fs = FractalSystem::new();
    fs.make_defns(1).unwrap();
    let report = fs.calculate_hulls(&HullOpts::default()).unwrap();
    assert_eq!(report.hull_sizes, vec![3]);
    assert_eq!(fs.defns()[0].hull(), Some(&DEFAULT_INITIAL_HULL[..]));
}

#[test]
fn degenerate_reduction_keeps_previous_hull() {
    let mut fs = FractalSystem::new();
    fs.make_defns(1).unwrap();
    fs.defn_mut(0)
        .unwrap()
        .add_child(Piece::new(0usize, Vec2::new(0.3, 0.3), Matrix2::scale(0.0)));
    let opts = HullOpts {
        rounds: 3,
        ..HullOpts::default()
    };
    let report = fs.calculate_hulls(&opts).unwrap();
    assert_eq!(report.degenerate_events, 3);
    assert_eq!(fs.defns()[0].hull(), Some(&DEFAULT_INITIAL_HULL[..]));
}

#[test]
fn reduce_hull_handles_extreme_coordinates() {
    let huge = [v(-1e300, -1e300), v(1e300, -1e300), v(0.0, 1e300)];
    assert!(reduce_hull(&huge, DEFAULT_HULL_ACCURACY).is_none());

    let wide = [v(-5e16, -5e16), v(5e16, -5e16), v(0.0, 5e16), v(0.0, 0.0)];
    let hull = reduce_hull(&wide, DEFAULT_HULL_ACCURACY).unwrap();
    assert_eq!(hull, vec![v(-5e16, -5e16), v(5e16, -5e16), v(0.0, 5e16)]);
}

#[test]
fn exploding_children_keep_previous_hull() {
    let mut fs = FractalSystem::new();
    fs.make_defns(1).unwrap();
    fs.defn_mut(0)
        .unwrap()
        .add_child(Piece::new(0usize, Vec2::ZERO, Matrix2::scale(1e300)));
    let opts = HullOpts {
        rounds: 2,
        ..HullOpts::default()
    };
    let report = fs.calculate_hulls(&opts).unwrap();
    assert_eq!(report.degenerate_events, 2);
    assert_eq!(fs.defns()[0].hull(), Some(&DEFAULT_INITIAL_HULL[..]));
}

#[test]
fn unknown_child_fids_are_skipped() {
    let mut fs = FractalSystem::new();
    fs.make_defns(1).unwrap();
    fs.defn_mut(0)
        .unwrap()
        .add_child(Piece::new(7usize, Vec2::ZERO, Matrix2::scale(0.5)));
    let opts = HullOpts {
        rounds: 4,
        ..HullOpts::default()
    };
    let report = fs.calculate_hulls(&opts).unwrap();
    assert_eq!(report.skipped_children, 4);
    assert_eq!(report.degenerate_events, 0);
    assert_eq!(report.hull_sizes, vec![3]);
}

#[test]
fn rounds_read_the_previous_round() {
    // 0 -> 1 -> 2 chain: after one round only defn 1 has moved off the seed
    let mut fs = FractalSystem::new();
    fs.make_defns(3).unwrap();
    let half = Matrix2::scale(0.5);
    fs.defn_mut(0)
        .unwrap()
        .add_child(Piece::new(1usize, Vec2::ZERO, Matrix2::IDENTITY));
    fs.defn_mut(1)
        .unwrap()
        .add_child(Piece::new(2usize, Vec2::ZERO, half));
    let opts = HullOpts {
        rounds: 1,
        ..HullOpts::default()
    };
    fs.calculate_hulls(&opts).unwrap();
    let seed_span = min_span(&DEFAULT_INITIAL_HULL);
    assert!((min_span(fs.defns()[0].hull().unwrap()) - seed_span).abs() < 1e-9);
    assert!((min_span(fs.defns()[1].hull().unwrap()) - seed_span * 0.5).abs() < 1e-9);

    fs.calculate_hulls(&HullOpts { rounds: 2, ..opts }).unwrap();
    assert!((min_span(fs.defns()[0].hull().unwrap()) - seed_span * 0.5).abs() < 1e-9);
}
