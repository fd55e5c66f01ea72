use super::*;
use crate::foundation::core::Vec2;
use crate::fractal::piece::Progress;
use crate::transform::{affine::Transform, matrix::Matrix2};
use crate::foundation::core::palette::{BLACK, BLUE, RED, WHITE};

fn piece(progress: Progress, transform: Transform) -> ConcretePiece {
    let mut p = ConcretePiece::seed(0, transform);
    p.progress = progress;
    p
}

#[test]
fn gradient_clamps_outside_unit_range() {
    let colours = [RED, BLUE];
    assert_eq!(gradient(&colours, -3.0, 1.0, false), RED);
    assert_eq!(gradient(&colours, 7.0, 1.0, false), BLUE);
    assert_eq!(gradient(&colours, f64::NAN, 1.0, false), RED);
}

#[test]
fn gradient_interpolates_between_neighbours() {
    let mid = gradient(&[BLACK, WHITE], 0.5, 1.0, false);
    assert_eq!(mid, Rgba8::rgb(128, 128, 128));
    let three = gradient(&[RED, BLACK, BLUE], 0.75, 1.0, false);
    assert_eq!(three, Rgba8::rgb(0, 0, 128));
}

#[test]
fn gradient_snaps_to_nearest() {
    let colours = [RED, BLACK, BLUE];
    assert_eq!(gradient(&colours, 0.2, 1.0, true), RED);
    assert_eq!(gradient(&colours, 0.3, 1.0, true), BLACK);
    assert_eq!(gradient(&colours, 0.8, 1.0, true), BLUE);
}

#[test]
fn gradient_scales_alpha_and_handles_empty_lists() {
    assert_eq!(gradient(&[RED], 0.0, 0.5, false).a, 128);
    assert_eq!(gradient(&[], 0.5, 1.0, false), BLACK);
}

#[test]
fn progress_colour_uses_interval_midpoint() {
    let f = colour_by_progress(vec![BLACK, WHITE], 1.0, false);
    let p = piece(Progress::new(1.0, 0.5), Transform::identity());
    assert_eq!(f(&p), Rgba8::rgb(191, 191, 191));
}

#[test]
fn tsfm_colour_maps_range_onto_list() {
    let f = colour_by_tsfm(0.0, 100.0, vec![RED, BLUE], property::x(), 1.0, false);
    let left = piece(Progress::FULL, Transform::new(Vec2::new(0.0, 0.0), Matrix2::IDENTITY));
    let right = piece(Progress::FULL, Transform::new(Vec2::new(150.0, 0.0), Matrix2::IDENTITY));
    assert_eq!(f(&left), RED);
    assert_eq!(f(&right), BLUE);

    let degenerate = colour_by_tsfm(5.0, 5.0, vec![RED, BLUE], property::x(), 1.0, false);
    assert_eq!(degenerate(&right), RED);
}

#[test]
fn log2_colour_follows_scale() {
    let f = colour_by_log2_size(-2.0, 0.0, vec![RED, BLUE], Metric::MinEigenvalue, 1.0, false);
    let small = piece(Progress::FULL, Transform::new(Vec2::ZERO, Matrix2::scale(0.25)));
    let unit = piece(Progress::FULL, Transform::identity());
    assert_eq!(f(&small), RED);
    assert_eq!(f(&unit), BLUE);
}

#[test]
fn fixed_colour_ignores_piece() {
    let f = colour_fixed(RED, 0.75);
    let p = piece(Progress::new(0.3, 0.4), Transform::identity());
    assert_eq!(f(&p), Rgba8::rgba(255, 0, 0, 191));
}

#[test]
fn default_colour_runs_black_to_blue_by_progress() {
    let f = default_colour_fn();
    let t = Transform::identity();
    assert_eq!(f(&piece(Progress::new(0.0, 0.0), t)), BLACK);
    assert_eq!(f(&piece(Progress::FULL, t)), Rgba8::rgb(0, 0, 128));
    assert_eq!(f(&piece(Progress::new(1.0, 1.0), t)), BLUE);
}
