use super::*;
use crate::canvas::drawing::{Drawing, StrokeKind};
use crate::foundation::core::seeded_rng;
use crate::strategy::colour::colour_fixed;
use crate::transform::{affine::Transform, matrix::Matrix2};

fn piece() -> ConcretePiece {
    ConcretePiece::seed(0, Transform::new(Vec2::new(100.0, 200.0), Matrix2::scale(10.0)))
}

fn run(plotter: &Plotter, hull: Option<&[Vec2]>) -> Drawing {
    let p = piece();
    let mut rng = seeded_rng(3);
    let mut ctx = PlotCtx {
        piece: &p,
        diameter: 20.0,
        hull,
        drawing_size: 1000.0,
        rng: &mut rng,
    };
    let mut drawing = Drawing::new(1000.0);
    plotter.plot(&mut drawing, &mut ctx);
    drawing
}

#[test]
fn empty_plotter_falls_back_to_progress_coloured_dot() {
    let d = run(&Plotter::new(), None);
    assert_eq!(d.len(), 1);
    let s = &d.strokes()[0];
    assert_eq!(s.kind, StrokeKind::Point);
    assert_eq!(s.points[0], Point::new(100.0, 800.0));
    assert_eq!(s.width, 10.0);
    // midpoint of (0, 1) halfway between black and blue
    assert_eq!(s.colour, Rgba8::rgb(0, 0, 128));
}

#[test]
fn hidden_plotter_draws_nothing() {
    let mut plotter = Plotter::hidden();
    plotter.add(plot_dot(DotOpts::default()), None);
    assert!(run(&plotter, None).is_empty());
}

#[test]
fn layers_draw_in_order_and_default_to_black() {
    let mut plotter = Plotter::new();
    plotter
        .add(
            plot_path(PathOpts {
                fill: true,
                width: 4.0,
                ..PathOpts::default()
            }),
            Some(colour_fixed(palette::RED, 0.5)),
        )
        .add(
            plot_path(PathOpts {
                closed: true,
                ..PathOpts::default()
            }),
            None,
        );
    let d = run(&plotter, None);
    assert_eq!(d.len(), 2);
    assert_eq!(d.strokes()[0].colour, palette::RED.fade(0.5));
    assert!(!d.strokes()[0].closed);
    assert_eq!(d.strokes()[1].colour, palette::BLACK);
    assert!(d.strokes()[1].closed);
}

#[test]
fn path_falls_back_to_closed_unit_square() {
    let mut plotter = Plotter::new();
    plotter.add(plot_path(PathOpts::default()), None);
    let d = run(&plotter, None);
    let s = &d.strokes()[0];
    assert!(s.closed);
    assert_eq!(s.points.len(), UNIT_SQUARE.len());
    assert_eq!(s.points[2], Point::new(90.0, 810.0));
}

#[test]
fn path_prefers_hull_over_square() {
    let hull = [Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0), Vec2::new(-1.0, -1.0)];
    let mut plotter = Plotter::new();
    plotter.add(plot_path(PathOpts::default()), None);
    let d = run(&plotter, Some(&hull));
    let s = &d.strokes()[0];
    assert!(!s.closed);
    assert_eq!(s.points, vec![
        Point::new(110.0, 800.0),
        Point::new(100.0, 790.0),
        Point::new(90.0, 810.0),
    ]);
}

#[test]
fn scale_width_and_curves() {
    let mut plotter = Plotter::new();
    plotter.add(
        plot_path(PathOpts {
            points: Some(vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)]),
            width: 5.0,
            scale_width: true,
            curved: true,
            ..PathOpts::default()
        }),
        None,
    );
    let d = run(&plotter, None);
    let s = &d.strokes()[0];
    assert_eq!(s.kind, StrokeKind::Bezier);
    assert!((s.width - 1.0).abs() < 1e-12);
}

#[test]
fn shrink_pulls_square_inside_its_outline() {
    let square = vec![
        Vec2::new(-1.0, -1.0),
        Vec2::new(1.0, -1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, 1.0),
    ];
    let mut plotter = Plotter::new();
    plotter.add(
        plot_path(PathOpts {
            points: Some(square),
            width: 4.0,
            shrink: true,
            closed: true,
            ..PathOpts::default()
        }),
        None,
    );
    let d = run(&plotter, None);
    for p in &d.strokes()[0].points {
        assert!((p.x - 100.0).abs() < 10.0 - 1.9);
        assert!((p.y - 800.0).abs() < 10.0 - 1.9);
    }
}

#[test]
fn wobble_stays_within_half_pixels() {
    let mut rng = seeded_rng(9);
    let w = Wobble { pixels: 4.0 };
    for _ in 0..200 {
        let v = w.sample(&mut rng);
        assert!(v.x.abs() <= 2.0 && v.y.abs() <= 2.0);
    }
    assert_eq!(Wobble { pixels: 0.0 }.sample(&mut rng), Vec2::ZERO);
}

#[test]
fn dot_offset_is_in_local_frame() {
    let mut plotter = Plotter::new();
    plotter.add(
        plot_dot(DotOpts {
            expand_factor: 0.5,
            offset: Some(Vec2::new(1.0, 0.0)),
            wobble: None,
        }),
        None,
    );
    let d = run(&plotter, None);
    let s = &d.strokes()[0];
    assert_eq!(s.points[0], Point::new(110.0, 800.0));
    assert_eq!(s.width, 5.0);
}
