use super::*;
use crate::canvas::Canvas;
use crate::foundation::core::palette::{BLUE, RED, WHITE};

fn opts(edge: u32) -> RasterOpts {
    RasterOpts::square(edge)
}

#[test]
fn empty_drawing_is_background_only() {
    let frame = rasterize(&Drawing::new(100.0), &opts(16)).unwrap();
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(0, 0), Some(WHITE));
    assert_eq!(frame.pixel(15, 15), Some(WHITE));

    let clear = RasterOpts {
        background: None,
        ..opts(8)
    };
    let frame = rasterize(&Drawing::new(100.0), &clear).unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn dot_lands_at_scaled_position() {
    let mut d = Drawing::new(100.0);
    d.add_point(Point::new(25.0, 25.0), RED, 10.0);
    let frame = rasterize(&d, &opts(200)).unwrap();
    assert_eq!(frame.pixel(50, 50), Some(RED));
    assert_eq!(frame.pixel(150, 150), Some(WHITE));
}

#[test]
fn lines_and_curves_are_stroked() {
    let mut d = Drawing::new(100.0);
    d.add_line(&[Point::new(10.0, 50.0), Point::new(90.0, 50.0)], BLUE, 6.0, false);
    d.add_bezier(
        &[
            Point::new(10.0, 10.0),
            Point::new(50.0, 10.0),
            Point::new(90.0, 10.0),
            Point::new(90.0, 30.0),
        ],
        RED,
        6.0,
        false,
    );
    let frame = rasterize(&d, &opts(100)).unwrap();
    assert_eq!(frame.pixel(50, 50), Some(BLUE));
    assert_eq!(frame.pixel(50, 60), Some(WHITE));
    assert_eq!(frame.pixel(30, 10), Some(RED));
}

#[test]
fn invisible_strokes_have_no_outline() {
    let stroke = |width: f64, colour: Rgba8| Stroke {
        kind: StrokeKind::Line,
        points: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
        colour,
        width,
        closed: false,
    };
    assert!(outline(&stroke(0.0, RED), 0.1).is_none());
    assert!(outline(&stroke(f64::NAN, RED), 0.1).is_none());
    assert!(outline(&stroke(1.0, RED.fade(0.0)), 0.1).is_none());
    assert!(outline(&stroke(1.0, RED), 0.1).is_some());
}

#[test]
fn closed_smooth_curve_starts_and_ends_on_an_edge_midpoint() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(2.0, 2.0),
        Point::new(0.0, 2.0),
    ];
    let path = smooth_curve(&pts, true);
    let els = path.elements();
    assert_eq!(els.first(), Some(&PathEl::MoveTo(Point::new(0.0, 1.0))));
    assert_eq!(els.len(), 1 + 4 + 1);
    assert_eq!(els.last(), Some(&PathEl::ClosePath));

    let open = smooth_curve(&pts, false);
    assert_eq!(open.elements().last(), Some(&PathEl::QuadTo(pts[2], pts[3])));
}

#[test]
fn rejects_degenerate_drawing_size() {
    assert!(rasterize(&Drawing::new(0.0), &opts(8)).is_err());
    assert!(rasterize(&Drawing::new(f64::INFINITY), &opts(8)).is_err());
}
