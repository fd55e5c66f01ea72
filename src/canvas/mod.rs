//! Drawing sink the plotter emits primitives into.

use crate::foundation::core::{Point, Rgba8};

/// In-memory recording canvas.
pub mod drawing;

/// Receiver of drawing primitives, in canvas coordinates (y grows downward).
///
/// `width` is the full stroke width in canvas units.
pub trait Canvas {
    fn add_point(&mut self, pos: Point, colour: Rgba8, radius: f64);

    fn add_line(&mut self, points: &[Point], colour: Rgba8, width: f64, closed: bool);

    /// Smooth curve through `points` (quadratic segments between edge midpoints).
    fn add_bezier(&mut self, points: &[Point], colour: Rgba8, width: f64, closed: bool);
}
