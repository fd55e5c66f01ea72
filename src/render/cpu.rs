use kurbo::{BezPath, Cap, Circle, Join, PathEl, Shape as _, StrokeOpts};

use crate::canvas::drawing::{Drawing, Stroke, StrokeKind};
use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{IfsError, IfsResult};
use crate::render::{FrameRGBA, RasterOpts};

/// Flattening tolerance in output pixels.
const PIXEL_TOLERANCE: f64 = 0.25;

/// Rasterize `drawing` into premultiplied RGBA8.
///
/// The drawing's square `size` is scaled uniformly to fit the shorter raster edge.
#[tracing::instrument(
    skip(drawing, opts),
    fields(strokes = drawing.len(), width = opts.width, height = opts.height)
)]
pub fn rasterize(drawing: &Drawing, opts: &RasterOpts) -> IfsResult<FrameRGBA> {
    opts.validate()?;
    if !(drawing.size.is_finite() && drawing.size > 0.0) {
        return Err(IfsError::render(format!(
            "drawing size must be finite and > 0, got {}",
            drawing.size
        )));
    }
    let width: u16 = opts
        .width
        .try_into()
        .map_err(|_| IfsError::render("raster width exceeds u16"))?;
    let height: u16 = opts
        .height
        .try_into()
        .map_err(|_| IfsError::render("raster height exceeds u16"))?;

    let scale = f64::from(width.min(height)) / drawing.size;
    let tolerance = PIXEL_TOLERANCE / scale;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    if let Some(bg) = opts.background {
        ctx.set_paint(cpu_color(bg));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::scale(scale));
    let mut skipped = 0usize;
    for stroke in drawing.strokes() {
        match outline(stroke, tolerance) {
            Some(path) => {
                ctx.set_paint(cpu_color(stroke.colour));
                ctx.fill_path(&bezpath_to_cpu(&path));
            }
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped strokes with no visible area");
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: opts.width,
        height: opts.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

/// Filled outline of one recorded stroke, in drawing coordinates.
pub(crate) fn outline(stroke: &Stroke, tolerance: f64) -> Option<BezPath> {
    if !(stroke.width.is_finite() && stroke.width > 0.0) || stroke.colour.a == 0 {
        return None;
    }
    let first = *stroke.points.first()?;
    if !stroke.points.iter().all(|p| p.is_finite()) {
        return None;
    }

    let centre_line = match stroke.kind {
        StrokeKind::Point => return Some(Circle::new(first, stroke.width).to_path(tolerance)),
        _ if stroke.points.len() == 1 => {
            return Some(Circle::new(first, 0.5 * stroke.width).to_path(tolerance));
        }
        StrokeKind::Line => polyline(&stroke.points, stroke.closed),
        StrokeKind::Bezier => smooth_curve(&stroke.points, stroke.closed),
    };

    let style = kurbo::Stroke::new(stroke.width)
        .with_caps(Cap::Round)
        .with_join(Join::Round);
    Some(kurbo::stroke(
        centre_line,
        &style,
        &StrokeOpts::default(),
        tolerance,
    ))
}

fn polyline(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&p) = iter.next() {
        path.move_to(p);
    }
    for &p in iter {
        path.line_to(p);
    }
    if closed {
        path.close_path();
    }
    path
}

/// Quadratic segments through edge midpoints, with the input points as control points.
pub(crate) fn smooth_curve(points: &[Point], closed: bool) -> BezPath {
    let n = points.len();
    if n < 3 {
        return polyline(points, closed);
    }
    let mut path = BezPath::new();
    if closed {
        path.move_to(points[n - 1].midpoint(points[0]));
        for i in 0..n {
            path.quad_to(points[i], points[i].midpoint(points[(i + 1) % n]));
        }
        path.close_path();
    } else {
        path.move_to(points[0]);
        for i in 1..n - 2 {
            path.quad_to(points[i], points[i].midpoint(points[i + 1]));
        }
        path.quad_to(points[n - 2], points[n - 1]);
    }
    path
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
