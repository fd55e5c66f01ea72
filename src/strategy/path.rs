//! Outline helpers for path plotting: inward offsetting and spiral fills.

use crate::foundation::core::Vec2;
use crate::foundation::math::{centroid, signed_area2};

const PARALLEL_EPS: f64 = 1e-12;
/// Upper bound on spiral turns, so a hairline brush cannot explode the path.
pub const MAX_SPIRAL_TURNS: usize = 1000;

fn inward_normal(d: Vec2, ccw: bool) -> Option<Vec2> {
    let len = d.hypot();
    if len <= PARALLEL_EPS {
        return None;
    }
    let n = if ccw {
        Vec2::new(-d.y, d.x)
    } else {
        Vec2::new(d.y, -d.x)
    };
    Some(n / len)
}

/// Offset a closed polygon inward by `amount`.
///
/// Each vertex moves to the intersection of its two adjacent edges after both are shifted
/// inward. Orientation comes from the signed area, so either winding works. Polygons with
/// fewer than three vertices or zero area are returned unchanged.
pub fn shrink(points: &[Vec2], amount: f64) -> Vec<Vec2> {
    let n = points.len();
    let area = signed_area2(points);
    if n < 3 || area == 0.0 || !area.is_finite() || amount == 0.0 {
        return points.to_vec();
    }
    let ccw = area > 0.0;

    (0..n)
        .map(|i| {
            let p = points[(i + n - 1) % n];
            let q = points[i];
            let r = points[(i + 1) % n];
            let d1 = q - p;
            let d2 = r - q;
            match (inward_normal(d1, ccw), inward_normal(d2, ccw)) {
                (Some(n1), Some(n2)) => {
                    let a = p + n1 * amount;
                    let b = q + n2 * amount;
                    let denom = d1.cross(d2);
                    if denom.abs() <= PARALLEL_EPS * d1.hypot() * d2.hypot() {
                        q + n1 * amount
                    } else {
                        let s = (b - a).cross(d2) / denom;
                        a + d1 * s
                    }
                }
                (Some(n1), None) => q + n1 * amount,
                (None, Some(n2)) => q + n2 * amount,
                (None, None) => q,
            }
        })
        .collect()
}

/// Closed path that spirals from the centroid out to the outline.
///
/// The number of turns is `round(2 + max_radius / stroke_width)`, so neighbouring turns
/// overlap by at least a brush width. Each turn is the outline scaled towards the centroid.
/// Fewer than three points are returned unchanged.
pub fn spiral_fill(points: &[Vec2], stroke_width: f64) -> Vec<Vec2> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let centre = centroid(points);
    let max_radius = points
        .iter()
        .map(|&p| (p - centre).hypot())
        .fold(0.0, f64::max);
    let turns = if stroke_width > 0.0 && stroke_width.is_finite() {
        (2.0 + max_radius / stroke_width).round() as usize
    } else {
        MAX_SPIRAL_TURNS
    };
    let turns = turns.clamp(2, MAX_SPIRAL_TURNS);

    let mut out = Vec::with_capacity(n * (turns + 1) + 3);
    out.push((points[n - 2] + points[n - 1]) * 0.5);
    out.push(points[n - 1]);
    out.extend_from_slice(points);
    let m = turns as f64;
    for i in 1..=turns {
        let k = i as f64;
        out.extend(points.iter().map(|&p| (p * (m - k) + centre * k) / m));
    }
    out.push(centre);
    out.reverse();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/path.rs"]
mod tests;
