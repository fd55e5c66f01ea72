use crate::foundation::core::Vec2;

/// Euclidean length raised to `power`.
#[inline]
pub fn vect_len_pow(v: Vec2, power: f64) -> f64 {
    v.hypot().powf(power)
}

/// Arithmetic mean of a point list. Empty input yields the origin.
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, &p| acc + p);
    sum / points.len() as f64
}

/// Twice the signed area of a polygon; positive for counter-clockwise order.
pub fn signed_area2(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    (0..n)
        .map(|i| points[i].cross(points[(i + 1) % n]))
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
