//! Scalar properties of a piece's transform, shared by colouring and sorting.

use std::sync::Arc;

use crate::foundation::core::Vec2;
use crate::foundation::math::vect_len_pow;
use crate::transform::{affine::Transform, metric::Metric};

/// Scalar function of a transform.
pub type TsfmFn = Arc<dyn Fn(&Transform) -> f64 + Send + Sync>;

/// Rotation angle of the matrix in degrees.
pub fn angle() -> TsfmFn {
    Arc::new(|t: &Transform| t.matrix.angle_degrees())
}

pub fn x() -> TsfmFn {
    Arc::new(|t: &Transform| t.vector.x)
}

pub fn y() -> TsfmFn {
    Arc::new(|t: &Transform| t.vector.y)
}

pub fn x_minus_y() -> TsfmFn {
    Arc::new(|t: &Transform| t.vector.x - t.vector.y)
}

/// Euclidean distance of the translation from `point`.
pub fn distance_from(point: Vec2) -> TsfmFn {
    distance_pow(point, 1.0)
}

/// `|vector - point|^power`.
pub fn distance_pow(point: Vec2, power: f64) -> TsfmFn {
    Arc::new(move |t: &Transform| vect_len_pow(t.vector - point, power))
}

/// `log2` of the metric; pieces shrink by one unit per halving.
pub fn log2_size(metric: Metric) -> TsfmFn {
    Arc::new(move |t: &Transform| metric.measure(t).log2())
}

/// Wrap an arbitrary closure.
pub fn custom(f: impl Fn(&Transform) -> f64 + Send + Sync + 'static) -> TsfmFn {
    Arc::new(f)
}

#[cfg(test)]
#[path = "../../tests/unit/strategy/property.rs"]
mod tests;
