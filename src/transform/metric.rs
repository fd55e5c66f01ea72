//! Scalar "size" measures of a transform.
//!
//! A metric maps a piece's transform to a positive number that, multiplied by the
//! definition's relative diameter, approximates how large the piece is on the canvas.

use std::{fmt, sync::Arc};

use crate::transform::{affine::Transform, matrix::Matrix2};

/// User-supplied metric.
pub type MetricFn = Arc<dyn Fn(&Transform) -> f64 + Send + Sync>;

/// Metric selection for a system default or a per-definition override.
#[derive(Clone, Default)]
pub enum Metric {
    /// Smallest eigenvalue modulus of the linear part.
    ///
    /// Tracks worst-case shrinkage under sheared or stretched maps.
    #[default]
    MinEigenvalue,
    /// Root mean square of the matrix entries, normalized so the identity measures 1.
    Rms,
    /// Length of the image of the x unit vector; suits line-segment fractals.
    XUnit,
    /// Arbitrary function of the whole transform.
    Custom(MetricFn),
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinEigenvalue => f.write_str("MinEigenvalue"),
            Self::Rms => f.write_str("Rms"),
            Self::XUnit => f.write_str("XUnit"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Metric {
    /// Evaluate the metric for `t`.
    pub fn measure(&self, t: &Transform) -> f64 {
        match self {
            Self::MinEigenvalue => min_abs_eigenvalue(t.matrix),
            Self::Rms => rms(t.matrix),
            Self::XUnit => x_unit_length(t.matrix),
            Self::Custom(f) => f(t),
        }
    }

    /// Wrap a closure as a custom metric.
    pub fn custom(f: impl Fn(&Transform) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }
}

/// Smallest modulus over the (possibly complex) eigenvalues of `m`.
pub fn min_abs_eigenvalue(m: Matrix2) -> f64 {
    let half_trace = 0.5 * m.trace();
    let det = m.determinant();
    let disc = half_trace * half_trace - det;
    if disc >= 0.0 {
        let root = disc.sqrt();
        (half_trace + root).abs().min((half_trace - root).abs())
    } else {
        // Complex conjugate pair: both have modulus sqrt(det), and det > 0 here.
        det.sqrt()
    }
}

/// `sqrt(sum(entries²) / 2)`.
pub fn rms(m: Matrix2) -> f64 {
    ((m.a * m.a + m.b * m.b + m.c * m.c + m.d * m.d) / 2.0).sqrt()
}

/// `|M·(1, 0)|`.
pub fn x_unit_length(m: Matrix2) -> f64 {
    m.a.hypot(m.c)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/metric.rs"]
mod tests;
