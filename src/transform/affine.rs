//! Affine transform helpers.

use std::ops::Mul;

use crate::foundation::core::{Affine, Vec2};
use crate::transform::matrix::Matrix2;

/// Affine map `v ↦ vector + matrix·v`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    /// Translation part.
    pub vector: Vec2,
    /// Linear part.
    pub matrix: Matrix2,
}

impl Transform {
    /// Transform from its parts.
    pub fn new(vector: Vec2, matrix: Matrix2) -> Self {
        Self { vector, matrix }
    }

    /// The identity transform.
    #[inline]
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, Matrix2::IDENTITY)
    }

    /// `self ∘ inner`: apply `inner` first, then `self`.
    ///
    /// Expanding a parent piece by a child uses `parent.compose(child)`.
    pub fn compose(self, inner: Transform) -> Transform {
        Transform {
            vector: self.vector + self.matrix.apply(inner.vector),
            matrix: self.matrix.compose(inner.matrix),
        }
    }

    /// Map a point given as a vector.
    pub fn apply(self, v: Vec2) -> Vec2 {
        self.vector + self.matrix.apply(v)
    }

    /// Equivalent kurbo affine.
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.vector) * self.matrix.to_affine()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.compose(rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
