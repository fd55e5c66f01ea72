//! 2x2 linear maps and the symmetry-group constructors used by fractal recipes.

use std::ops::Mul;

use crate::foundation::core::{Affine, Vec2};
use crate::foundation::error::{IfsError, IfsResult};

/// Row-major 2x2 matrix `[a b; c d]`, applied to column vectors.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Matrix2 {
    /// Row 0, column 0.
    pub a: f64,
    /// Row 0, column 1.
    pub b: f64,
    /// Row 1, column 0.
    pub c: f64,
    /// Row 1, column 1.
    pub d: f64,
}

impl Default for Matrix2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix2 {
    /// The identity map.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Matrix from entries in row-major order.
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// The identity map.
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Uniform scale.
    pub fn scale(s: f64) -> Self {
        Self::new(s, 0.0, 0.0, s)
    }

    /// Axis-aligned, possibly non-uniform scale.
    pub fn diag(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy)
    }

    /// Counter-clockwise rotation by `degrees`, followed by uniform `scale`.
    pub fn rotate(degrees: f64, scale: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::new(c * scale, -s * scale, s * scale, c * scale)
    }

    /// Reflection negating the x coordinate (mirror in the y axis).
    pub fn reflect_x(scale: f64) -> Self {
        Self::diag(-scale, scale)
    }

    /// Reflection negating the y coordinate (mirror in the x axis).
    pub fn reflect_y(scale: f64) -> Self {
        Self::diag(scale, -scale)
    }

    /// Element `index` of the dihedral group of a regular `sides`-gon with a flat bottom edge.
    ///
    /// Indices `1..=sides` are rotations by `360/sides * (index - 1)` degrees
    /// counter-clockwise; `sides+1..=2*sides` apply [`Matrix2::reflect_x`] first and then
    /// the same rotations. `dihedral(n, 1, s)` is a plain scale.
    pub fn dihedral(sides: u32, index: u32, scale: f64) -> IfsResult<Self> {
        if sides < 2 {
            return Err(IfsError::geometry(format!(
                "dihedral group needs at least 2 sides, got {sides}"
            )));
        }
        let order = 2 * u64::from(sides);
        if index < 1 || u64::from(index) > order {
            return Err(IfsError::geometry(format!(
                "dihedral index must be in 1..={order}, got {index}"
            )));
        }
        Ok(Self::dihedral_element(sides, (index - 1) % sides, index > sides, scale))
    }

    /// Rotation `rotation_num` of `sides`, after [`Matrix2::reflect_x`] when `reflected`.
    ///
    /// `sides` must be non-zero.
    pub(crate) fn dihedral_element(
        sides: u32,
        rotation_num: u32,
        reflected: bool,
        scale: f64,
    ) -> Self {
        let rotation = Self::rotate(360.0 / f64::from(sides) * f64::from(rotation_num), scale);
        if reflected {
            rotation * Self::reflect_x(1.0)
        } else {
            rotation
        }
    }

    /// Apply to a column vector.
    pub fn apply(self, v: Vec2) -> Vec2 {
        Vec2::new(self.a * v.x + self.b * v.y, self.c * v.x + self.d * v.y)
    }

    /// Matrix product `self · other` (apply `other` first).
    pub fn compose(self, other: Self) -> Self {
        Self::new(
            self.a * other.a + self.b * other.c,
            self.a * other.b + self.b * other.d,
            self.c * other.a + self.d * other.c,
            self.c * other.b + self.d * other.d,
        )
    }

    /// Multiply every entry by `s`.
    pub fn scaled(self, s: f64) -> Self {
        Self::new(self.a * s, self.b * s, self.c * s, self.d * s)
    }

    /// Determinant.
    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Trace.
    pub fn trace(self) -> f64 {
        self.a + self.d
    }

    /// Angle in degrees of the image of the x unit vector, in `(-180, 180]`.
    pub fn angle_degrees(self) -> f64 {
        self.c.atan2(self.a).to_degrees()
    }

    /// Entries are all finite.
    pub fn is_finite(self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite()
    }

    /// Equivalent kurbo affine with zero translation.
    pub fn to_affine(self) -> Affine {
        Affine::new([self.a, self.c, self.b, self.d, 0.0, 0.0])
    }
}

impl Mul for Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: Matrix2) -> Matrix2 {
        self.compose(rhs)
    }
}

impl Mul<Vec2> for Matrix2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.apply(rhs)
    }
}

impl Mul<f64> for Matrix2 {
    type Output = Matrix2;

    fn mul(self, rhs: f64) -> Matrix2 {
        self.scaled(rhs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
