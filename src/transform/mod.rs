//! Shared transform types: 2x2 matrices, affine transforms and size metrics.

/// Affine (vector + matrix) transforms and their composition.
pub mod affine;
/// 2x2 matrices, rotations, reflections and dihedral groups.
pub mod matrix;
/// Scalar size metrics over transforms.
pub mod metric;
