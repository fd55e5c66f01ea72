//! JSON configuration for whole fractal systems, and the built-in presets.

/// Build recipes into live systems.
pub mod build;
/// Recipe colour syntax.
pub mod colour;
/// Serde data model and validation.
pub mod model;
pub mod presets;

pub use build::Generated;
pub use model::Recipe;
