//! Pluggable behaviour: iteration predicates, colouring, plotting, sorting and generators.

/// Colour functions and the gradient lookup they share.
pub mod colour;
/// Child-list and deferred-value generators.
pub mod generator;
/// Iteration predicates.
pub mod iteration;
/// Inward offsetting and spiral fills.
pub mod path;
/// Plot functions and per-definition plotters.
pub mod plot;
/// Scalar transform properties.
pub mod property;
/// Draw-order sorters.
pub mod sort;
