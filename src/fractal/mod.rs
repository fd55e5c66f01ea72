//! The definition / piece / system triad and its drivers.

/// Fractal definitions.
pub mod defn;
/// Hull fixed-point solver.
pub mod hull;
/// Abstract and concrete pieces, deferred values and progress intervals.
pub mod piece;
/// Definition arena, iteration driver and plot dispatch.
pub mod system;
