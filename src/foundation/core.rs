use rand::SeedableRng as _;

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Index of a fractal definition inside a [`crate::FractalSystem`].
///
/// A fid is a weak reference: it is only ever looked up, never dereferenced directly.
pub type Fid = usize;

/// The single random stream consumed by generators, sorters and wobble effects.
pub type FractalRng = rand_pcg::Pcg64;

/// Build a seeded [`FractalRng`].
pub fn seeded_rng(seed: u64) -> FractalRng {
    FractalRng::seed_from_u64(seed)
}

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha multiplied by `factor` (clamped to `[0, 1]`).
    pub fn fade(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Premultiplied channels, as expected by raster surfaces.
    pub fn premultiplied(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }

    /// `rgba(r,g,b,alpha)` with alpha as a `0..1` float, as used by browser canvases.
    pub fn css(self) -> String {
        let alpha = f64::from(self.a) / 255.0;
        format!("rgba({},{},{},{alpha:.3})", self.r, self.g, self.b)
    }
}

/// Named colours used by presets and default colouring.
pub mod palette {
    use super::Rgba8;

    pub const BLACK: Rgba8 = Rgba8::rgb(0, 0, 0);
    pub const DARK_GREY: Rgba8 = Rgba8::rgb(64, 64, 64);
    pub const GREY: Rgba8 = Rgba8::rgb(128, 128, 128);
    pub const LIGHT_GREY: Rgba8 = Rgba8::rgb(196, 196, 196);
    pub const WHITE: Rgba8 = Rgba8::rgb(255, 255, 255);
    pub const RED: Rgba8 = Rgba8::rgb(255, 0, 0);
    pub const ORANGE: Rgba8 = Rgba8::rgb(255, 128, 0);
    pub const YELLOW: Rgba8 = Rgba8::rgb(255, 255, 0);
    pub const GREEN: Rgba8 = Rgba8::rgb(0, 255, 0);
    pub const CYAN: Rgba8 = Rgba8::rgb(0, 255, 255);
    pub const LIGHT_BLUE: Rgba8 = Rgba8::rgb(0, 128, 255);
    pub const BLUE: Rgba8 = Rgba8::rgb(0, 0, 255);
    pub const PURPLE: Rgba8 = Rgba8::rgb(128, 0, 255);
    pub const MAGENTA: Rgba8 = Rgba8::rgb(255, 0, 255);
    pub const PINK: Rgba8 = Rgba8::rgb(255, 0, 128);
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
