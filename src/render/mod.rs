//! Raster preview of recorded drawings.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{IfsError, IfsResult};

/// CPU rasterizer built on `vello_cpu`.
pub mod cpu;

pub use cpu::rasterize;

/// Largest edge, in pixels, the CPU surface accepts.
pub const MAX_RASTER_EDGE: u32 = u16::MAX as u32;

#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha colour at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        let rgba = Rgba8::rgba(px[0], px[1], px[2], px[3]);
        Some(if self.premultiplied {
            unpremultiply(rgba)
        } else {
            rgba
        })
    }

    /// Same frame with straight alpha.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            for px in self.data.chunks_exact_mut(4) {
                let c = unpremultiply(Rgba8::rgba(px[0], px[1], px[2], px[3]));
                px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
            }
            self.premultiplied = false;
        }
        self
    }
}

/// Raster target settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RasterOpts {
    pub width: u32,
    pub height: u32,
    /// Opaque fill painted before any stroke; transparent when `None`.
    pub background: Option<Rgba8>,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            background: Some(crate::foundation::core::palette::WHITE),
        }
    }
}

impl RasterOpts {
    pub fn square(edge: u32) -> Self {
        Self {
            width: edge,
            height: edge,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> IfsResult<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v == 0 || v > MAX_RASTER_EDGE {
                return Err(IfsError::render(format!(
                    "raster {name} must be in 1..={MAX_RASTER_EDGE}, got {v}"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn unpremultiply(c: Rgba8) -> Rgba8 {
    match c.a {
        0 => Rgba8::rgba(0, 0, 0, 0),
        255 => c,
        a => {
            let un =
                |v: u8| ((u32::from(v) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
            Rgba8::rgba(un(c.r), un(c.g), un(c.b), a)
        }
    }
}

/// Write `frame` as a straight-alpha PNG, creating parent directories.
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn save_png(frame: &FrameRGBA, path: &Path) -> IfsResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let straight = frame.clone().into_straight();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
