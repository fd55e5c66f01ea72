use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgba8, palette};

/// Colour as written in recipes.
///
/// Accepts `"#RRGGBB"`, `"#RRGGBBAA"`, a palette name such as `"light_blue"`,
/// `[r, g, b]` / `[r, g, b, a]` with 0..=255 channels, or `{ "r", "g", "b", "a"? }`.
/// Always serializes as a hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColourDef(pub Rgba8);

impl From<Rgba8> for ColourDef {
    fn from(c: Rgba8) -> Self {
        Self(c)
    }
}

impl From<ColourDef> for Rgba8 {
    fn from(c: ColourDef) -> Self {
        c.0
    }
}

impl Serialize for ColourDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&to_hex(self.0))
    }
}

impl<'de> Deserialize<'de> for ColourDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => parse_colour(&s).map(Self).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Self(Rgba8::rgba(r, g, b, a))),
            Repr::Arr(v) => match v[..] {
                [r, g, b] => Ok(Self(Rgba8::rgb(r, g, b))),
                [r, g, b, a] => Ok(Self(Rgba8::rgba(r, g, b, a))),
                _ => Err(serde::de::Error::custom(
                    "colour array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

pub fn to_hex(c: Rgba8) -> String {
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

/// Parse a hex colour or palette name.
pub fn parse_colour(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    if let Some(c) = named(s) {
        return Ok(c);
    }
    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.is_ascii() {
        return Err(format!("unknown colour \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match hex.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
            hex_byte(&hex[6..8])?,
        )),
        _ => Err(format!(
            "unknown colour \"{s}\": expected #RRGGBB, #RRGGBBAA or a palette name"
        )),
    }
}

fn named(name: &str) -> Option<Rgba8> {
    let c = match name.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
        "black" => palette::BLACK,
        "dark_grey" | "dark_gray" => palette::DARK_GREY,
        "grey" | "gray" => palette::GREY,
        "light_grey" | "light_gray" => palette::LIGHT_GREY,
        "white" => palette::WHITE,
        "red" => palette::RED,
        "orange" => palette::ORANGE,
        "yellow" => palette::YELLOW,
        "green" => palette::GREEN,
        "cyan" => palette::CYAN,
        "light_blue" => palette::LIGHT_BLUE,
        "blue" => palette::BLUE,
        "purple" => palette::PURPLE,
        "magenta" => palette::MAGENTA,
        "pink" => palette::PINK,
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/recipe/colour.rs"]
mod tests;
