use crate::classify::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name recorded in an order when a category's color cannot be resolved.
pub const UNDEFINED_COLOR_NAME: &str = "undefined";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("invalid hex color '{0}': expected #RRGGBB")]
    InvalidHex(String),
}

/// 8-bit sRGB color written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitive.
    pub fn parse(text: &str) -> Result<Self, PaletteError> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidHex(text.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| PaletteError::InvalidHex(text.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    pub fn from_rgb(rgb: [f32; 3]) -> Self {
        let quantize = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(quantize(rgb[0]), quantize(rgb[1]), quantize(rgb[2]))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub hex: HexColor,
}

impl Swatch {
    pub fn new(name: &str, hex: HexColor) -> Self {
        Self {
            name: name.to_string(),
            hex,
        }
    }
}

/// Ordered set of named colors. Declaration order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    swatches: Vec<Swatch>,
}

impl Palette {
    pub fn new(swatches: Vec<Swatch>) -> Self {
        Self { swatches }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// First entry whose hex equals `hex`.
    pub fn name_for_hex(&self, hex: HexColor) -> Option<&str> {
        self.swatches
            .iter()
            .find(|swatch| swatch.hex == hex)
            .map(|swatch| swatch.name.as_str())
    }
}

/// Palettes for both coloring policies: one per category, plus a shared one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSet {
    pub chasis: Palette,
    pub buttons: Palette,
    pub knobs: Palette,
    pub shared: Palette,
}

impl PaletteSet {
    pub fn for_category(&self, category: Category) -> &Palette {
        match category {
            Category::Chasis => &self.chasis,
            Category::Buttons => &self.buttons,
            Category::Knobs => &self.knobs,
        }
    }

    pub fn shared(&self) -> &Palette {
        &self.shared
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        let palette = |entries: &[(&str, HexColor)]| {
            Palette::new(
                entries
                    .iter()
                    .map(|(name, hex)| Swatch::new(name, *hex))
                    .collect(),
            )
        };

        Self {
            chasis: palette(&[
                ("Rojo Metálico", HexColor::new(0xD0, 0x00, 0x00)),
                ("Negro Ónix", HexColor::new(0x1C, 0x1C, 0x1C)),
                ("Plata Pulida", HexColor::new(0x80, 0x80, 0x80)),
                ("Azul Eléctrico", HexColor::new(0x00, 0x77, 0xFF)),
                ("Morado", HexColor::new(0x6A, 0x0D, 0xAD)),
                ("Dorado", HexColor::new(0xFF, 0xD7, 0x00)),
            ]),
            buttons: palette(&[
                ("Negro Clásico", HexColor::new(0x1C, 0x1C, 0x1C)),
                ("Blanco Puro", HexColor::new(0xF5, 0xF5, 0xF5)),
                ("Rojo Fuego", HexColor::new(0xD0, 0x00, 0x00)),
                ("Amarillo", HexColor::new(0xFF, 0xD7, 0x00)),
                ("Verde", HexColor::new(0x1F, 0x7A, 0x1F)),
                ("Naranja", HexColor::new(0xFF, 0x73, 0x00)),
                ("Rosa", HexColor::new(0xFF, 0x00, 0x7F)),
            ]),
            knobs: palette(&[
                ("Negro Mate", HexColor::new(0x28, 0x28, 0x28)),
                ("Gris Oscuro", HexColor::new(0x42, 0x42, 0x42)),
                ("Gris Claro", HexColor::new(0x80, 0x80, 0x80)),
                ("Blanco", HexColor::new(0xF5, 0xF5, 0xF5)),
            ]),
            shared: palette(&[
                ("Rojo Metálico", HexColor::new(0xD0, 0x00, 0x00)),
                ("Negro Ónix", HexColor::new(0x1C, 0x1C, 0x1C)),
                ("Negro Mate", HexColor::new(0x28, 0x28, 0x28)),
                ("Gris Oscuro", HexColor::new(0x42, 0x42, 0x42)),
                ("Plata Pulida", HexColor::new(0x80, 0x80, 0x80)),
                ("Blanco Puro", HexColor::new(0xF5, 0xF5, 0xF5)),
                ("Azul Eléctrico", HexColor::new(0x00, 0x77, 0xFF)),
                ("Morado", HexColor::new(0x6A, 0x0D, 0xAD)),
                ("Dorado", HexColor::new(0xFF, 0xD7, 0x00)),
                ("Verde", HexColor::new(0x1F, 0x7A, 0x1F)),
                ("Naranja", HexColor::new(0xFF, 0x73, 0x00)),
                ("Rosa", HexColor::new(0xFF, 0x00, 0x7F)),
            ]),
        }
    }
}
