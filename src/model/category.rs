use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }
}

/// Display styling associated with a category name. Both colors are
/// optional; an absent color means the view falls back to its defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryStyle {
    #[serde(default)]
    pub foreground: Option<Rgba>,
    #[serde(default)]
    pub background: Option<Rgba>,
}
