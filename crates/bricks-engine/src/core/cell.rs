use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::EmptyPaletteError;

/// 24-bit RGB color of a cell.
///
/// Serialized as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("#{r:02x}{g:02x}{b:02x}")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const CRIMSON: Self = Self::rgb(0xdc, 0x14, 0x3c);
    pub const LIME_GREEN: Self = Self::rgb(0x32, 0xcd, 0x32);
    pub const CORNFLOWER_BLUE: Self = Self::rgb(0x64, 0x95, 0xed);
    pub const DARK_ORCHID: Self = Self::rgb(0x99, 0x32, 0xcc);
    pub const GOLD: Self = Self::rgb(0xff, 0xd7, 0x00);

    /// Border drawn around every brick.
    pub const BORDER: Self = Self::BLACK;

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex string.
    ///
    /// # Examples
    ///
    /// ```
    /// use bricks_engine::Color;
    ///
    /// assert_eq!(Color::from_hex("#ffd700"), Some(Color::GOLD));
    /// assert_eq!(Color::from_hex("ffd700"), None);
    /// ```
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid color '{s}', expected '#rrggbb'"))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color),
}

impl Cell {
    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(color) => Some(color),
        }
    }
}

/// Non-empty set of colors new pieces are painted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::CRIMSON,
                Color::LIME_GREEN,
                Color::CORNFLOWER_BLUE,
                Color::DARK_ORCHID,
                Color::GOLD,
            ],
        }
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = EmptyPaletteError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        if colors.is_empty() {
            return Err(EmptyPaletteError);
        }
        Ok(Self { colors })
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Palette {
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Picks a color uniformly at random.
    pub fn pick<R>(&self, rng: &mut R) -> Color
    where
        R: Rng + ?Sized,
    {
        self.colors[rng.random_range(0..self.colors.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        assert_eq!(Color::CRIMSON.to_string(), "#dc143c");
        assert_eq!("#6495ed".parse::<Color>(), Ok(Color::CORNFLOWER_BLUE));
        assert_eq!("#6495ED".parse::<Color>(), Ok(Color::CORNFLOWER_BLUE));
    }

    #[test]
    fn test_color_parse_errors() {
        assert!("".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#1234567".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("dc143c".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn test_palette_serialization() {
        let json = serde_json::to_string(&Palette::default()).unwrap();
        assert_eq!(
            json,
            r##"["#dc143c","#32cd32","#6495ed","#9932cc","#ffd700"]"##
        );
        let palette: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(serde_json::from_str::<Palette>("[]").is_err());
        assert_eq!(Palette::try_from(vec![]), Err(EmptyPaletteError));
    }

    #[test]
    fn test_palette_pick_stays_in_palette() {
        let palette = Palette::try_from(vec![Color::GOLD, Color::CRIMSON]).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let color = palette.pick(&mut rng);
            assert!(palette.colors().contains(&color));
        }
    }

    #[test]
    fn test_cell_color() {
        assert_eq!(Cell::Empty.color(), None);
        assert_eq!(Cell::Occupied(Color::GOLD).color(), Some(Color::GOLD));
        assert!(Cell::default().is_empty());
    }
}
