use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Catalog, PREVIEW_SIZE, Palette, Piece, Position};

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the generator that picks piece shapes and colors. The
/// same seed with the same configuration yields the same sequence of pieces.
/// Written as 32 hex digits, both in JSON and on the command line.
///
/// # Example
///
/// ```
/// use bricks_engine::GameSeed;
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
/// let parsed: GameSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for GameSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for GameSeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                s.len()
            ));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| format!("invalid hex: {s} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `GameSeed` values with `rng.random()`.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

/// Produces pieces and keeps the one queued after the falling piece.
///
/// The queued piece is centered in the
/// [`PREVIEW_SIZE`]×[`PREVIEW_SIZE`] preview area. Shapes are picked
/// uniformly from the catalog and colors uniformly from the palette.
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: Pcg32,
    catalog: Catalog,
    palette: Palette,
    next: Piece,
}

impl PieceSpawner {
    /// Creates a spawner with a random seed.
    #[must_use]
    pub fn new(catalog: Catalog, palette: Palette) -> Self {
        Self::with_seed(catalog, palette, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic generation.
    #[must_use]
    pub fn with_seed(catalog: Catalog, palette: Palette, seed: GameSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = preview_piece(&catalog, &palette, &mut rng);
        Self {
            rng,
            catalog,
            palette,
            next,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The queued piece, positioned in preview coordinates.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next
    }

    /// Takes the queued piece and queues a freshly generated one.
    pub fn pop_next(&mut self) -> Piece {
        let fresh = preview_piece(&self.catalog, &self.palette, &mut self.rng);
        std::mem::replace(&mut self.next, fresh)
    }

    /// Discards the queued piece and generates a new one.
    pub fn reset_queue(&mut self) {
        self.next = preview_piece(&self.catalog, &self.palette, &mut self.rng);
    }
}

fn preview_piece(catalog: &Catalog, palette: &Palette, rng: &mut Pcg32) -> Piece {
    let mut piece = catalog.instantiate_random(Position::ORIGIN, palette, rng);
    let centered = piece
        .center_axis_x(PREVIEW_SIZE)
        .and_then(|()| piece.center_axis_y(PREVIEW_SIZE));
    debug_assert!(centered.is_ok(), "preview size is a valid axis length");
    piece
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::default_shapes;

    fn spawner(seed: GameSeed) -> PieceSpawner {
        let catalog = Catalog::new(&default_shapes()).unwrap();
        PieceSpawner::with_seed(catalog, Palette::default(), seed)
    }

    fn kinds(spawner: &mut PieceSpawner, n: usize) -> Vec<(usize, String)> {
        (0..n)
            .map(|_| {
                let piece = spawner.pop_next();
                (piece.template_index(), piece.color().to_string())
            })
            .collect()
    }

    mod game_seed {
        use super::*;

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = GameSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            let deserialized: GameSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: GameSeed = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF".parse().unwrap();
            assert_eq!(seed, GameSeed::from_bytes([0xFF; 16]));
        }

        #[test]
        fn test_parse_errors() {
            for input in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
            ] {
                let err = input.parse::<GameSeed>().unwrap_err();
                assert!(err.contains("invalid hex"), "{input:?}: {err}");
                assert!(serde_json::from_str::<GameSeed>(&format!("\"{input}\"")).is_err());
            }
        }
    }

    #[test]
    fn test_deterministic_sequence() {
        let seed: GameSeed = rand::rng().random();
        let mut a = spawner(seed);
        let mut b = spawner(seed);
        assert_eq!(kinds(&mut a, 30), kinds(&mut b, 30));
    }

    #[test]
    fn test_pop_next_returns_queued_piece() {
        let mut spawner = spawner(GameSeed::from_bytes([7; 16]));
        for _ in 0..10 {
            let queued = spawner.next_piece().clone();
            assert_eq!(spawner.pop_next(), queued);
        }
    }

    #[test]
    fn test_queued_piece_is_centered_in_preview() {
        let mut spawner = spawner(GameSeed::from_bytes([3; 16]));
        for _ in 0..20 {
            let piece = spawner.pop_next();
            let expected_x = 2 - i32::try_from(piece.width() / 2).unwrap();
            let expected_y = 2 - i32::try_from(piece.height() / 2).unwrap();
            assert_eq!(piece.position(), Position::new(expected_x, expected_y));
            for (row, col) in piece.cells() {
                assert!((0..4).contains(&row) && (0..4).contains(&col));
            }
        }
    }

    #[test]
    fn test_reset_queue_replaces_next_piece() {
        let mut a = spawner(GameSeed::from_bytes([9; 16]));
        let mut b = spawner(GameSeed::from_bytes([9; 16]));
        a.reset_queue();
        b.pop_next();
        assert_eq!(a.next_piece(), b.next_piece());
    }
}
