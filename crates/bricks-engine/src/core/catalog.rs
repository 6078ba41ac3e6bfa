use std::sync::Arc;

use rand::Rng;

use crate::{
    ConfigError,
    core::{
        cell::Palette,
        geometry::Position,
        piece::Piece,
        template::{ShapeDefinition, ShapeTemplate},
    },
};

/// Table of shape templates pieces are instantiated from.
///
/// Built once from an ordered list of [`ShapeDefinition`]s. Each definition
/// becomes a [`ShapeTemplate`] with its four rotations precomputed; pieces
/// share the template through a cheap handle.
///
/// # Example
///
/// ```
/// use bricks_engine::{Catalog, Palette, Position, default_shapes};
///
/// let catalog = Catalog::new(&default_shapes()).unwrap();
/// assert_eq!(catalog.count(), 7);
///
/// let piece = catalog.instantiate_random(Position::ORIGIN, &Palette::default(), &mut rand::rng());
/// assert!(piece.template_index() < catalog.count());
/// ```
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<Arc<ShapeTemplate>>,
}

impl Catalog {
    pub fn new(definitions: &[ShapeDefinition]) -> Result<Self, ConfigError> {
        if definitions.is_empty() {
            return Err(ConfigError::NoShapes);
        }
        let templates = definitions
            .iter()
            .enumerate()
            .map(|(index, def)| {
                def.parse()
                    .map(|base| Arc::new(ShapeTemplate::new(base)))
                    .map_err(|source| ConfigError::InvalidShape { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }

    /// Number of templates.
    #[must_use]
    pub fn count(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn template(&self, index: usize) -> Option<&ShapeTemplate> {
        self.templates.get(index).map(AsRef::as_ref)
    }

    pub fn templates(&self) -> impl Iterator<Item = &ShapeTemplate> {
        self.templates.iter().map(AsRef::as_ref)
    }

    /// Creates a piece from template `index` in rotation 0 at `spawn_position`.
    ///
    /// The color is drawn from `palette` independently of the template.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`Self::count`].
    pub fn instantiate<R>(
        &self,
        index: usize,
        spawn_position: Position,
        palette: &Palette,
        rng: &mut R,
    ) -> Piece
    where
        R: Rng + ?Sized,
    {
        assert!(
            index < self.templates.len(),
            "template index {index} out of range (catalog has {} templates)",
            self.templates.len()
        );
        let template = Arc::clone(&self.templates[index]);
        Piece::new(template, index, spawn_position, palette.pick(rng))
    }

    /// Like [`Self::instantiate`], with the template chosen uniformly at random.
    pub fn instantiate_random<R>(
        &self,
        spawn_position: Position,
        palette: &Palette,
        rng: &mut R,
    ) -> Piece
    where
        R: Rng + ?Sized,
    {
        let index = rng.random_range(0..self.templates.len());
        self.instantiate(index, spawn_position, palette, rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        ShapeDefinitionError,
        core::{cell::Color, piece::Rotation, template::default_shapes},
    };

    #[test]
    fn test_catalog_from_default_shapes() {
        let catalog = Catalog::new(&default_shapes()).unwrap();
        assert_eq!(catalog.count(), 7);
        for template in catalog.templates() {
            let r0 = template.matrix(Rotation::from_index(0));
            let r1 = template.matrix(Rotation::from_index(1));
            assert_eq!((r0.width(), r0.height()), (r1.height(), r1.width()));
        }
    }

    #[test]
    fn test_catalog_errors() {
        assert_eq!(Catalog::new(&[]).unwrap_err(), ConfigError::NoShapes);

        let defs = [ShapeDefinition::new(["**"]), ShapeDefinition::new(["*", "**"])];
        assert_eq!(
            Catalog::new(&defs).unwrap_err(),
            ConfigError::InvalidShape {
                index: 1,
                source: ShapeDefinitionError::RaggedRow {
                    row: 1,
                    expected: 1,
                    actual: 2
                }
            }
        );
    }

    #[test]
    fn test_instantiate() {
        let catalog = Catalog::new(&default_shapes()).unwrap();
        let palette = Palette::try_from(vec![Color::DARK_ORCHID]).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);

        let piece = catalog.instantiate(2, Position::new(3, 4), &palette, &mut rng);
        assert_eq!(piece.template_index(), 2);
        assert_eq!(piece.rotation(), Rotation::default());
        assert_eq!(piece.position(), Position::new(3, 4));
        assert_eq!(piece.color(), Color::DARK_ORCHID);
        assert_eq!(
            Some(piece.matrix()),
            catalog.template(2).map(|t| t.matrix(Rotation::default()))
        );
    }

    #[test]
    #[should_panic(expected = "template index 7 out of range")]
    fn test_instantiate_out_of_range() {
        let catalog = Catalog::new(&default_shapes()).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let _ = catalog.instantiate(7, Position::ORIGIN, &Palette::default(), &mut rng);
    }

    #[test]
    fn test_instantiate_random_covers_catalog() {
        let catalog = Catalog::new(&default_shapes()).unwrap();
        let palette = Palette::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen_templates = [false; 7];
        let mut seen_colors = Vec::new();
        for _ in 0..500 {
            let piece = catalog.instantiate_random(Position::ORIGIN, &palette, &mut rng);
            seen_templates[piece.template_index()] = true;
            if !seen_colors.contains(&piece.color()) {
                seen_colors.push(piece.color());
            }
        }
        assert!(seen_templates.iter().all(|seen| *seen));
        assert_eq!(seen_colors.len(), palette.colors().len());
    }

    #[test]
    fn test_single_template_catalog() {
        let catalog = Catalog::new(&[ShapeDefinition::new(["*"])]).unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let piece = catalog.instantiate_random(Position::ORIGIN, &Palette::default(), &mut rng);
        assert_eq!(piece.template_index(), 0);
    }
}
