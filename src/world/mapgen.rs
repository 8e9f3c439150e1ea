//! Procedural map generation.
//!
//! Generation runs in three passes over one RNG stream: fill each cell with
//! wall or floor, sprinkle salvage over the remaining floor, then force a
//! single terminal at a drawn coordinate. The terminal overwrites whatever is
//! there, wall and salvage included.

use tracing::{debug, trace};

use super::{Grid, Position, Tile};
use crate::config::MapConfig;
use crate::rng::SeededRng;

impl Grid {
    /// Generate the standard 24x16 map for a seed
    pub fn generate(seed: u32) -> Self {
        Self::generate_with(seed, &MapConfig::default())
    }

    /// Generate a map with custom dimensions and probabilities
    pub fn generate_with(seed: u32, config: &MapConfig) -> Self {
        let mut rng = SeededRng::new(seed);
        let mut grid = Grid::filled(config.width, config.height, Tile::Floor);

        for y in 0..config.height as i32 {
            for x in 0..config.width as i32 {
                if rng.chance(config.wall_probability) {
                    grid.set(Position::new(x, y), Tile::Wall);
                }
            }
        }

        for y in 0..config.height as i32 {
            for x in 0..config.width as i32 {
                let pos = Position::new(x, y);
                if grid.get(pos) == Some(Tile::Floor) && rng.chance(config.resource_probability) {
                    grid.set(pos, Tile::Resource);
                }
            }
        }

        let row = rng.index(config.height) as i32;
        let col = rng.index(config.width) as i32;
        grid.set(Position::new(col, row), Tile::Terminal);

        debug!(
            "Generated {}x{} map for seed {}: {} walls, {} caches, terminal at ({}, {})",
            config.width,
            config.height,
            seed,
            grid.count(Tile::Wall),
            grid.count(Tile::Resource),
            col,
            row
        );
        trace!("\n{}", grid.to_text());

        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_map() {
        for seed in [0, 1, 42, 12345, u32::MAX] {
            assert_eq!(Grid::generate(seed), Grid::generate(seed));
        }
    }

    #[test]
    fn test_dimensions_and_single_terminal() {
        for seed in 0..200 {
            let grid = Grid::generate(seed);
            assert_eq!(grid.width(), 24);
            assert_eq!(grid.height(), 16);
            assert_eq!(grid.count(Tile::Terminal), 1, "seed {}", seed);
        }
    }

    #[test]
    fn test_known_layout() {
        let grid = Grid::generate(42);
        assert_eq!(grid.positions_of(Tile::Terminal), vec![Position::new(8, 1)]);
        assert_eq!(grid.count(Tile::Wall), 29);
        assert_eq!(grid.count(Tile::Resource), 26);
        assert_eq!(grid.get(Position::new(2, 2)), Some(Tile::Wall));

        let grid = Grid::generate(12345);
        assert_eq!(grid.positions_of(Tile::Terminal), vec![Position::new(0, 12)]);
        assert_eq!(grid.count(Tile::Wall), 39);
        assert_eq!(grid.count(Tile::Resource), 20);
    }

    #[test]
    fn test_terminal_may_replace_wall() {
        // Replay the wall pass: cell (19, 6) is draw 6 * 24 + 19
        let config = MapConfig::default();
        let mut rng = SeededRng::new(17);
        let walls: Vec<bool> = (0..config.width * config.height)
            .map(|_| rng.chance(config.wall_probability))
            .collect();
        assert!(walls[6 * config.width + 19]);

        let grid = Grid::generate(17);
        assert_eq!(grid.positions_of(Tile::Terminal), vec![Position::new(19, 6)]);
        assert_eq!(grid.get(Position::new(19, 6)), Some(Tile::Terminal));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(Grid::generate(1), Grid::generate(2));
    }

    #[test]
    fn test_custom_size() {
        let config = MapConfig {
            width: 5,
            height: 3,
            wall_probability: 0.0,
            resource_probability: 0.0,
        };
        let grid = Grid::generate_with(9, &config);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count(Tile::Floor), 14);
        assert_eq!(grid.count(Tile::Terminal), 1);
    }
}
