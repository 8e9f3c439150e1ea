use serde::{Deserialize, Serialize};

use super::Position;

/// What occupies a single map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    /// Open ground, walkable and buildable
    Floor,
    /// Blocks movement and building
    Wall,
    /// Salvage cache, collected once by walking onto it
    Resource,
    /// Opens a moral dilemma every time it is entered
    Terminal,
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        !matches!(self, Tile::Wall)
    }

    pub fn is_buildable(&self) -> bool {
        matches!(self, Tile::Floor)
    }

    /// Single-character glyph for text rendering
    pub fn glyph(&self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::Resource => '*',
            Tile::Terminal => 'T',
        }
    }
}

/// The tile grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// A grid of one tile kind
    pub fn filled(width: usize, height: usize, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Tile at a position, `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Overwrite a tile; out-of-bounds writes are ignored
    pub fn set(&mut self, pos: Position, tile: Tile) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = tile;
        }
    }

    /// Pull a position back inside the grid
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, (self.width as i32 - 1).max(0)),
            pos.y.clamp(0, (self.height as i32 - 1).max(0)),
        )
    }

    /// Rows from top to bottom; an empty grid has none
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Positions of every tile of the given kind, row-major
    pub fn positions_of(&self, tile: Tile) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t == tile)
            .map(|(i, _)| Position::new((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }

    /// Render as one line of glyphs per row
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(Tile::glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
