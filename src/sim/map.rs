//! Tile grid and map collision queries
//!
//! Cells are addressed `(x, y)` = (column, row). A cell's world rectangle is
//! `tile_size * (x, y)` with edge `tile_size`.

use std::collections::{BTreeSet, HashMap};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shape::{Rect, Shape};
use crate::consts::{COLLISION_LAYER, TILE_SIZE};
use crate::error::ConfigError;
use crate::patterns::BulletGroupDef;

/// Rune kind that blocks movement
pub const WALL: &str = "wall";

/// A single grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub rune: char,
    pub blocks: bool,
    pub bounds: Rect,
}

/// One layer of cells, stored row-major
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub rows: Vec<Vec<Cell>>,
}

impl Layer {
    /// `None` for any coordinate outside the layer
    pub fn cell(&self, x: i64, y: i64) -> Option<&Cell> {
        let row = self.rows.get(usize::try_from(y).ok()?)?;
        row.get(usize::try_from(x).ok()?)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Layered collision grid
#[derive(Debug, Clone)]
pub struct TileMap {
    tile_size: f32,
    layers: Vec<Layer>,
}

impl TileMap {
    pub fn new(tile_size: f32, layers: Vec<Layer>) -> Result<Self, ConfigError> {
        if !(tile_size > 0.0) || !tile_size.is_finite() {
            return Err(ConfigError::InvalidTileSize(tile_size));
        }
        if layers.is_empty() {
            return Err(ConfigError::EmptyMap);
        }
        Ok(Self { tile_size, layers })
    }

    /// Single-layer map from a grid of blocking flags (`grid[y][x]`)
    pub fn from_blocking(tile_size: f32, grid: &[Vec<bool>]) -> Result<Self, ConfigError> {
        let rows = grid
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .map(|(x, &blocks)| Cell {
                        rune: if blocks { '#' } else { '.' },
                        blocks,
                        bounds: cell_rect(tile_size, x, y),
                    })
                    .collect()
            })
            .collect();
        Self::new(tile_size, vec![Layer { rows }])
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// World-space extent of the collision layer
    pub fn world_size(&self) -> Vec2 {
        self.layers
            .get(COLLISION_LAYER)
            .map(|l| Vec2::new(l.width() as f32, l.height() as f32) * self.tile_size)
            .unwrap_or(Vec2::ZERO)
    }

    /// Nearest grid coordinate to a world position (rounded, not floored)
    pub fn nearest_cell(&self, pos: Vec2) -> (i64, i64) {
        let grid = pos / self.tile_size;
        (grid.x.round() as i64, grid.y.round() as i64)
    }

    /// Grid coordinate to world position of the cell's corner
    pub fn cell_to_world(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.tile_size
    }

    /// Probe the nearest cell and its eight neighbours for a blocking cell
    /// overlapping `shape`.
    ///
    /// Only cells adjacent to the shape's position are checked, so a shape
    /// larger than a tile can overlap walls further away without reporting it.
    pub fn collides(&self, shape: &Shape) -> bool {
        let Some(layer) = self.layers.get(COLLISION_LAYER) else {
            return false;
        };
        let (cx, cy) = self.nearest_cell(shape.position());

        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (cx.saturating_add(dx), cy.saturating_add(dy))))
            .filter_map(|(x, y)| layer.cell(x, y))
            .any(|cell| cell.blocks && shape.collides(&Shape::Rect(cell.bounds)))
    }
}

fn cell_rect(tile_size: f32, x: usize, y: usize) -> Rect {
    Rect::new(
        x as f32 * tile_size,
        y as f32 * tile_size,
        tile_size,
        tile_size,
    )
}

/// Placement of an actor in a map definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorDef {
    /// Actor type, e.g. "spawner"
    #[serde(rename = "type")]
    pub kind: String,
    /// Grid cell
    pub spawn: [i32; 2],
    /// Pattern override for spawners (stock loadout when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<BulletGroupDef>>,
}

/// Map file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDef {
    /// Falls back to the run configuration's tile size when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<f32>,
    /// Each layer is a list of rows; each character is a rune
    pub layers: Vec<Vec<String>>,
    /// Rune to kind ("wall", "floor", "empty", ...)
    #[serde(default)]
    pub rune_map: HashMap<String, String>,
    /// Player start cell
    #[serde(default)]
    pub start: [i32; 2],
    #[serde(default)]
    pub actors: Vec<ActorDef>,
}

impl MapDef {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tile size declared by the map, or `fallback`
    pub fn tile_size_or(&self, fallback: f32) -> f32 {
        self.tile_size.unwrap_or(fallback)
    }

    /// Build the collision grid with the declared (or default) tile size
    pub fn build(&self) -> Result<TileMap, ConfigError> {
        self.build_with_tile_size(TILE_SIZE)
    }

    /// Build the collision grid, using `fallback` when the map declares no
    /// tile size. Layers must be rectangular.
    pub fn build_with_tile_size(&self, fallback: f32) -> Result<TileMap, ConfigError> {
        let tile_size = self.tile_size_or(fallback);
        for rune in self.unmapped_runes() {
            log::warn!("Rune {:?} has no entry in the rune map", rune);
        }

        let mut layers = Vec::with_capacity(self.layers.len());
        for (li, rows) in self.layers.iter().enumerate() {
            let expected = rows.first().map(|r| r.chars().count()).unwrap_or(0);
            let mut cells = Vec::with_capacity(rows.len());
            for (y, row) in rows.iter().enumerate() {
                let found = row.chars().count();
                if found != expected {
                    return Err(ConfigError::RaggedLayer {
                        layer: li,
                        row: y,
                        expected,
                        found,
                    });
                }
                cells.push(
                    row.chars()
                        .enumerate()
                        .map(|(x, rune)| Cell {
                            rune,
                            blocks: self.rune_kind(rune) == Some(WALL),
                            bounds: cell_rect(tile_size, x, y),
                        })
                        .collect(),
                );
            }
            layers.push(Layer { rows: cells });
        }
        let map = TileMap::new(tile_size, layers)?;
        log::info!(
            "Built map: {} layers, {}x{} cells, tile {}",
            map.layer_count(),
            map.layers[0].width(),
            map.layers[0].height(),
            tile_size
        );
        Ok(map)
    }

    fn rune_kind(&self, rune: char) -> Option<&str> {
        let mut buf = [0u8; 4];
        self.rune_map
            .get(rune.encode_utf8(&mut buf) as &str)
            .map(String::as_str)
    }

    /// Distinct runes used in any layer but missing from the rune map
    pub fn unmapped_runes(&self) -> BTreeSet<char> {
        self.layers
            .iter()
            .flatten()
            .flat_map(|row| row.chars())
            .filter(|&rune| self.rune_kind(rune).is_none())
            .collect()
    }

    /// World position of the player start, using `fallback` when the map
    /// declares no tile size
    pub fn start_position(&self, fallback: f32) -> Vec2 {
        Vec2::new(self.start[0] as f32, self.start[1] as f32) * self.tile_size_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::shape::Circle;

    fn grid_with(blocking: &[(usize, usize)], w: usize, h: usize) -> TileMap {
        let mut grid = vec![vec![false; w]; h];
        for &(x, y) in blocking {
            grid[y][x] = true;
        }
        TileMap::from_blocking(16.0, &grid).unwrap()
    }

    fn circle(x: f32, y: f32, r: f32) -> Shape {
        Shape::Circle(Circle::new(Vec2::new(x, y), r))
    }

    #[test]
    fn test_probe_finds_neighbour_across_boundary() {
        let map = grid_with(&[(2, 3)], 6, 6);
        // Nearest cell (2, 2); reaches down into (2, 3)
        assert_eq!(map.nearest_cell(Vec2::new(34.0, 38.0)), (2, 2));
        assert!(map.collides(&circle(34.0, 38.0, 12.0)));
        // Same cell, too small to reach
        assert!(!map.collides(&circle(34.0, 38.0, 4.0)));
        assert!(!map.collides(&circle(0.0, 0.0, 4.0)));
    }

    #[test]
    fn test_nearest_cell_rounds() {
        let map = grid_with(&[], 4, 4);
        assert_eq!(map.nearest_cell(Vec2::new(23.0, 25.0)), (1, 2));
        assert_eq!(map.nearest_cell(Vec2::new(7.9, 8.0)), (0, 1));
    }

    #[test]
    fn test_probe_is_limited_to_three_by_three() {
        // A wall two cells away is missed even though the shape overlaps it
        let map = grid_with(&[(2, 0)], 4, 1);
        let big = circle(0.0, 0.0, 40.0);
        assert!(big.collides(&Shape::Rect(Rect::new(32.0, 0.0, 16.0, 16.0))));
        assert!(!map.collides(&big));
    }

    #[test]
    fn test_out_of_range_is_no_collision() {
        let map = grid_with(&[(0, 0)], 2, 2);
        assert!(!map.collides(&circle(-500.0, -500.0, 4.0)));
        assert!(!map.collides(&circle(1.0e9, 1.0e9, 4.0)));
        assert!(!map.collides(&circle(f32::MAX, f32::MIN, 4.0)));
        assert!(map.collides(&circle(-2.0, 8.0, 4.0)));
    }

    #[test]
    fn test_map_def_builds_walls_from_runes() {
        let def = MapDef::from_json(
            r#####"{
                "layers": [["####", "#..#", "####"], ["    ", "    ", "    "]],
                "runeMap": { "#": "wall", ".": "floor", " ": "empty" },
                "start": [1, 1],
                "actors": [{ "type": "spawner", "spawn": [2, 1] }]
            }"#####,
        )
        .unwrap();
        let map = def.build().unwrap();
        assert_eq!(map.layer_count(), 2);
        assert_eq!(map.world_size(), Vec2::new(64.0, 48.0));
        let layer = map.layer(0).unwrap();
        assert!(layer.cell(0, 0).unwrap().blocks);
        assert!(!layer.cell(1, 1).unwrap().blocks);
        assert_eq!(layer.cell(3, 2).unwrap().bounds, Rect::new(48.0, 32.0, 16.0, 16.0));
        assert!(layer.cell(4, 0).is_none());
        assert_eq!(def.start_position(TILE_SIZE), Vec2::new(16.0, 16.0));
        assert_eq!(def.actors[0].kind, "spawner");
    }

    #[test]
    fn test_unmapped_runes_are_collected_once() {
        let def = MapDef::from_json(
            r##"{ "layers": [["#??", "?.!"]], "runeMap": { "#": "wall", ".": "floor" } }"##,
        )
        .unwrap();
        assert_eq!(def.unmapped_runes().into_iter().collect::<Vec<_>>(), vec!['!', '?']);

        let map = def.build().unwrap();
        let layer = map.layer(0).unwrap();
        assert!(layer.cell(0, 0).unwrap().blocks);
        assert!(!layer.cell(1, 0).unwrap().blocks);
        assert!(!layer.cell(2, 1).unwrap().blocks);
    }

    #[test]
    fn test_declared_tile_size_beats_fallback() {
        let mut def = MapDef::from_json(r#"{ "layers": [["..", ".."]], "start": [1, 1] }"#).unwrap();
        assert_eq!(def.tile_size, None);
        assert_eq!(def.build_with_tile_size(32.0).unwrap().tile_size(), 32.0);
        assert_eq!(def.start_position(32.0), Vec2::new(32.0, 32.0));

        def.tile_size = Some(8.0);
        assert_eq!(def.build_with_tile_size(32.0).unwrap().tile_size(), 8.0);
        assert_eq!(def.start_position(32.0), Vec2::new(8.0, 8.0));
    }

    #[test]
    fn test_map_def_rejects_ragged_rows() {
        let def = MapDef {
            tile_size: Some(16.0),
            layers: vec![vec!["###".into(), "##".into()]],
            rune_map: HashMap::new(),
            start: [0, 0],
            actors: Vec::new(),
        };
        assert!(matches!(
            def.build(),
            Err(ConfigError::RaggedLayer { row: 1, expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_or_bad_tile_size() {
        assert!(matches!(TileMap::new(16.0, Vec::new()), Err(ConfigError::EmptyMap)));
        assert!(matches!(
            TileMap::from_blocking(0.0, &[vec![true]]),
            Err(ConfigError::InvalidTileSize(_))
        ));
    }
}
