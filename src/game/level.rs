// ASCII level maps

use crate::engine::physics::TileGrid;
use glam::{IVec2, Vec2};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Edge length of a map tile in pixels
pub const TILE_SIZE: f32 = 16.0;

/// Built-in map used when no level file is given
pub const DEMO_LEVEL: &str = "\
#..............................#
#..............................#
#..............................#
#..............................#
#.......................S......#
#...................#######....#
#..............................#
#..P.......S...........S.......#
################....############
";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    #[error("Level has no rows")]
    Empty,

    #[error("Level has no player spawn")]
    MissingPlayerSpawn,

    #[error("Level has more than one player spawn (second at row {row}, column {column})")]
    DuplicatePlayerSpawn { row: usize, column: usize },

    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Unknown tile '{glyph}' at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
}

/// A parsed map: solid tiles plus spawn points
///
/// Glyphs: `#` solid, `.` or space empty, `P` player spawn, `S` slime spawn.
#[derive(Debug, Clone)]
pub struct Level {
    tiles: TileGrid,
    player_spawn: Vec2,
    slime_spawns: Vec<Vec2>,
    width: usize,
    height: usize,
}

impl Level {
    /// Read and parse a level file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let level: Level = text.parse()?;
        Ok(level)
    }

    pub fn demo() -> Result<Self, LevelError> {
        DEMO_LEVEL.parse()
    }

    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    pub fn player_spawn(&self) -> Vec2 {
        self.player_spawn
    }

    pub fn slime_spawns(&self) -> &[Vec2] {
        &self.slime_spawns
    }

    /// Size in tiles
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

fn tile_origin(column: usize, row: usize) -> Vec2 {
    Vec2::new(column as f32, row as f32) * TILE_SIZE
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|row| row.chars().count()).ok_or(LevelError::Empty)?;

        let mut tiles = TileGrid::new(TILE_SIZE);
        let mut player_spawn = None;
        let mut slime_spawns = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for (column, glyph) in line.chars().enumerate() {
                match glyph {
                    '#' => tiles.insert(IVec2::new(column as i32, row as i32)),
                    '.' | ' ' => {}
                    'P' => {
                        if player_spawn.is_some() {
                            return Err(LevelError::DuplicatePlayerSpawn { row, column });
                        }
                        player_spawn = Some(tile_origin(column, row));
                    }
                    'S' => slime_spawns.push(tile_origin(column, row)),
                    glyph => return Err(LevelError::UnknownGlyph { glyph, row, column }),
                }
            }
        }

        Ok(Self {
            tiles,
            player_spawn: player_spawn.ok_or(LevelError::MissingPlayerSpawn)?,
            slime_spawns,
            width,
            height: rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::TileQuery;

    #[test]
    fn test_demo_level_parses() {
        let level = Level::demo().unwrap();
        assert_eq!(level.size(), (32, 9));
        assert_eq!(level.player_spawn(), Vec2::new(48.0, 112.0));
        assert_eq!(level.slime_spawns().len(), 3);
        assert!(level.tiles().is_solid_point(Vec2::new(1.0, 130.0)));
        assert!(!level.tiles().is_solid_point(Vec2::new(16.0 * 17.0, 130.0)), "gap");
    }

    #[test]
    fn test_missing_player() {
        let err = "##\n..\n".parse::<Level>().unwrap_err();
        assert_eq!(err, LevelError::MissingPlayerSpawn);
    }

    #[test]
    fn test_ragged_row() {
        let err = "P..\n##\n".parse::<Level>().unwrap_err();
        assert_eq!(
            err,
            LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_unknown_glyph() {
        let err = "P?\n".parse::<Level>().unwrap_err();
        assert!(matches!(err, LevelError::UnknownGlyph { glyph: '?', .. }));
        assert_eq!(err.to_string(), "Unknown tile '?' at row 0, column 1");
    }

    #[test]
    fn test_duplicate_player() {
        let err = "P.P\n".parse::<Level>().unwrap_err();
        assert_eq!(err, LevelError::DuplicatePlayerSpawn { row: 0, column: 2 });
    }

    #[test]
    fn test_empty() {
        assert_eq!("\n\n".parse::<Level>().unwrap_err(), LevelError::Empty);
    }
}
