//! Terrain map text format.
//!
//! Rows are separated by line breaks, cells by commas. A cell is a terrain code,
//! optionally preceded by a player number marking that player's starting tile:
//!
//! ```text
//! Gg, 1 Ke, Ww
//! Hh, Gg^Fp, Mm
//! ```

use std::{collections::HashMap, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::{grid::*, vec2::IVec2};

const CELL_SEPARATOR: &str = ",";

/// Player number of a starting position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Returns None for zero, player numbers start at one.
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub terrain: String,
    pub start: Option<PlayerId>,
}

impl Cell {
    pub fn new(terrain: impl Into<String>) -> Self {
        Self {
            terrain: terrain.into(),
            start: None,
        }
    }

    pub fn with_start(self, start: Option<PlayerId>) -> Self {
        Self { start, ..self }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.start {
            Some(player) => write!(f, "{} {}", player, self.terrain),
            None => write!(f, "{}", self.terrain),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("the map has no rows")]
    EmptyMap,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("empty cell at row {row}, column {col}")]
    EmptyTerrain { row: usize, col: usize },
    #[error("malformed cell {token:?} at row {row}, column {col}")]
    MalformedCell {
        row: usize,
        col: usize,
        token: String,
    },
    #[error("player {player} starts both at {first} and at {second}")]
    DuplicatePlayerMarker {
        player: PlayerId,
        first: IVec2,
        second: IVec2,
    },
}

/// Terrain grid plus where it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub grid: Grid<Cell>,
    pub origin: Option<PathBuf>,
}

impl Map {
    pub fn new(grid: Grid<Cell>) -> Self {
        Self { grid, origin: None }
    }

    pub fn with_origin(self, origin: PathBuf) -> Self {
        Self {
            origin: Some(origin),
            ..self
        }
    }

    pub fn parse(text: &str) -> Result<Map, FormatError> {
        parse_grid(text).map(Map::new)
    }

    /// Starting positions sorted by player.
    pub fn starts(&self) -> Vec<(PlayerId, IVec2)> {
        let mut starts: Vec<(PlayerId, IVec2)> = self
            .grid
            .iter()
            .filter_map(|(pos, cell)| cell.start.map(|player| (player, pos)))
            .collect();
        starts.sort_by_key(|(player, _)| *player);
        starts
    }
}

impl FromStr for Map {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Map::parse(s)
    }
}

impl Display for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serialize_grid(&self.grid))
    }
}

pub fn parse_grid(text: &str) -> Result<Grid<Cell>, FormatError> {
    let mut lines: Vec<&str> = text.lines().collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(FormatError::EmptyMap);
    }

    let expected = lines[0].split(CELL_SEPARATOR).count();
    let mut first_seen: HashMap<PlayerId, IVec2> = HashMap::new();
    let mut rows = Vec::with_capacity(lines.len());
    for (row, line) in lines.iter().enumerate() {
        let tokens: Vec<&str> = line.split(CELL_SEPARATOR).collect();
        if tokens.len() != expected {
            return Err(FormatError::RaggedRow {
                row,
                expected,
                found: tokens.len(),
            });
        }
        let mut cells = Vec::with_capacity(expected);
        for (col, token) in tokens.into_iter().enumerate() {
            let cell = parse_cell(token, row, col)?;
            if let Some(player) = cell.start {
                let pos = IVec2::new(col as i32, row as i32);
                if let Some(first) = first_seen.insert(player, pos) {
                    return Err(FormatError::DuplicatePlayerMarker {
                        player,
                        first,
                        second: pos,
                    });
                }
            }
            cells.push(cell);
        }
        rows.push(cells);
    }

    let grid = Grid::from_rows(rows).ok_or(FormatError::EmptyMap)?;
    tracing::trace!(target: "map", "parsed {} map, {} starts", grid.size, first_seen.len());
    Ok(grid)
}

fn parse_cell(token: &str, row: usize, col: usize) -> Result<Cell, FormatError> {
    let malformed = || FormatError::MalformedCell {
        row,
        col,
        token: token.to_string(),
    };
    let words: Vec<&str> = token.split_whitespace().collect();
    match words.as_slice() {
        [] => Err(FormatError::EmptyTerrain { row, col }),
        [terrain] => Ok(Cell::new(*terrain)),
        [player, terrain] => {
            let player = player
                .parse::<u32>()
                .ok()
                .and_then(PlayerId::new)
                .ok_or_else(malformed)?;
            Ok(Cell::new(*terrain).with_start(Some(player)))
        }
        _ => Err(malformed()),
    }
}

pub fn serialize_grid(grid: &Grid<Cell>) -> String {
    let mut s = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
        s += &line.join(CELL_SEPARATOR);
        s += "\n";
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v;

    fn player(id: u32) -> Option<PlayerId> {
        PlayerId::new(id)
    }

    #[test]
    fn parse_simple() {
        let grid = parse_grid("1 Gg,Ww\nHh,Mm\n").unwrap();
        assert_eq!(grid.size, v!(2, 2));
        assert_eq!(grid.get_at(&v!(0, 0)), &Cell::new("Gg").with_start(player(1)));
        assert_eq!(grid.get_at(&v!(1, 0)), &Cell::new("Ww"));
        assert_eq!(grid.get_at(&v!(0, 1)), &Cell::new("Hh"));
        assert_eq!(grid.get_at(&v!(1, 1)), &Cell::new("Mm"));
    }

    #[test]
    fn parse_trims_tokens_and_crlf() {
        let grid = parse_grid("  Gg ,  2 Ke\r\nGs^Fp , Ww  \r\n\r\n").unwrap();
        assert_eq!(grid.size, v!(2, 2));
        assert_eq!(grid.get_at(&v!(1, 0)), &Cell::new("Ke").with_start(player(2)));
        assert_eq!(grid.get_at(&v!(0, 1)), &Cell::new("Gs^Fp"));
    }

    #[test]
    fn parse_without_trailing_newline() {
        let grid = parse_grid("Gg,Ww").unwrap();
        assert_eq!(grid.size, v!(2, 1));
    }

    #[test]
    fn ragged_row() {
        assert_eq!(
            parse_grid("Gg,Ww\nHh,Mm,Ss\n"),
            Err(FormatError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn empty_map() {
        assert_eq!(parse_grid(""), Err(FormatError::EmptyMap));
        assert_eq!(parse_grid("\n\n  \n"), Err(FormatError::EmptyMap));
    }

    #[test]
    fn duplicate_marker_across_rows() {
        assert_eq!(
            parse_grid("3 Gg,Ww\nHh,3 Mm\n"),
            Err(FormatError::DuplicatePlayerMarker {
                player: PlayerId(3),
                first: v!(0, 0),
                second: v!(1, 1),
            })
        );
    }

    #[test]
    fn empty_and_malformed_cells() {
        assert_eq!(
            parse_grid("Gg,,Ww\n"),
            Err(FormatError::EmptyTerrain { row: 0, col: 1 })
        );
        assert!(matches!(
            parse_grid("Gg,x Ww\n"),
            Err(FormatError::MalformedCell { row: 0, col: 1, .. })
        ));
        assert!(matches!(
            parse_grid("0 Gg\n"),
            Err(FormatError::MalformedCell { .. })
        ));
        assert!(matches!(
            parse_grid("1 2 Gg\n"),
            Err(FormatError::MalformedCell { .. })
        ));
    }

    #[test]
    fn serialize_format() {
        let grid = parse_grid("1 Gg , Ww\nHh,Mm").unwrap();
        assert_eq!(serialize_grid(&grid), "1 Gg,Ww\nHh,Mm\n");
    }

    #[test]
    fn map_display_and_from_str() {
        let map: Map = "Gg,4 Ww\n".parse().unwrap();
        assert_eq!(map.to_string(), "Gg,4 Ww\n");
        assert_eq!(map.starts(), vec![(PlayerId(4), v!(1, 0))]);
    }
}
