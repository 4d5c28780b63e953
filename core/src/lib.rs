#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use dice::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod dice;
mod engine;
mod error;
mod generator;
mod types;
mod view;

/// Side length used when nothing else is requested.
pub const DEFAULT_GRID_SIZE: Coord = 5;

/// Upper bound on the nominal mine count, whatever the grid size.
pub const MAX_NOMINAL_MINES: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Square grid of side `size` with the nominal mine count `min(size² / 8, 10)`.
    pub fn new(size: Coord) -> Self {
        let size = size.clamp(1, Coord::MAX);
        Self::new_unchecked(size, nominal_mines(size))
    }

    /// Custom mine count, always leaving room for a safe starting cell.
    pub fn with_mines(size: Coord, mines: CellCount) -> Self {
        let size = size.clamp(1, Coord::MAX);
        let config = Self::new_unchecked(size, mines);
        Self::new_unchecked(size, mines.min(config.total_cells() - 1))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

pub const fn nominal_mines(size: Coord) -> CellCount {
    let per_area = mult(size, size) / 8;
    if per_area < MAX_NOMINAL_MINES {
        per_area
    } else {
        MAX_NOMINAL_MINES
    }
}

/// Square grid of "has mine" flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineMask")]
pub struct MineMap {
    mine_mask: Array2<bool>,
}

/// Unchecked wire form of [`MineMap`].
#[derive(Deserialize)]
struct MineMask {
    mine_mask: Array2<bool>,
}

impl TryFrom<MineMask> for MineMap {
    type Error = GameError;

    fn try_from(MineMask { mine_mask }: MineMask) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols || rows > usize::from(Coord::MAX) {
            return Err(GameError::InvalidGridShape);
        }
        Ok(Self { mine_mask })
    }
}

impl MineMap {
    pub fn empty(size: Coord) -> Self {
        Self {
            mine_mask: Array2::default((size, size).to_nd_index()),
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_map = Self::empty(size);

        for &coords in mine_coords {
            let coords = mine_map.validate_coords(coords)?;
            mine_map[coords] = true;
        }

        Ok(mine_map)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (size_x, size_y) = self.mine_mask.dim();
        if usize::from(coords.0) < size_x && usize::from(coords.1) < size_y {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.mine_mask.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    /// Number of distinct mined cells.
    pub fn mine_count(&self) -> CellCount {
        self.iter_mines().count().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count()
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells().filter(|&(_, mine)| mine).map(|(pos, _)| pos)
    }

    pub fn iter_safe_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells().filter(|&(_, mine)| !mine).map(|(pos, _)| pos)
    }

    fn iter_cells(&self) -> impl Iterator<Item = (Coord2, bool)> + '_ {
        self.mine_mask
            .indexed_iter()
            .map(|((x, y), &mine)| ((x as Coord, y as Coord), mine))
    }
}

impl Index<Coord2> for MineMap {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineMap {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

/// Outcome of a single accepted step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Moved to a safe cell, the round goes on.
    Moved,
    /// Pushed against the grid edge, a step was spent without moving.
    Blocked,
    HitMine,
    Won,
}

impl StepOutcome {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn nominal_mines_follow_area_with_cap() {
        assert_eq!(nominal_mines(1), 0);
        assert_eq!(nominal_mines(2), 0);
        assert_eq!(nominal_mines(3), 1);
        assert_eq!(nominal_mines(5), 3);
        assert_eq!(nominal_mines(8), 8);
        assert_eq!(nominal_mines(9), 10);
        assert_eq!(nominal_mines(Coord::MAX), 10);
    }

    #[test]
    fn config_clamps_size_and_mines() {
        assert_eq!(GameConfig::new(0), GameConfig::new_unchecked(1, 0));
        assert_eq!(GameConfig::default(), GameConfig::new_unchecked(5, 3));
        assert_eq!(GameConfig::with_mines(2, 9).mines, 3);
        assert_eq!(GameConfig::with_mines(1, 1).mines, 0);
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let map = MineMap::from_mine_coords(3, &[(1, 1), (1, 1), (0, 2)]).unwrap();

        assert_eq!(map.mine_count(), 2);
        assert_eq!(map.safe_cell_count(), 7);
        assert!(map.contains_mine((0, 2)));
        assert!(!map.contains_mine((2, 0)));
    }

    #[test]
    fn from_mine_coords_rejects_out_of_range() {
        assert_eq!(
            MineMap::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn iterates_mines_and_safe_cells() {
        let map = MineMap::from_mine_coords(2, &[(1, 0)]).unwrap();

        assert_eq!(map.iter_mines().collect::<Vec<_>>(), [(1, 0)]);
        assert_eq!(
            map.iter_safe_cells().collect::<Vec<_>>(),
            [(0, 0), (0, 1), (1, 1)]
        );
    }

    #[test]
    fn deserialize_rejects_non_square_map() {
        let json = r#"{"mine_mask":{"v":1,"dim":[3,1],"data":[false,false,false]}}"#;

        let err = serde_json::from_str::<MineMap>(json).unwrap_err();

        assert!(err.to_string().contains("square"));
    }

    #[test]
    fn serialized_map_reads_back() {
        let map = MineMap::from_mine_coords(3, &[(2, 1)]).unwrap();

        let json = serde_json::to_string(&map).unwrap();

        assert_eq!(serde_json::from_str::<MineMap>(&json).unwrap(), map);
    }

    #[test]
    fn validate_coords_checks_each_axis() {
        let map = MineMap::empty(2);

        assert_eq!(map.validate_coords((1, 1)), Ok((1, 1)));
        assert_eq!(map.validate_coords((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(map.validate_coords((0, 2)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn config_total_cells_is_area() {
        assert_eq!(GameConfig::new(5).total_cells(), 25);
        assert_eq!(GameConfig::new(Coord::MAX).total_cells(), 65025);
    }

    #[test]
    fn only_mine_and_win_end_the_round() {
        assert!(StepOutcome::HitMine.is_final());
        assert!(StepOutcome::Won.is_final());
        assert!(!StepOutcome::Moved.is_final());
        assert!(!StepOutcome::Blocked.is_final());
    }
}
