use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the presentation layer may show for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Player,
    Mine,
    TriggeredMine,
}

impl CellView {
    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Player => '@',
            Self::Mine => '*',
            Self::TriggeredMine => 'X',
        }
    }
}

impl GridEngine {
    /// Mines stay hidden until the round is lost.
    pub fn cell_view(&self, coords: Coord2) -> CellView {
        if self.triggered_mine() == Some(coords) {
            CellView::TriggeredMine
        } else if self.position() == coords {
            CellView::Player
        } else if self.state() == RoundState::Lost && self.mine_map().contains_mine(coords) {
            CellView::Mine
        } else {
            CellView::Hidden
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub snapshot: Snapshot,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_engine(engine: &GridEngine) -> Self {
        let size = engine.size();
        let cells = Array2::from_shape_fn((size, size).to_nd_index(), |(x, y)| {
            engine.cell_view((x as Coord, y as Coord))
        });

        Self {
            snapshot: engine.current_state(),
            cells,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // rows are y, columns are x
        let (size_x, size_y) = self.cells.dim();
        for y in 0..size_y {
            for x in 0..size_x {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.cells[[x, y]].symbol())?;
            }
            writeln!(f)?;
        }

        let Snapshot {
            position: (x, y),
            steps,
            state,
        } = self.snapshot;
        let status = match state {
            RoundState::InProgress => "in progress",
            RoundState::Won => "won",
            RoundState::Lost => "lost",
        };
        write!(f, "position ({x}, {y}), steps left {steps}, round {status}")
    }
}
