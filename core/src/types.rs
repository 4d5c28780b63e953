use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::GameError;

/// Single coordinate axis used for the grid side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Remaining moves in a round.
pub type StepCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// One cell of movement. `Up` is towards `y = 0`, `Left` towards `x = 0`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Moves `coords` one cell, staying inside a square grid of side `size`.
    ///
    /// An axis that would leave the grid keeps its current value.
    pub fn apply_clamped(self, coords: Coord2, size: Coord) -> Coord2 {
        let (dx, dy) = self.delta();
        (
            clamp_axis(coords.0, dx, size),
            clamp_axis(coords.1, dy, size),
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

fn clamp_axis(value: Coord, delta: i8, size: Coord) -> Coord {
    let max = size.saturating_sub(1);
    value.saturating_add_signed(delta).min(max)
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|dir| {
                let name = dir.name();
                s.eq_ignore_ascii_case(name) || s.eq_ignore_ascii_case(&name[..1])
            })
            .ok_or(GameError::InvalidDirection)
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_one_cell_inside_grid() {
        assert_eq!(Direction::Up.apply_clamped((2, 2), 5), (2, 1));
        assert_eq!(Direction::Down.apply_clamped((2, 2), 5), (2, 3));
        assert_eq!(Direction::Left.apply_clamped((2, 2), 5), (1, 2));
        assert_eq!(Direction::Right.apply_clamped((2, 2), 5), (3, 2));
    }

    #[test]
    fn clamps_at_every_edge() {
        assert_eq!(Direction::Up.apply_clamped((3, 0), 5), (3, 0));
        assert_eq!(Direction::Left.apply_clamped((0, 3), 5), (0, 3));
        assert_eq!(Direction::Down.apply_clamped((1, 4), 5), (1, 4));
        assert_eq!(Direction::Right.apply_clamped((4, 1), 5), (4, 1));
    }

    #[test]
    fn single_cell_grid_never_moves() {
        for dir in Direction::ALL {
            assert_eq!(dir.apply_clamped((0, 0), 1), (0, 0));
        }
    }

    #[test]
    fn parses_names_and_initials() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!(" down ".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("l".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("Right".parse::<Direction>(), Ok(Direction::Right));
        assert_eq!("north".parse::<Direction>(), Err(GameError::InvalidDirection));
        assert_eq!("".parse::<Direction>(), Err(GameError::InvalidDirection));
    }
}
