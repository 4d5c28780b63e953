use crate::*;
pub use random::*;

mod random;

pub trait RoundGenerator {
    fn generate(self, config: GameConfig) -> RoundLayout;
}

/// Mines and starting cell of a freshly generated round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundLayout {
    pub mine_map: MineMap,
    pub start: Coord2,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StartCell {
    /// Uniformly random among the cells without a mine.
    Random,
    /// Pinned start, cleared of any mine that lands on it.
    Fixed(Coord2),
}
