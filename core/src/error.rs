use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine map must be a square grid of at most 255 cells a side")]
    InvalidGridShape,
    #[error("Invalid direction, expected one of up, down, left or right")]
    InvalidDirection,
    #[error("Starting position is on a mine")]
    MinedStart,
    #[error("Round already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("No steps left, roll the dice first")]
    NoStepsLeft,
    #[error("Die faces must be non-empty with positive values and weights")]
    InvalidDieFaces,
}

pub type Result<T> = core::result::Result<T, GameError>;
