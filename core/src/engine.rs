use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl RoundState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Read-only view of the parts of a round that change while playing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub position: Coord2,
    pub steps: StepCount,
    pub state: RoundState,
}

/// Grid, mines, player and step budget of the current round.
///
/// Moves are only accepted while the round is in progress and the budget set by the last dice roll is not spent.
/// Every accepted move costs one step, even one pushing against the grid edge.
#[derive(Clone, Debug)]
pub struct GridEngine {
    rng: SmallRng,
    mine_map: MineMap,
    position: Coord2,
    steps: StepCount,
    steps_taken: StepCount,
    state: RoundState,
    triggered_mine: Option<Coord2>,
}

impl GridEngine {
    /// Engine with a fresh round on the default grid, every later round derives its layout from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GameConfig::default())
    }

    pub fn with_config(seed: u64, config: GameConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let layout = RandomRoundGenerator::new(rng.random()).generate(config);
        Self::from_parts(rng, layout)
    }

    /// Engine over a known layout, used to replay or set up specific rounds.
    pub fn from_layout(mine_map: MineMap, start: Coord2) -> Result<Self> {
        let start = mine_map.validate_coords(start)?;
        if mine_map.contains_mine(start) {
            return Err(GameError::MinedStart);
        }

        Ok(Self::from_parts(
            SmallRng::seed_from_u64(0),
            RoundLayout { mine_map, start },
        ))
    }

    fn from_parts(rng: SmallRng, layout: RoundLayout) -> Self {
        Self {
            rng,
            mine_map: layout.mine_map,
            position: layout.start,
            steps: 0,
            steps_taken: 0,
            state: RoundState::InProgress,
            triggered_mine: None,
        }
    }

    /// Throws away the current round and starts over on a `grid_size` grid.
    ///
    /// The step budget is reset to zero, so [`set_step_budget`](Self::set_step_budget) has to be called before any
    /// move is accepted.
    pub fn new_round(&mut self, grid_size: Coord) -> RoundState {
        self.new_round_with(GameConfig::new(grid_size))
    }

    pub fn new_round_with(&mut self, config: GameConfig) -> RoundState {
        let seed = self.rng.random();
        self.install(RandomRoundGenerator::new(seed).generate(config))
    }

    /// New round with the current grid size.
    pub fn restart(&mut self) -> RoundState {
        self.new_round(self.size())
    }

    fn install(&mut self, layout: RoundLayout) -> RoundState {
        self.mine_map = layout.mine_map;
        self.position = layout.start;
        self.steps = 0;
        self.steps_taken = 0;
        self.state = RoundState::InProgress;
        self.triggered_mine = None;
        self.state
    }

    pub fn set_step_budget(&mut self, steps: StepCount) {
        log::debug!("Step budget set to {}", steps);
        self.steps = steps;
    }

    /// Moves the player one cell, returning the resulting round state.
    ///
    /// Calls on a finished round or without steps left leave everything untouched.
    pub fn step(&mut self, direction: Direction) -> RoundState {
        if let Err(err) = self.try_step(direction) {
            log::trace!("Ignored {} move: {}", direction, err);
        }
        self.state
    }

    /// Like [`step`](Self::step), but reports refused moves as errors.
    pub fn try_step(&mut self, direction: Direction) -> Result<StepOutcome> {
        self.check_in_progress()?;
        if self.steps == 0 {
            return Err(GameError::NoStepsLeft);
        }

        let next = direction.apply_clamped(self.position, self.size());
        let moved = next != self.position;
        self.position = next;
        self.steps -= 1;
        self.steps_taken = self.steps_taken.saturating_add(1);
        log::trace!(
            "Step {} to {:?}, steps left: {}",
            direction,
            next,
            self.steps
        );

        Ok(if self.mine_map.contains_mine(next) {
            self.triggered_mine = Some(next);
            self.end_round(false);
            StepOutcome::HitMine
        } else if self.steps == 0 {
            self.end_round(true);
            StepOutcome::Won
        } else if moved {
            StepOutcome::Moved
        } else {
            StepOutcome::Blocked
        })
    }

    pub fn current_state(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            steps: self.steps,
            state: self.state,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn position(&self) -> Coord2 {
        self.position
    }

    pub fn steps(&self) -> StepCount {
        self.steps
    }

    /// Accepted moves since the round started.
    pub fn steps_taken(&self) -> StepCount {
        self.steps_taken
    }

    pub fn size(&self) -> Coord {
        self.mine_map.size()
    }

    pub fn mine_map(&self) -> &MineMap {
        &self.mine_map
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    fn end_round(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won {
            RoundState::Won
        } else {
            RoundState::Lost
        };
        log::debug!(
            "Round ended {:?} at {:?} after {} steps",
            self.state,
            self.position,
            self.steps_taken
        );
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
