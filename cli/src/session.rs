use std::io::Write;

use minemap_core::{BoardView, GridEngine, StepOutcome, StepSource, roll_into};

use crate::command::{Command, HELP};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal front end holding the engine and the die that feeds it.
pub struct Session<S> {
    engine: GridEngine,
    die: S,
}

impl<S: StepSource> Session<S> {
    pub fn new(engine: GridEngine, die: S) -> Self {
        Self { engine, die }
    }

    pub fn engine(&self) -> &GridEngine {
        &self.engine
    }

    pub fn die(&self) -> &S {
        &self.die
    }

    /// Applies one command and re-renders the board.
    pub fn apply(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        log::debug!("command: {:?}", command);

        match command {
            Command::Move(direction) => match self.engine.try_step(direction) {
                Ok(outcome) if outcome.is_final() => {
                    log::debug!("round finished: {:?}", outcome);
                    self.announce(outcome, out)?;
                }
                Ok(StepOutcome::Blocked) => writeln!(out, "Bumped into the edge of the map.")?,
                Ok(_) => {}
                Err(err) => writeln!(out, "{err}.")?,
            },
            Command::Roll => {
                let steps = roll_into(&mut self.die, &mut self.engine);
                writeln!(out, "Dice rolled: {steps}")?;
            }
            Command::Budget(steps) => self.engine.set_step_budget(steps),
            Command::Restart => {
                self.engine.restart();
                writeln!(out, "New round, roll the dice to get moving.")?;
            }
            Command::State => {
                serde_json::to_writer(&mut *out, &self.engine.current_state())?;
                writeln!(out)?;
                return Ok(Flow::Continue);
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        self.render(out)?;
        Ok(Flow::Continue)
    }

    fn announce(&self, outcome: StepOutcome, out: &mut impl Write) -> anyhow::Result<()> {
        match outcome {
            StepOutcome::HitMine => writeln!(
                out,
                "Game over! You stepped on a mine. Type restart to play again."
            )?,
            StepOutcome::Won => {
                writeln!(out, "Congratulations! You won the game by avoiding mines!")?
            }
            _ => {}
        }
        Ok(())
    }

    pub fn render(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", BoardView::from_engine(&self.engine))?;
        Ok(())
    }
}
