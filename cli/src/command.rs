use anyhow::{Context, bail};
use minemap_core::{Direction, StepCount};
use std::str::FromStr;

pub const HELP: &str = "\
commands:
  up | down | left | right   move one cell (u, d, l, r also work)
  roll                       roll the die for a new step budget
  budget <n>                 set the step budget directly
  restart                    new round on the same grid size
  state                      print the round snapshot as JSON
  help                       show this text
  quit                       leave the game";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Move(Direction),
    Roll,
    Budget(StepCount),
    Restart,
    State,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            bail!("empty command");
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "roll" => Self::Roll,
            "budget" => {
                let steps = words.next().context("budget needs a number of steps")?;
                Self::Budget(
                    steps
                        .parse::<StepCount>()
                        .with_context(|| format!("not a step count: {steps}"))?,
                )
            }
            "restart" => Self::Restart,
            "state" => Self::State,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Move(
                head.parse::<Direction>()
                    .with_context(|| format!("unknown command: {head}"))?,
            ),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument: {extra}");
        }
        Ok(command)
    }
}
