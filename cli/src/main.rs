use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use minemap_core::{Coord, DEFAULT_GRID_SIZE, Die, GameConfig, GridEngine};

use crate::command::{Command, HELP};
use crate::session::{Flow, Session};

mod command;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum DiceKind {
    /// Fair six-sided die
    Standard,
    /// Shake-to-roll die reading 1, 1, 1, 4 or 3
    Shake,
}

#[derive(Parser, Debug)]
#[command(version, about = "Roll the die, then cross the mine map without stepping on a mine", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Side length of the square grid
    #[arg(short = 'n', long, default_value_t = DEFAULT_GRID_SIZE, value_parser = clap::value_parser!(u8).range(1..))]
    size: Coord,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Which die hands out the step budget
    #[arg(long, value_enum, default_value_t = DiceKind::Shake)]
    dice: DiceKind,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let engine = GridEngine::with_config(seed, GameConfig::new(args.size));
    // distinct stream for the die
    let die_seed = seed.rotate_left(32) ^ 0x9e37_79b9_7f4a_7c15;
    let die = match args.dice {
        DiceKind::Standard => Die::standard(die_seed),
        DiceKind::Shake => Die::shake_table(die_seed),
    };
    log::debug!(
        "die faces: {:?}",
        die.faces().iter().map(|face| face.value).collect::<Vec<_>>()
    );
    let mut session = Session::new(engine, die);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{HELP}\n")?;
    session.render(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        if session.apply(command, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    log::debug!(
        "Exiting after {} rolls, {} steps this round",
        session.die().rolls(),
        session.engine().steps_taken()
    );
    Ok(())
}
