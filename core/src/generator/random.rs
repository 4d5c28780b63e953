use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// Drops each mine on a uniformly random cell, the way the mine map has always been built: no attempt is made to avoid
/// cells that already hold a mine, so the effective count can fall short of the requested one.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomRoundGenerator {
    seed: u64,
    start_cell: StartCell,
}

impl RandomRoundGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_start(seed, StartCell::Random)
    }

    pub fn with_start(seed: u64, start_cell: StartCell) -> Self {
        Self { seed, start_cell }
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate(self, config: GameConfig) -> RoundLayout {
        let size = config.size.max(1);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_map = MineMap::empty(size);

        for _ in 0..config.mines {
            let coords = (rng.random_range(0..size), rng.random_range(0..size));
            mine_map[coords] = true;
        }

        let placed = mine_map.mine_count();
        if placed != config.mines {
            log::debug!(
                "Placed mines overlap, effective: {}, requested: {}",
                placed,
                config.mines
            );
        }

        let start = match self.start_cell {
            StartCell::Fixed((x, y)) => {
                let coords = (x.min(size - 1), y.min(size - 1));
                if mine_map[coords] {
                    log::debug!("Clearing mine under fixed start {:?}", coords);
                    mine_map[coords] = false;
                }
                coords
            }
            StartCell::Random => match mine_map.safe_cell_count() {
                0 => {
                    log::warn!("No safe cell left, clearing one for the start");
                    let coords = (rng.random_range(0..size), rng.random_range(0..size));
                    mine_map[coords] = false;
                    coords
                }
                safe => {
                    let pick = rng.random_range(0..safe);
                    mine_map
                        .iter_safe_cells()
                        .nth(pick.into())
                        .expect("pick is below the safe cell count")
                }
            },
        };

        log::debug!(
            "Generated {}x{} round, mines: {}, start: {:?}",
            size,
            size,
            mine_map.mine_count(),
            start
        );
        RoundLayout { mine_map, start }
    }
}
