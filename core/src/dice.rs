use alloc::vec::Vec;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Anything that can hand out a step budget for the next round.
pub trait StepSource {
    /// Always at least one.
    fn roll(&mut self) -> StepCount;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieFace {
    pub value: StepCount,
    pub weight: u32,
}

impl DieFace {
    pub const fn new(value: StepCount, weight: u32) -> Self {
        Self { value, weight }
    }
}

/// Values read off the shaken die for each of its five resting orientations.
pub const SHAKE_ORIENTATIONS: [StepCount; 5] = [1, 1, 1, 4, 3];

/// Seeded die over a weighted face table.
#[derive(Clone, Debug)]
pub struct Die {
    rng: SmallRng,
    faces: Vec<DieFace>,
    total_weight: u32,
    rolls: u32,
}

impl Die {
    pub fn with_faces(seed: u64, faces: Vec<DieFace>) -> Result<Self> {
        if faces.is_empty() || faces.iter().any(|face| face.value == 0 || face.weight == 0) {
            return Err(GameError::InvalidDieFaces);
        }
        let total_weight = faces
            .iter()
            .try_fold(0u32, |sum, face| sum.checked_add(face.weight))
            .ok_or(GameError::InvalidDieFaces)?;

        Ok(Self {
            rng: SmallRng::seed_from_u64(seed),
            faces,
            total_weight,
            rolls: 0,
        })
    }

    /// Fair six-sided die.
    pub fn standard(seed: u64) -> Self {
        Self::from_valid_faces(seed, (1..=6).map(|value| DieFace::new(value, 1)).collect())
    }

    /// The die of the shake-to-roll screen, every orientation equally likely.
    pub fn shake_table(seed: u64) -> Self {
        Self::from_valid_faces(
            seed,
            SHAKE_ORIENTATIONS
                .into_iter()
                .map(|value| DieFace::new(value, 1))
                .collect(),
        )
    }

    fn from_valid_faces(seed: u64, faces: Vec<DieFace>) -> Self {
        let total_weight = faces.iter().map(|face| face.weight).sum();
        Self {
            rng: SmallRng::seed_from_u64(seed),
            faces,
            total_weight,
            rolls: 0,
        }
    }

    pub fn faces(&self) -> &[DieFace] {
        &self.faces
    }

    /// How many times this die has been rolled.
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    fn face_for(&self, roll: u32) -> StepCount {
        let mut cumulative = 0;
        for face in &self.faces {
            cumulative += face.weight;
            if roll < cumulative {
                return face.value;
            }
        }
        // unreachable while roll < total_weight
        self.faces.last().map_or(1, |face| face.value)
    }
}

impl StepSource for Die {
    fn roll(&mut self) -> StepCount {
        let roll = self.rng.random_range(0..self.total_weight);
        let value = self.face_for(roll);
        self.rolls = self.rolls.saturating_add(1);
        log::debug!("Die roll #{}: {}", self.rolls, value);
        value
    }
}

/// Rolls `source` and uses the result as the engine's step budget.
pub fn roll_into<S: StepSource + ?Sized>(source: &mut S, engine: &mut GridEngine) -> StepCount {
    let steps = source.roll();
    engine.set_step_budget(steps);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn standard_die_stays_in_range() {
        let mut die = Die::standard(5);
        let mut seen = [false; 7];

        for _ in 0..600 {
            let value = die.roll();
            assert!((1..=6).contains(&value));
            seen[value as usize] = true;
        }

        assert!(seen[1..].iter().all(|&hit| hit));
        assert_eq!(die.rolls(), 600);
    }

    #[test]
    fn shake_table_only_reads_known_values() {
        let mut die = Die::shake_table(11);

        for _ in 0..200 {
            assert!(matches!(die.roll(), 1 | 3 | 4));
        }
    }

    #[test]
    fn same_seed_same_rolls() {
        let mut a = Die::standard(3);
        let mut b = Die::standard(3);

        for _ in 0..20 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn weights_pick_faces() {
        let die = Die::with_faces(0, vec![DieFace::new(2, 3), DieFace::new(5, 1)]).unwrap();

        assert_eq!(die.face_for(0), 2);
        assert_eq!(die.face_for(2), 2);
        assert_eq!(die.face_for(3), 5);
    }

    #[test]
    fn rejects_degenerate_faces() {
        assert_eq!(Die::with_faces(0, vec![]).unwrap_err(), GameError::InvalidDieFaces);
        assert_eq!(
            Die::with_faces(0, vec![DieFace::new(0, 1)]).unwrap_err(),
            GameError::InvalidDieFaces
        );
        assert_eq!(
            Die::with_faces(0, vec![DieFace::new(3, 0)]).unwrap_err(),
            GameError::InvalidDieFaces
        );
        assert_eq!(
            Die::with_faces(0, vec![DieFace::new(1, u32::MAX), DieFace::new(2, 1)]).unwrap_err(),
            GameError::InvalidDieFaces
        );
    }

    #[test]
    fn roll_into_sets_budget() {
        let mut engine =
            GridEngine::from_layout(MineMap::from_mine_coords(3, &[]).unwrap(), (1, 1)).unwrap();
        let mut die = Die::with_faces(9, vec![DieFace::new(4, 1)]).unwrap();

        assert_eq!(roll_into(&mut die, &mut engine), 4);
        assert_eq!(engine.steps(), 4);
    }

    #[test]
    fn roll_counter_saturates() {
        let mut die = Die::standard(1);
        die.rolls = u32::MAX;

        die.roll();

        assert_eq!(die.rolls(), u32::MAX);
    }

    #[test]
    fn shake_table_lists_every_orientation() {
        let die = Die::shake_table(0);

        let values: Vec<_> = die.faces().iter().map(|face| face.value).collect();

        assert_eq!(values, SHAKE_ORIENTATIONS);
        assert!(die.faces().iter().all(|face| face.weight == 1));
    }
}
