use super::TrialCondition;
use crate::config::DesignParams;
use crate::design::{Bin, Congruency, ScaleType};
use fastrand::Rng;
use strum::IntoEnumIterator;
use tracing::debug;

/// Builds the shuffled trial sequence for one block.
#[derive(Debug, Clone)]
pub struct TrialListBuilder {
    pub n_trial_rep: usize,
    pub n_practice_trials: usize,
    pub n_test_trials: usize,
    pub counterbalance: u8,
    pub short_run: bool,
}

impl TrialListBuilder {
    pub fn new(design: &DesignParams, counterbalance: u8, short_run: bool) -> Self {
        Self {
            n_trial_rep: design.n_trial_rep,
            n_practice_trials: design.n_practice_trials,
            n_test_trials: design.n_test_trials,
            counterbalance,
            short_run,
        }
    }

    pub fn scale_for_block(&self, block: usize) -> ScaleType {
        ScaleType::for_block(block, self.counterbalance)
    }

    /// Number of trials `build` will return for `block`.
    pub fn trials_in_block(&self, block: usize) -> usize {
        let cells = factorial_size();
        if block == 0 {
            self.n_practice_trials.min(cells)
        } else if self.short_run {
            self.n_test_trials.min(cells)
        } else {
            cells * self.n_trial_rep
        }
    }

    pub fn build(&self, block: usize, rng: &mut Rng) -> Vec<TrialCondition> {
        let scale = self.scale_for_block(block);
        let conditions = factorial_conditions(scale);

        let trials = if block == 0 {
            sample(&conditions, self.n_practice_trials, rng)
        } else if self.short_run {
            sample(&conditions, self.n_test_trials, rng)
        } else {
            repeat_shuffled(&conditions, self.n_trial_rep, rng)
        };

        debug!(
            "Block {}: {} trials, scale {}",
            block,
            trials.len(),
            scale
        );
        trials
    }
}

pub fn factorial_size() -> usize {
    Bin::iter().count() * Congruency::iter().count()
}

/// The complete bin x congruency cross under one scale type, tagged in
/// generation order.
pub fn factorial_conditions(scale: ScaleType) -> Vec<TrialCondition> {
    Bin::iter()
        .flat_map(|bin| Congruency::iter().map(move |c| (bin, c)))
        .enumerate()
        .map(|(tag, (bin, congruency))| TrialCondition::new(tag, congruency, bin, scale))
        .collect()
}

/// Random subset without replacement, in random order.
fn sample(conditions: &[TrialCondition], n: usize, rng: &mut Rng) -> Vec<TrialCondition> {
    let mut pool = conditions.to_vec();
    rng.shuffle(&mut pool);
    pool.truncate(n);
    pool
}

/// Each repetition is its own permutation of the full cross.
fn repeat_shuffled(conditions: &[TrialCondition], reps: usize, rng: &mut Rng) -> Vec<TrialCondition> {
    let mut out = Vec::with_capacity(conditions.len() * reps);
    for _ in 0..reps {
        let mut rep = conditions.to_vec();
        rng.shuffle(&mut rep);
        out.extend(rep);
    }
    out
}
