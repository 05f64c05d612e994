use super::noise::NoiseSampler;
use super::TrialCondition;
use crate::design::{Bin, ScaleType};
use fastrand::Rng;

/// What the participant sees before the arrows: the reward on offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardCue {
    pub reward_size: i32,
    pub scale_type: ScaleType,
    pub announcement: &'static str,
    pub text: String,
}

impl RewardCue {
    pub fn build(trial: &TrialCondition, sampler: &NoiseSampler, rng: &mut Rng) -> Self {
        let noise = sampler.sample(rng);
        Self::with_noise(trial, noise)
    }

    /// Deterministic half of [`RewardCue::build`], split out so the bin rules
    /// can be checked against fixed jitter.
    pub fn with_noise(trial: &TrialCondition, noise: i32) -> Self {
        let base = trial.bin_size;
        let reward_size = match trial.bin {
            Bin::Bin1 => base,
            Bin::Bin2 | Bin::Bin3 | Bin::Bin4 => base + noise,
            // Top bin never exceeds its nominal ceiling.
            Bin::Bin5 => base - noise.abs(),
        };

        let (announcement, text) = match trial.scale_type {
            ScaleType::Probabilistic => ("The chance of a reward is:", format!("{}%", reward_size)),
            ScaleType::Deterministic => ("The size of the reward is:", reward_size.to_string()),
        };

        Self {
            reward_size,
            scale_type: trial.scale_type,
            announcement,
            text,
        }
    }
}
