pub mod cue;
pub mod generator;
pub mod noise;
pub mod stimulus;

use crate::design::{Bin, Congruency, Direction, ScaleType};
use serde::{Deserialize, Serialize};

pub use self::cue::RewardCue;
pub use self::generator::TrialListBuilder;
pub use self::noise::NoiseSampler;
pub use self::stimulus::Stimulus;

/// One cell of the factorial design. Never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialCondition {
    pub tag: usize,
    pub congruency: Congruency,
    pub bin: Bin,
    pub scale_type: ScaleType,
    pub correct: Direction,
    pub bin_size: i32,
}

impl TrialCondition {
    pub fn new(tag: usize, congruency: Congruency, bin: Bin, scale_type: ScaleType) -> Self {
        Self {
            tag,
            congruency,
            bin,
            scale_type,
            correct: congruency.correct_direction(),
            bin_size: bin.base_value(),
        }
    }
}
