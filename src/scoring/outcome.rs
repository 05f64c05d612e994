use crate::design::{Direction, ScaleType, PROBABILISTIC_PAYOUT};
use crate::trials::RewardCue;
use fastrand::Rng;

pub const PRACTICE_FEEDBACK: &str = "Keep practising!";
pub const TOO_SLOW_FEEDBACK: &str = "Too slow!";

/// What the participant did on one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Response {
    pub key: Option<Direction>,
    /// Seconds from stimulus onset to keypress, or to the deadline on a miss.
    pub rt: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    pub accuracy: u8,
    pub earned_reward: i32,
    pub too_slow: bool,
}

/// Late responses are wrong no matter which key was pressed.
pub fn score_accuracy(response: &Response, correct: Direction, deadline: f64) -> u8 {
    if response.rt > deadline {
        return 0;
    }
    match response.key {
        Some(k) if k == correct => 1,
        _ => 0,
    }
}

pub fn success_probability(reward_size: i32) -> f64 {
    reward_size.clamp(0, 100) as f64 / 100.0
}

pub fn resolve_reward(accuracy: u8, scale: ScaleType, reward_size: i32, rng: &mut Rng) -> i32 {
    if accuracy == 0 {
        return 0;
    }
    match scale {
        ScaleType::Deterministic => reward_size,
        ScaleType::Probabilistic => {
            if rng.f64() < success_probability(reward_size) {
                PROBABILISTIC_PAYOUT
            } else {
                0
            }
        }
    }
}

pub fn evaluate(
    response: &Response,
    correct: Direction,
    cue: &RewardCue,
    deadline: f64,
    rng: &mut Rng,
) -> TrialOutcome {
    let accuracy = score_accuracy(response, correct, deadline);
    let earned_reward = resolve_reward(accuracy, cue.scale_type, cue.reward_size, rng);
    TrialOutcome {
        accuracy,
        earned_reward,
        // A miss ran out the clock even if the timer read exactly the deadline.
        too_slow: response.rt > deadline || response.key.is_none(),
    }
}

impl TrialOutcome {
    pub fn feedback(&self, practice: bool) -> String {
        if practice {
            PRACTICE_FEEDBACK.to_string()
        } else if self.too_slow {
            TOO_SLOW_FEEDBACK.to_string()
        } else {
            format!("+{}", self.earned_reward)
        }
    }
}
