use crate::error::{FlResult, FlankerError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExperimentConfig {
    #[command(flatten)]
    pub design: DesignParams,
    #[command(flatten)]
    pub timing: TimingParams,
    #[command(flatten)]
    pub keys: ResponseKeys,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignParams {
    /// Number of blocks including the practice block 0.
    #[arg(long, default_value_t = 9)]
    pub n_blocks: usize,
    /// Repetitions of the full bin x congruency cross per test block.
    #[arg(long, default_value_t = 7)]
    pub n_trial_rep: usize,
    #[arg(long, default_value_t = 4)]
    pub n_practice_trials: usize,
    /// Trials per test block in a dry run.
    #[arg(long, default_value_t = 4)]
    pub n_test_trials: usize,

    // === REWARD JITTER ===
    #[arg(long, default_value_t = 3)]
    pub noise_upper_limit: i32,
    #[arg(long, default_value_t = 5.0)]
    pub noise_spread: f64,
    #[arg(long, default_value_t = 1000)]
    pub noise_max_draws: usize,
}

impl Default for DesignParams {
    fn default() -> Self {
        Self {
            n_blocks: 9,
            n_trial_rep: 7,
            n_practice_trials: 4,
            n_test_trials: 4,
            noise_upper_limit: 3,
            noise_spread: 5.0,
            noise_max_draws: 1000,
        }
    }
}

/// All durations are in seconds.
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    #[arg(long, default_value_t = 1.2)]
    pub t_reward_cue: f64,
    #[arg(long, default_value_t = 0.30)]
    pub t_fixation: f64,
    #[arg(long, default_value_t = 0.6)]
    pub t_feedback: f64,
    #[arg(long, default_value_t = 0.2)]
    pub t_blank: f64,

    // === ADAPTIVE DEADLINE ===
    #[arg(long, default_value_t = 0.4)]
    pub initial_deadline: f64,
    #[arg(long, default_value_t = 0.42)]
    pub deadline_min: f64,
    #[arg(long, default_value_t = 0.82)]
    pub deadline_max: f64,
    #[arg(long, default_value_t = 0.01)]
    pub deadline_step_down: f64,
    #[arg(long, default_value_t = 0.08)]
    pub deadline_step_up: f64,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            t_reward_cue: 1.2,
            t_fixation: 0.30,
            t_feedback: 0.6,
            t_blank: 0.2,
            initial_deadline: 0.4,
            deadline_min: 0.42,
            deadline_max: 0.82,
            deadline_step_down: 0.01,
            deadline_step_up: 0.08,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseKeys {
    #[arg(long, default_value_t = 'k')]
    pub left_key: char,
    #[arg(long, default_value_t = 'm')]
    pub right_key: char,
}

impl Default for ResponseKeys {
    fn default() -> Self {
        Self {
            left_key: 'k',
            right_key: 'm',
        }
    }
}

impl TimingParams {
    pub fn reward_cue(&self) -> Duration {
        secs(self.t_reward_cue)
    }

    pub fn fixation(&self) -> Duration {
        secs(self.t_fixation)
    }

    pub fn feedback(&self) -> Duration {
        secs(self.t_feedback)
    }

    pub fn blank(&self) -> Duration {
        secs(self.t_blank)
    }
}

fn secs(s: f64) -> Duration {
    Duration::try_from_secs_f64(s.max(0.0)).unwrap_or(Duration::ZERO)
}

impl ExperimentConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> FlResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlays only the flags the user actually typed onto `self`,
    /// so a JSON profile keeps its values for everything left at default.
    pub fn merge_from_cli(&mut self, cli: &ExperimentConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(design.n_blocks);
        update_if_present!(design.n_trial_rep);
        update_if_present!(design.n_practice_trials);
        update_if_present!(design.n_test_trials);
        update_if_present!(design.noise_upper_limit);
        update_if_present!(design.noise_spread);
        update_if_present!(design.noise_max_draws);

        update_if_present!(timing.t_reward_cue);
        update_if_present!(timing.t_fixation);
        update_if_present!(timing.t_feedback);
        update_if_present!(timing.t_blank);
        update_if_present!(timing.initial_deadline);
        update_if_present!(timing.deadline_min);
        update_if_present!(timing.deadline_max);
        update_if_present!(timing.deadline_step_down);
        update_if_present!(timing.deadline_step_up);

        update_if_present!(keys.left_key);
        update_if_present!(keys.right_key);
    }

    pub fn validate(&self) -> FlResult<()> {
        let d = &self.design;
        let t = &self.timing;

        if d.n_blocks == 0 {
            return Err(FlankerError::Config("n_blocks must be at least 1".into()));
        }
        if d.n_trial_rep == 0 {
            return Err(FlankerError::Config("n_trial_rep must be at least 1".into()));
        }
        if d.noise_upper_limit < 0 {
            return Err(FlankerError::Config(format!(
                "noise_upper_limit must be non-negative, got {}",
                d.noise_upper_limit
            )));
        }
        if !(d.noise_spread.is_finite() && d.noise_spread >= 0.0) {
            return Err(FlankerError::Config(format!(
                "noise_spread must be a finite non-negative number, got {}",
                d.noise_spread
            )));
        }
        if d.noise_max_draws == 0 {
            return Err(FlankerError::Config("noise_max_draws must be at least 1".into()));
        }
        let deadline_fields = [
            ("initial_deadline", t.initial_deadline),
            ("deadline_min", t.deadline_min),
            ("deadline_max", t.deadline_max),
            ("deadline_step_down", t.deadline_step_down),
            ("deadline_step_up", t.deadline_step_up),
        ];
        for (name, value) in deadline_fields {
            if !value.is_finite() {
                return Err(FlankerError::Config(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if !(t.deadline_min > 0.0 && t.deadline_min <= t.deadline_max) {
            return Err(FlankerError::Config(format!(
                "deadline band [{}, {}] is empty or non-positive",
                t.deadline_min, t.deadline_max
            )));
        }
        if t.deadline_step_down < 0.0 || t.deadline_step_up < 0.0 {
            return Err(FlankerError::Config("deadline steps must be non-negative".into()));
        }
        if t.initial_deadline <= 0.0 {
            return Err(FlankerError::Config("initial_deadline must be positive".into()));
        }

        let durations = [t.t_reward_cue, t.t_fixation, t.t_feedback, t.t_blank];
        if durations.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(FlankerError::Config("screen durations must be non-negative".into()));
        }

        let (l, r) = (self.keys.left_key, self.keys.right_key);
        if l.to_ascii_lowercase() == r.to_ascii_lowercase() {
            return Err(FlankerError::Config(format!(
                "left and right response keys must differ (both '{}')",
                l
            )));
        }
        // Space and 'b' drive the instruction screens, 'q' is part of ctrl+q.
        for k in [l, r] {
            if k == ' ' || k.eq_ignore_ascii_case(&'b') || k.eq_ignore_ascii_case(&'q') {
                return Err(FlankerError::Config(format!(
                    "response key '{}' is reserved for navigation or cancellation",
                    k
                )));
            }
        }
        Ok(())
    }

    /// Rough session length in minutes, excluding breaks and instructions.
    pub fn estimated_minutes(&self, trials_per_block: usize) -> f64 {
        let t = &self.timing;
        let per_trial = t.t_reward_cue + t.t_fixation + t.initial_deadline + t.t_feedback;
        let test_blocks = self.design.n_blocks.saturating_sub(1);
        let n = test_blocks * trials_per_block + self.design.n_practice_trials;
        per_trial * n as f64 / 60.0
    }
}
