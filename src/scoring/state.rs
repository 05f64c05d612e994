use super::deadline::DeadlineAdapter;
use super::outcome::TrialOutcome;
use serde::Serialize;

/// Running totals over scored (non-practice) trials.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunningTotals {
    pub accuracy_history: Vec<u8>,
    pub reward_history: Vec<i32>,
}

impl RunningTotals {
    pub fn push(&mut self, outcome: &TrialOutcome) {
        self.accuracy_history.push(outcome.accuracy);
        self.reward_history.push(outcome.earned_reward);
    }

    pub fn trials(&self) -> usize {
        self.accuracy_history.len()
    }

    pub fn total_reward(&self) -> i64 {
        self.reward_history.iter().map(|&r| r as i64).sum()
    }

    /// Percentage correct, one decimal. Zero before any scored trial.
    pub fn accuracy_pct(&self) -> f64 {
        if self.accuracy_history.is_empty() {
            return 0.0;
        }
        let correct: u32 = self.accuracy_history.iter().map(|&a| a as u32).sum();
        let pct = correct as f64 / self.accuracy_history.len() as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }
}

/// Everything that survives from one trial to the next. The driver threads
/// it by value through every trial step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub totals: RunningTotals,
    pub deadline: f64,
}

impl SessionState {
    pub fn new(initial_deadline: f64) -> Self {
        Self {
            totals: RunningTotals::default(),
            deadline: initial_deadline,
        }
    }

    /// Folds a scored trial into the totals and adapts the deadline.
    /// Practice trials leave the state untouched.
    pub fn apply(mut self, outcome: &TrialOutcome, practice: bool, adapter: &DeadlineAdapter) -> Self {
        if practice {
            return self;
        }
        self.totals.push(outcome);
        self.deadline = adapter.next(outcome.accuracy, self.deadline);
        self
    }
}
