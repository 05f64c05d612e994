use crate::config::TimingParams;

/// Bounded step controller for the response deadline (seconds).
#[derive(Debug, Clone, Copy)]
pub struct DeadlineAdapter {
    pub min: f64,
    pub max: f64,
    pub step_down: f64,
    pub step_up: f64,
}

impl Default for DeadlineAdapter {
    fn default() -> Self {
        Self::from(&TimingParams::default())
    }
}

impl From<&TimingParams> for DeadlineAdapter {
    fn from(t: &TimingParams) -> Self {
        Self {
            min: t.deadline_min,
            max: t.deadline_max,
            step_down: t.deadline_step_down,
            step_up: t.deadline_step_up,
        }
    }
}

impl DeadlineAdapter {
    /// Inside the band a correct answer tightens the deadline and an error
    /// loosens it; outside the band the value snaps to the nearest bound.
    /// The result is kept in the band and rounded to 2 decimals.
    pub fn next(&self, accuracy: u8, deadline: f64) -> f64 {
        let adjusted = if self.contains(deadline) {
            if accuracy == 1 {
                deadline - self.step_down
            } else {
                deadline + self.step_up
            }
        } else {
            deadline
        };
        round2(adjusted.clamp(self.min, self.max))
    }

    pub fn contains(&self, deadline: f64) -> bool {
        // Tolerate float drift on values that were rounded to 2 decimals.
        let eps = 1e-9;
        deadline >= self.min - eps && deadline <= self.max + eps
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
