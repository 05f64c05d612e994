use super::TrialCondition;

/// The arrow array for one trial. The correct answer stays on the
/// [`TrialCondition`] it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stimulus {
    pub glyphs: &'static str,
}

impl From<&TrialCondition> for Stimulus {
    fn from(trial: &TrialCondition) -> Self {
        Self {
            glyphs: trial.congruency.glyphs(),
        }
    }
}
