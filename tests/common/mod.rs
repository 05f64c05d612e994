#![allow(dead_code)]

use flanker::config::ExperimentConfig;
use flanker::error::{FlResult, FlankerError};
use flanker::recorder::{TrialRecord, TrialSink};
use flanker::session::{Key, KeyWait, Presenter, Screen};
use std::collections::VecDeque;
use std::time::Duration;

/// In-memory presenter. Trial responses come from a queue; once it is
/// empty the presenter answers every stimulus correctly after `default_rt`.
pub struct ScriptedPresenter {
    pub screens: Vec<Screen>,
    pub trial_responses: VecDeque<Option<(Key, f64)>>,
    pub check_answers: VecDeque<Key>,
    pub nav_keys: VecDeque<Key>,
    pub default_rt: f64,
    pub cancel_at_trial: Option<usize>,
    pub trials_seen: usize,
    pub dwelled: Duration,
}

impl Default for ScriptedPresenter {
    fn default() -> Self {
        Self {
            screens: Vec::new(),
            trial_responses: VecDeque::new(),
            check_answers: VecDeque::new(),
            nav_keys: VecDeque::new(),
            default_rt: 0.3,
            cancel_at_trial: None,
            trials_seen: 0,
            dwelled: Duration::ZERO,
        }
    }
}

impl ScriptedPresenter {
    /// Direction of the middle arrow on the most recent stimulus.
    fn correct_for_last_stimulus(&self) -> Key {
        let glyphs = self
            .screens
            .iter()
            .rev()
            .find_map(|s| match s {
                Screen::Stimulus { glyphs, .. } => Some(glyphs.clone()),
                _ => None,
            })
            .expect("no stimulus shown yet");
        match glyphs.chars().nth(2) {
            Some('<') => Key::Left,
            _ => Key::Right,
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.screens
            .iter()
            .filter_map(|s| match s {
                Screen::Text(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn feedbacks(&self) -> Vec<String> {
        self.screens
            .iter()
            .filter_map(|s| match s {
                Screen::Feedback(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Presenter for ScriptedPresenter {
    fn show(&mut self, screen: &Screen) -> FlResult<()> {
        self.screens.push(screen.clone());
        Ok(())
    }

    fn dwell(&mut self, duration: Duration) -> FlResult<()> {
        self.dwelled += duration;
        Ok(())
    }

    fn wait_for_key(&mut self, allowed: &[Key], timeout: Option<Duration>) -> FlResult<KeyWait> {
        if let Some(limit) = timeout {
            self.trials_seen += 1;
            if self.cancel_at_trial == Some(self.trials_seen) {
                return Err(FlankerError::Cancelled);
            }
            let scripted = match self.trial_responses.pop_front() {
                Some(r) => r,
                None => Some((self.correct_for_last_stimulus(), self.default_rt)),
            };
            return Ok(match scripted {
                Some((key, rt)) if Duration::from_secs_f64(rt) <= limit => KeyWait {
                    key: Some(key),
                    elapsed: Duration::from_secs_f64(rt),
                },
                _ => KeyWait {
                    key: None,
                    elapsed: limit + Duration::from_millis(1),
                },
            });
        }

        if allowed.contains(&Key::Left) {
            let key = self
                .check_answers
                .pop_front()
                .unwrap_or_else(|| self.correct_for_last_stimulus());
            return Ok(KeyWait {
                key: Some(key),
                elapsed: Duration::from_millis(500),
            });
        }

        let key = self.nav_keys.pop_front().unwrap_or(Key::Advance);
        Ok(KeyWait {
            key: allowed.contains(&key).then_some(key),
            elapsed: Duration::from_millis(500),
        })
    }
}

/// Keeps every record in memory.
#[derive(Default)]
pub struct MemorySink {
    pub records: Vec<TrialRecord>,
    pub finished: Option<i64>,
}

impl TrialSink for MemorySink {
    fn record(&mut self, record: TrialRecord) -> FlResult<()> {
        self.records.push(record);
        Ok(())
    }

    fn finish(&mut self, total_reward: i64) -> FlResult<()> {
        self.finished = Some(total_reward);
        Ok(())
    }
}

/// Three blocks (practice + two test blocks of one repetition) with every
/// dwell set to zero.
pub fn small_config() -> ExperimentConfig {
    let mut config = ExperimentConfig::default();
    config.design.n_blocks = 3;
    config.design.n_trial_rep = 1;
    config.timing.t_reward_cue = 0.0;
    config.timing.t_fixation = 0.0;
    config.timing.t_feedback = 0.0;
    config.timing.t_blank = 0.0;
    config
}
