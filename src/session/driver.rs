use super::instructions;
use super::presenter::{wait_for, Key, Presenter, Screen, ADVANCE_KEYS, RESPONSE_KEYS};
use crate::config::ExperimentConfig;
use crate::design::Direction;
use crate::error::{FlResult, FlankerError};
use crate::recorder::{TrialRecord, TrialSink};
use crate::scoring::{evaluate, DeadlineAdapter, Response, SessionState};
use crate::trials::{NoiseSampler, RewardCue, Stimulus, TrialCondition, TrialListBuilder};
use fastrand::Rng;
use std::time::Duration;
use tracing::{debug, info};

pub struct SessionOptions {
    pub name: String,
    pub counterbalance: u8,
    pub short_run: bool,
    /// Skip onboarding pages and the comprehension check.
    pub skip_intro: bool,
    pub seed: Option<u64>,
}

/// What the driver hands back once the last block is done.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub state: SessionState,
    pub blocks_run: usize,
    pub trials_run: usize,
}

impl SessionReport {
    pub fn total_reward(&self) -> i64 {
        self.state.totals.total_reward()
    }

    pub fn accuracy_pct(&self) -> f64 {
        self.state.totals.accuracy_pct()
    }
}

/// Sequences blocks and trials. Owns the running totals, the adaptive
/// deadline and the output sink for the whole session.
pub struct Experiment<P: Presenter, S: TrialSink> {
    config: ExperimentConfig,
    options: SessionOptions,
    presenter: P,
    sink: S,
    builder: TrialListBuilder,
    sampler: NoiseSampler,
    adapter: DeadlineAdapter,
    rng: Rng,
}

impl<P: Presenter, S: TrialSink> Experiment<P, S> {
    pub fn new(config: ExperimentConfig, options: SessionOptions, presenter: P, sink: S) -> Self {
        let builder = TrialListBuilder::new(&config.design, options.counterbalance, options.short_run);
        let sampler = NoiseSampler::from(&config.design);
        let adapter = DeadlineAdapter::from(&config.timing);
        let rng = match options.seed {
            Some(s) => Rng::with_seed(s),
            None => Rng::new(),
        };
        Self {
            config,
            options,
            presenter,
            sink,
            builder,
            sampler,
            adapter,
            rng,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (P, S) {
        (self.presenter, self.sink)
    }

    pub fn run(&mut self) -> FlResult<SessionReport> {
        info!(
            "🧪 Session start: counterbalance {} | short run {} | {} blocks",
            self.options.counterbalance, self.options.short_run, self.config.design.n_blocks
        );

        if !self.options.skip_intro {
            let pages = instructions::onboarding_pages(&self.options.name, &self.config.keys);
            instructions::run_onboarding(&mut self.presenter, &pages)?;
            instructions::run_comprehension_check(&mut self.presenter, &self.config.keys)?;
        }

        let mut state = SessionState::new(self.config.timing.initial_deadline);
        let mut trials_run = 0;
        let n_blocks = self.config.design.n_blocks;

        for block in 0..n_blocks {
            let trials = self.builder.build(block, &mut self.rng);
            let scale = self.builder.scale_for_block(block);

            self.presenter
                .show(&Screen::Text(instructions::block_intro(block, scale)))?;
            wait_for(&mut self.presenter, &ADVANCE_KEYS)?;

            for (index, condition) in trials.iter().enumerate() {
                state = self.run_trial(state, block, index, condition)?;
                trials_run += 1;
            }

            info!(
                "Block {} ({}) done | Reward: {} | Accuracy: {:.1}% | Deadline: {:.2}s",
                block,
                scale,
                state.totals.total_reward(),
                state.totals.accuracy_pct(),
                state.deadline
            );

            let done = instructions::block_completed(block, n_blocks, state.totals.total_reward());
            self.presenter.show(&Screen::Text(done))?;
            wait_for(&mut self.presenter, &ADVANCE_KEYS)?;
        }

        let total = state.totals.total_reward();
        self.sink.finish(total)?;

        for text in instructions::closing_screens(total, state.totals.accuracy_pct()) {
            self.presenter.show(&Screen::Text(text))?;
            wait_for(&mut self.presenter, &ADVANCE_KEYS)?;
        }

        Ok(SessionReport {
            state,
            blocks_run: n_blocks,
            trials_run,
        })
    }

    /// cue -> fixation -> stimulus -> response -> feedback -> blank -> log
    pub fn run_trial(
        &mut self,
        state: SessionState,
        block: usize,
        index: usize,
        condition: &TrialCondition,
    ) -> FlResult<SessionState> {
        let timing = &self.config.timing;
        let practice = block == 0;

        let cue = RewardCue::build(condition, &self.sampler, &mut self.rng);
        self.presenter.show(&Screen::RewardCue {
            announcement: cue.announcement.to_string(),
            value: cue.text.clone(),
        })?;
        self.presenter.dwell(timing.reward_cue())?;

        self.presenter.show(&Screen::Fixation)?;
        self.presenter.dwell(timing.fixation())?;

        let stimulus = Stimulus::from(condition);
        self.presenter.clear_events()?;
        self.presenter.show(&Screen::Stimulus {
            glyphs: stimulus.glyphs.to_string(),
            prompt: None,
        })?;

        let deadline = state.deadline;
        let limit = Duration::try_from_secs_f64(deadline).map_err(|e| {
            FlankerError::Config(format!("response deadline {}: {}", deadline, e))
        })?;
        let wait = self.presenter.wait_for_key(&RESPONSE_KEYS, Some(limit))?;
        let response = Response {
            key: wait.key.and_then(direction_for),
            rt: wait.elapsed.as_secs_f64(),
        };

        let outcome = evaluate(&response, condition.correct, &cue, deadline, &mut self.rng);
        let state = state.apply(&outcome, practice, &self.adapter);

        debug!(
            "B{} T{} {} {} {} | key {:?} rt {:.3}s | acc {} earned {} | deadline {:.2}->{:.2}",
            block,
            index,
            condition.bin,
            condition.congruency,
            cue.text,
            response.key,
            response.rt,
            outcome.accuracy,
            outcome.earned_reward,
            deadline,
            state.deadline
        );

        self.presenter.show(&Screen::Feedback(outcome.feedback(practice)))?;
        self.presenter.dwell(timing.feedback())?;
        self.presenter.show(&Screen::Blank)?;
        self.presenter.dwell(timing.blank())?;

        if !practice {
            let record = TrialRecord::new(
                block,
                index,
                condition,
                &cue,
                &response,
                &outcome,
                deadline,
                &self.config.keys,
            );
            self.sink.record(record)?;
        }

        Ok(state)
    }
}

fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::Left => Some(Direction::Left),
        Key::Right => Some(Direction::Right),
        Key::Advance | Key::Back => None,
    }
}
