use crate::reports;
use crate::terminal::TerminalPresenter;
use clap::Args;
use flanker::config::ExperimentConfig;
use flanker::design::points_to_euro;
use flanker::error::FlResult;
use flanker::intake::{DataPaths, ParticipantArgs, ParticipantInfo};
use flanker::recorder::{CsvRecorder, NullRecorder, SessionSummary, TrialSink};
use flanker::session::{Experiment, SessionOptions, SessionReport};
use flanker::trials::TrialListBuilder;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub participant: ParticipantArgs,

    #[command(flatten)]
    pub config: ExperimentConfig,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Go straight to the practice block.
    #[arg(long, default_value_t = false)]
    pub skip_intro: bool,
}

pub fn run(args: RunArgs, config: ExperimentConfig) -> FlResult<()> {
    let info = ParticipantInfo::from_args(&args.participant)?;
    let c_b = info.counterbalance();

    let builder = TrialListBuilder::new(&config.design, c_b, info.dry_run);
    info!(
        "⏱️  Estimated duration (excluding breaks and instructions): {:.1} minutes",
        config.estimated_minutes(builder.trials_in_block(1))
    );
    info!(
        "👤 Participant {} ({}, {}) | counterbalance {} | dry run {}",
        info.number, info.name, info.gender, c_b, info.dry_run
    );

    let options = SessionOptions {
        name: info.name.clone(),
        counterbalance: c_b,
        short_run: info.dry_run,
        skip_intro: args.skip_intro,
        seed: args.seed,
    };

    let report = if info.dry_run {
        execute(config, options, NullRecorder)?
    } else {
        let paths = DataPaths::for_participant(&args.participant.data_dir, info.number);
        paths.prepare()?;
        let recorder = CsvRecorder::create(&paths.data_file)?;
        let report = execute(config, options, recorder)?;

        let total = report.total_reward();
        SessionSummary {
            participant: info.number.to_string(),
            name: info.name.clone(),
            counterbalance: c_b,
            total_reward: total,
            monetary_reward: points_to_euro(total),
            accuracy_pct: report.accuracy_pct(),
            scored_trials: report.state.totals.trials(),
            final_deadline: report.state.deadline,
        }
        .save(&paths.summary_file)?;
        report
    };

    reports::print_session_report(&report);
    Ok(())
}

/// The terminal is restored before this returns, on success or error.
fn execute<S: TrialSink>(
    config: ExperimentConfig,
    options: SessionOptions,
    sink: S,
) -> FlResult<SessionReport> {
    let presenter = TerminalPresenter::new(config.keys.clone())?;
    let mut experiment = Experiment::new(config, options, presenter, sink);
    experiment.run()
}
