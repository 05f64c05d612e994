use crate::reports;
use clap::Args;
use flanker::config::ExperimentConfig;
use flanker::error::FlResult;
use flanker::intake::{counterbalance, parse_participant_number};
use flanker::trials::TrialListBuilder;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ExperimentConfig,

    /// Participant number used for counterbalancing.
    #[arg(short, long, default_value = "1")]
    pub participant: String,

    /// Block whose trial order should be listed.
    #[arg(short, long, default_value_t = 1)]
    pub block: usize,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
}

/// Prints the block schedule and one generated trial list. Writes nothing.
pub fn run(args: PlanArgs, config: ExperimentConfig) -> FlResult<()> {
    let number = parse_participant_number(&args.participant)?;
    let c_b = counterbalance(number);
    info!("📋 Planning for participant {} (counterbalance {})", number, c_b);

    let builder = TrialListBuilder::new(&config.design, c_b, args.dry_run);
    reports::print_block_plan(&builder, &config);

    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let trials = builder.build(args.block, &mut rng);
    reports::print_trial_list(args.block, &trials, &config.keys);
    Ok(())
}
