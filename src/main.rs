use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use flanker::config::ExperimentConfig;
use flanker::error::{FlResult, FlankerError};
use std::fs::File;
use std::process;
use std::sync::Mutex;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;
mod terminal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON experiment profile; explicit flags override its values.
    #[arg(global = true, long)]
    profile: Option<String>,

    /// Send logs to this file instead of stderr.
    #[arg(global = true, long)]
    log_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a full session for one participant in this terminal.
    Run(cmd::run::RunArgs),
    /// Show the block schedule and a generated trial order.
    Plan(cmd::plan::PlanArgs),
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match &cli.log_file {
        Some(path) => match File::create(path) {
            Ok(f) => builder.with_ansi(false).with_writer(Mutex::new(f)).init(),
            Err(e) => {
                builder.with_writer(std::io::stderr).init();
                warn!("⚠️  Could not open log file '{}': {}. Logging to stderr.", path, e);
            }
        },
        None => builder.with_writer(std::io::stderr).init(),
    }
}

fn resolve_config(
    cli: &Cli,
    cli_config: &ExperimentConfig,
    sub_matches: &clap::ArgMatches,
) -> FlResult<ExperimentConfig> {
    let config = match &cli.profile {
        Some(path) => {
            info!("⚖️  Loading experiment profile from: {}", path);
            let mut file_config = ExperimentConfig::load_from_file(path)?;
            file_config.merge_from_cli(cli_config, sub_matches);
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(&cli);
    info!("🚀 Initializing flanker task...");

    let (cli_config, sub_name) = match &cli.command {
        Commands::Run(args) => (&args.config, "run"),
        Commands::Plan(args) => (&args.config, "plan"),
    };
    let sub_matches = match matches.subcommand_matches(sub_name) {
        Some(m) => m,
        None => {
            error!("❌ Missing matches for subcommand '{}'", sub_name);
            process::exit(2);
        }
    };

    let config = resolve_config(&cli, cli_config, sub_matches).unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Run(args) => cmd::run::run(args, config),
        Commands::Plan(args) => cmd::plan::run(args, config),
    };

    match result {
        Ok(()) => {}
        Err(FlankerError::Cancelled) => {
            warn!("🛑 Session cancelled. Data recorded so far is not guaranteed to be complete.");
            process::exit(130);
        }
        Err(e) => {
            error!("\n❌ FATAL ERROR:");
            error!("   {}", e);
            process::exit(1);
        }
    }
}
