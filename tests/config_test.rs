use clap::{CommandFactory, FromArgMatches, Parser};
use flanker::config::ExperimentConfig;
use flanker::error::FlankerError;
use rstest::rstest;
use std::io::Write;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: ExperimentConfig,
}

fn parse(args: &[&str]) -> (ExperimentConfig, clap::ArgMatches) {
    let mut full = vec!["test"];
    full.extend_from_slice(args);
    let matches = TestCli::command().get_matches_from(full);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (cli, _) = parse(&[]);
    let def = ExperimentConfig::default();
    assert_eq!(cli.design.n_blocks, def.design.n_blocks);
    assert_eq!(cli.design.n_trial_rep, 7);
    assert_eq!(cli.timing.initial_deadline, 0.4);
    assert_eq!(cli.timing.deadline_min, 0.42);
    assert_eq!(cli.timing.deadline_max, 0.82);
    assert_eq!(cli.keys.left_key, 'k');
    assert_eq!(cli.keys.right_key, 'm');
    assert!(def.validate().is_ok());
}

#[test]
fn test_profile_keeps_values_not_given_on_cli() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "design": {{ "n_blocks": 5, "n_trial_rep": 2 }}, "keys": {{ "left_key": "f" }} }}"#
    )
    .unwrap();

    let mut config = ExperimentConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.design.n_blocks, 5);
    assert_eq!(config.keys.left_key, 'f');
    // Missing fields fall back to defaults.
    assert_eq!(config.keys.right_key, 'm');
    assert_eq!(config.timing.t_feedback, 0.6);

    let (cli, matches) = parse(&["--n-trial-rep", "3", "--right-key", "j"]);
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.design.n_blocks, 5, "untouched by CLI defaults");
    assert_eq!(config.design.n_trial_rep, 3);
    assert_eq!(config.keys.left_key, 'f');
    assert_eq!(config.keys.right_key, 'j');
}

#[test]
fn test_bad_profile_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(
        ExperimentConfig::load_from_file(file.path()),
        Err(FlankerError::Json(_))
    ));
    assert!(matches!(
        ExperimentConfig::load_from_file("/definitely/not/here.json"),
        Err(FlankerError::Io(_))
    ));
}

#[test]
fn test_validate_rejects_inconsistent_values() {
    let mut c = ExperimentConfig::default();
    c.keys.right_key = 'K';
    assert!(matches!(c.validate(), Err(FlankerError::Config(_))));

    let mut c = ExperimentConfig::default();
    c.keys.left_key = ' ';
    assert!(c.validate().is_err());

    let mut c = ExperimentConfig::default();
    c.timing.deadline_min = 0.9;
    assert!(c.validate().is_err());

    let mut c = ExperimentConfig::default();
    c.design.n_blocks = 0;
    assert!(c.validate().is_err());

    let mut c = ExperimentConfig::default();
    c.timing.t_blank = -1.0;
    assert!(c.validate().is_err());
}

#[rstest]
#[case::initial_inf(|c: &mut ExperimentConfig| c.timing.initial_deadline = f64::INFINITY)]
#[case::initial_nan(|c: &mut ExperimentConfig| c.timing.initial_deadline = f64::NAN)]
#[case::max_inf(|c: &mut ExperimentConfig| c.timing.deadline_max = f64::INFINITY)]
#[case::min_nan(|c: &mut ExperimentConfig| c.timing.deadline_min = f64::NAN)]
#[case::step_up_nan(|c: &mut ExperimentConfig| c.timing.deadline_step_up = f64::NAN)]
#[case::step_down_inf(|c: &mut ExperimentConfig| c.timing.deadline_step_down = f64::INFINITY)]
fn test_validate_rejects_non_finite_deadlines(#[case] tweak: fn(&mut ExperimentConfig)) {
    let mut c = ExperimentConfig::default();
    tweak(&mut c);
    assert!(matches!(c.validate(), Err(FlankerError::Config(_))));
}

#[test]
fn test_non_finite_deadline_flag_is_rejected_after_merge() {
    let (cli, matches) = parse(&["--initial-deadline", "inf"]);
    let mut config = ExperimentConfig::default();
    config.merge_from_cli(&cli, &matches);
    assert!(config.timing.initial_deadline.is_infinite());
    assert!(matches!(config.validate(), Err(FlankerError::Config(_))));
}

#[test]
fn test_estimated_minutes() {
    let c = ExperimentConfig::default();
    // (1.2 + 0.3 + 0.4 + 0.6) * (8 * 140 + 4) / 60
    let expected = 2.5 * 1124.0 / 60.0;
    assert!((c.estimated_minutes(140) - expected).abs() < 1e-9);
}
