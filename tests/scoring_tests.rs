use flanker::design::{Direction, ScaleType};
use flanker::scoring::outcome::{
    resolve_reward, score_accuracy, success_probability, PRACTICE_FEEDBACK, TOO_SLOW_FEEDBACK,
};
use flanker::scoring::{evaluate, DeadlineAdapter, Response, SessionState, TrialOutcome};
use flanker::trials::RewardCue;
use regex::Regex;
use rstest::rstest;

fn cue(reward_size: i32, scale: ScaleType) -> RewardCue {
    RewardCue {
        reward_size,
        scale_type: scale,
        announcement: "",
        text: reward_size.to_string(),
    }
}

fn hit(key: Direction, rt: f64) -> Response {
    Response { key: Some(key), rt }
}

#[rstest]
#[case(hit(Direction::Left, 0.30), Direction::Left, 0.42, 1)]
#[case(hit(Direction::Right, 0.30), Direction::Left, 0.42, 0)]
// Late answers are wrong even when the key matches.
#[case(hit(Direction::Left, 0.50), Direction::Left, 0.40, 0)]
#[case(hit(Direction::Right, 0.50), Direction::Left, 0.40, 0)]
#[case(Response { key: None, rt: 0.43 }, Direction::Left, 0.42, 0)]
// Exactly at the deadline still counts.
#[case(hit(Direction::Left, 0.42), Direction::Left, 0.42, 1)]
fn test_accuracy(
    #[case] response: Response,
    #[case] correct: Direction,
    #[case] deadline: f64,
    #[case] expected: u8,
) {
    assert_eq!(score_accuracy(&response, correct, deadline), expected);
}

#[test]
fn test_deterministic_reward_is_exact() {
    let mut rng = fastrand::Rng::with_seed(1);
    let out = evaluate(
        &hit(Direction::Right, 0.3),
        Direction::Right,
        &cue(53, ScaleType::Deterministic),
        0.5,
        &mut rng,
    );
    assert_eq!(out.accuracy, 1);
    assert_eq!(out.earned_reward, 53);
    assert!(!out.too_slow);
}

#[test]
fn test_wrong_answer_earns_nothing() {
    let mut rng = fastrand::Rng::with_seed(1);
    for scale in [ScaleType::Deterministic, ScaleType::Probabilistic] {
        assert_eq!(resolve_reward(0, scale, 100, &mut rng), 0);
    }
}

#[test]
fn test_probabilistic_reward_is_all_or_nothing() {
    let mut rng = fastrand::Rng::with_seed(2024);
    let n = 20_000;
    let mut wins = 0;
    for _ in 0..n {
        let r = resolve_reward(1, ScaleType::Probabilistic, 97, &mut rng);
        assert!(r == 0 || r == 100, "unexpected payout {}", r);
        if r == 100 {
            wins += 1;
        }
    }
    let rate = wins as f64 / n as f64;
    assert!((rate - 0.97).abs() < 0.01, "win rate {} too far from 0.97", rate);
}

#[rstest]
#[case(-5, 0.0)]
#[case(0, 0.0)]
#[case(53, 0.53)]
#[case(100, 1.0)]
#[case(103, 1.0)]
fn test_success_probability_is_clamped(#[case] size: i32, #[case] expected: f64) {
    assert!((success_probability(size) - expected).abs() < 1e-12);
}

#[test]
fn test_probability_extremes() {
    let mut rng = fastrand::Rng::with_seed(9);
    for _ in 0..1_000 {
        assert_eq!(resolve_reward(1, ScaleType::Probabilistic, 0, &mut rng), 0);
        assert_eq!(resolve_reward(1, ScaleType::Probabilistic, 100, &mut rng), 100);
    }
}

#[test]
fn test_feedback_text() {
    let re = Regex::new(r"^\+\d+$").unwrap();
    let ok = TrialOutcome {
        accuracy: 1,
        earned_reward: 77,
        too_slow: false,
    };
    assert!(re.is_match(&ok.feedback(false)));
    assert_eq!(ok.feedback(false), "+77");
    assert_eq!(ok.feedback(true), PRACTICE_FEEDBACK);

    let slow = TrialOutcome {
        accuracy: 0,
        earned_reward: 0,
        too_slow: true,
    };
    assert_eq!(slow.feedback(false), TOO_SLOW_FEEDBACK);
    assert_eq!(slow.feedback(true), PRACTICE_FEEDBACK);
}

#[test]
fn test_miss_is_too_slow() {
    let mut rng = fastrand::Rng::with_seed(3);
    let out = evaluate(
        &Response { key: None, rt: 0.42 },
        Direction::Left,
        &cue(50, ScaleType::Deterministic),
        0.42,
        &mut rng,
    );
    assert_eq!(out.accuracy, 0);
    assert!(out.too_slow);
    assert_eq!(out.feedback(false), TOO_SLOW_FEEDBACK);
}

#[test]
fn test_practice_leaves_state_untouched() {
    let adapter = DeadlineAdapter::default();
    let state = SessionState::new(0.4);
    let outcome = TrialOutcome {
        accuracy: 1,
        earned_reward: 100,
        too_slow: false,
    };
    let after = state.clone().apply(&outcome, true, &adapter);
    assert_eq!(after, state);
}

#[test]
fn test_running_totals() {
    let adapter = DeadlineAdapter::default();
    let mut state = SessionState::new(0.5);
    let outcomes = [(1, 53), (0, 0), (1, 100), (1, 0)];
    for (acc, reward) in outcomes {
        let o = TrialOutcome {
            accuracy: acc,
            earned_reward: reward,
            too_slow: false,
        };
        state = state.apply(&o, false, &adapter);
    }
    assert_eq!(state.totals.trials(), 4);
    assert_eq!(state.totals.total_reward(), 153);
    assert_eq!(state.totals.accuracy_pct(), 75.0);
}

#[test]
fn test_accuracy_pct_rounds_to_one_decimal() {
    let adapter = DeadlineAdapter::default();
    let mut state = SessionState::new(0.5);
    for acc in [1, 0, 0] {
        let o = TrialOutcome {
            accuracy: acc,
            earned_reward: 0,
            too_slow: false,
        };
        state = state.apply(&o, false, &adapter);
    }
    assert_eq!(state.totals.accuracy_pct(), 33.3);
}
