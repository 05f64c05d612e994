use super::presenter::{wait_for, Key, Presenter, Screen, ADVANCE_KEYS, NAVIGATION_KEYS, RESPONSE_KEYS};
use crate::config::ResponseKeys;
use crate::design::{points_to_euro, ScaleType};
use crate::error::FlResult;
use tracing::debug;

const NAV_HINT: &str = "\n\n\npress space to continue\nor 'b' to go back";

pub fn onboarding_pages(name: &str, keys: &ResponseKeys) -> Vec<String> {
    vec![
        format!("Hello {}! Welcome to this experiment\n\npress space to continue", name),
        format!(
            "During the experiment you will see a row of arrows. \
             Each time, indicate the direction of the arrow in the middle.{}",
            NAV_HINT
        ),
        format!(
            "This is an example of such a row:\n\n              >><>>\n\n\
             Here the middle arrow points 'Left'{}",
            NAV_HINT
        ),
        format!(
            "Before each row a screen shows the reward you can earn.\n\
             You only receive a reward when you answer correctly{}",
            NAV_HINT
        ),
        format!(
            "Rewards are given in points. 200 points are worth 1.25 cents, \
             so make sure you collect enough of them!{}",
            NAV_HINT
        ),
        format!(
            "To indicate that the arrow points left: press '{}'\n\
             To indicate that the arrow points right: press '{}'{}",
            keys.left_key, keys.right_key, NAV_HINT
        ),
        format!("Your time to answer is limited, so respond as fast as you can!{}", NAV_HINT),
        format!(
            "We will first practise a few rows. After this it is no longer possible to go back{}",
            NAV_HINT
        ),
    ]
}

/// Page index for a sequence of navigation keys.
#[derive(Debug, Clone)]
pub struct Pager {
    index: usize,
    len: usize,
}

impl Pager {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn done(&self) -> bool {
        self.index >= self.len
    }

    pub fn press(&mut self, key: Key) {
        match key {
            Key::Advance => self.index += 1,
            Key::Back if self.index > 0 => self.index -= 1,
            _ => {}
        }
    }
}

pub fn run_onboarding<P: Presenter>(presenter: &mut P, pages: &[String]) -> FlResult<()> {
    let mut pager = Pager::new(pages.len());
    while !pager.done() {
        presenter.show(&Screen::Text(pages[pager.index()].clone()))?;
        let key = wait_for(presenter, &NAVIGATION_KEYS)?;
        pager.press(key);
    }
    Ok(())
}

pub const CHECK_PROMPT: &str = "Indicate the direction of the arrow in the middle of the row";

/// Repeats each example until the participant gives the right answer.
pub fn run_comprehension_check<P: Presenter>(presenter: &mut P, keys: &ResponseKeys) -> FlResult<()> {
    let examples = [
        (">><>>", Key::Left, "Correct!\n\n\nspace to continue"),
        (
            ">>>>>",
            Key::Right,
            "Correct!\n\n\nspace to continue to the practice round",
        ),
    ];

    for (glyphs, expected, confirmation) in examples {
        let mut attempts = 0;
        loop {
            attempts += 1;
            presenter.show(&Screen::Stimulus {
                glyphs: glyphs.to_string(),
                prompt: Some(CHECK_PROMPT.to_string()),
            })?;
            let key = wait_for(presenter, &RESPONSE_KEYS)?;
            if key == expected {
                break;
            }
            presenter.show(&Screen::Feedback(wrong_answer_text(keys)))?;
            wait_for(presenter, &ADVANCE_KEYS)?;
        }
        debug!("Comprehension example {} passed after {} attempts", glyphs, attempts);
        presenter.show(&Screen::Feedback(confirmation.to_string()))?;
        wait_for(presenter, &ADVANCE_KEYS)?;
    }
    Ok(())
}

pub fn wrong_answer_text(keys: &ResponseKeys) -> String {
    format!(
        "Wrong!\n For left, press '{}'\n For right, press '{}'\n\n\nspace to continue",
        keys.left_key, keys.right_key
    )
}

pub fn block_intro(block: usize, scale: ScaleType) -> String {
    if block == 0 {
        return "Get started with the practice round\n\nPress space to begin".to_string();
    }
    match scale {
        ScaleType::Probabilistic => "For every row there is a certain chance to earn 100 points \
             after a correct answer\nA percentage in blue shows what that chance is\n\n\
             Press space to start the round!"
            .to_string(),
        ScaleType::Deterministic => "For every row a number in blue shows exactly how many points \
             you can earn by answering correctly\n\nPress space to continue"
            .to_string(),
    }
}

pub fn block_completed(block: usize, n_blocks: usize, total_reward: i64) -> String {
    if block == 0 {
        "Let's start the real experiment!\n\nPress space to continue".to_string()
    } else if block + 1 >= n_blocks {
        "That was the last round!\n\nPress space to continue".to_string()
    } else {
        format!(
            "So far you have {} points or {:.2} euro!\n\nPress space to continue",
            total_reward,
            points_to_euro(total_reward)
        )
    }
}

pub fn closing_screens(total_reward: i64, accuracy_pct: f64) -> [String; 2] {
    [
        format!(
            "Thank you for taking part. In total you earned {} points or {:.2} euro!!\n\
             Your answer was correct {}% of the time",
            total_reward,
            points_to_euro(total_reward),
            accuracy_pct
        ),
        "Please tell the experimenter that the experiment is finished".to_string(),
    ]
}
