use crate::error::FlResult;
use std::time::Duration;

/// A single frame of the experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Text(String),
    RewardCue { announcement: String, value: String },
    Fixation,
    /// Arrow array, optionally under a prompt line.
    Stimulus { glyphs: String, prompt: Option<String> },
    Feedback(String),
    Blank,
}

/// Logical keys. Physical bindings belong to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Advance,
    Back,
}

pub const RESPONSE_KEYS: [Key; 2] = [Key::Left, Key::Right];
pub const ADVANCE_KEYS: [Key; 1] = [Key::Advance];
pub const NAVIGATION_KEYS: [Key; 2] = [Key::Advance, Key::Back];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyWait {
    pub key: Option<Key>,
    /// Time since the wait started, measured when the key arrived or the
    /// timeout expired.
    pub elapsed: Duration,
}

/// Display surface plus input device.
///
/// Every method may fail with `FlankerError::Cancelled` once the operator
/// presses the global cancellation key; callers propagate it with `?`.
pub trait Presenter {
    fn show(&mut self, screen: &Screen) -> FlResult<()>;

    /// Keeps the current screen up for `duration`.
    fn dwell(&mut self, duration: Duration) -> FlResult<()>;

    /// Waits for one of `allowed`. With a timeout, `key` is `None` on expiry.
    fn wait_for_key(&mut self, allowed: &[Key], timeout: Option<Duration>) -> FlResult<KeyWait>;

    /// Discards input that arrived before the next wait.
    fn clear_events(&mut self) -> FlResult<()> {
        Ok(())
    }
}

/// Blocks until one of `allowed` is pressed.
pub fn wait_for<P: Presenter + ?Sized>(presenter: &mut P, allowed: &[Key]) -> FlResult<Key> {
    loop {
        if let Some(key) = presenter.wait_for_key(allowed, None)?.key {
            return Ok(key);
        }
    }
}
