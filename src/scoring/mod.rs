pub mod deadline;
pub mod outcome;
pub mod state;

pub use self::deadline::DeadlineAdapter;
pub use self::outcome::{evaluate, Response, TrialOutcome};
pub use self::state::{RunningTotals, SessionState};
