pub mod driver;
pub mod instructions;
pub mod presenter;

pub use self::driver::{Experiment, SessionOptions, SessionReport};
pub use self::presenter::{Key, KeyWait, Presenter, Screen};
