pub mod config;
pub mod design;
pub mod error;
pub mod intake;
pub mod recorder;
pub mod scoring;
pub mod session;
pub mod trials;
// cmd, reports and the terminal presenter are binary modules (see main.rs).
