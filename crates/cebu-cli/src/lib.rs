//! Library components of the `cebu` command-line runner.

pub mod logging;
pub mod recipe;
pub mod runner;
