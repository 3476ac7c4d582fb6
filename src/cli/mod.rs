pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DayChoice};
pub use commands::run;
