pub mod commands;
pub mod reformat;

pub use commands::Cli;
pub use reformat::{handle_reformat, run_reformat, ReformatJob};
