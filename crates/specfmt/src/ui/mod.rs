pub mod cli;
pub mod colors;
pub mod commands;

pub use cli::{Cli, Commands, FormatCommand};
pub use colors::Colors;
